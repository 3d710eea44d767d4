//! Parsing and validation of user-typed values.
//!
//! Everything here runs before any session state exists, so a rejected value
//! never produces a bell, a cue or a log row.

use crate::error::ValidationError;

/// Minutes as typed at a prompt, e.g. `"7.5"`. Must be finite and positive.
pub fn parse_minutes(input: &str) -> Result<f64, ValidationError> {
    let trimmed = input.trim();
    let minutes: f64 = trimmed
        .parse()
        .map_err(|_| ValidationError::invalid("minutes", format!("'{trimmed}' is not a number")))?;
    if !minutes.is_finite() || minutes <= 0.0 {
        return Err(ValidationError::invalid("minutes", "duration must be greater than zero"));
    }
    Ok(minutes)
}

/// Minutes with a fallback for blank input.
pub fn parse_minutes_or(input: &str, default: f64) -> Result<f64, ValidationError> {
    if input.trim().is_empty() {
        return Ok(default);
    }
    parse_minutes(input)
}

/// Positive whole number; blank input yields `default`.
pub fn parse_count_or(field: &str, input: &str, default: u32) -> Result<u32, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(default);
    }
    let value: i64 = trimmed
        .parse()
        .map_err(|_| ValidationError::invalid(field, format!("'{trimmed}' is not a whole number")))?;
    if value <= 0 {
        return Err(ValidationError::invalid(field, "must be greater than zero"));
    }
    u32::try_from(value).map_err(|_| ValidationError::invalid(field, "value is too large"))
}

/// Entries of the interactive menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Guided(u32),
    CustomTimer,
    BoxBreathing,
    BodyScan,
    ViewLog,
    Exit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::Guided(5)),
            "2" => Some(MenuChoice::Guided(10)),
            "3" => Some(MenuChoice::Guided(15)),
            "4" => Some(MenuChoice::CustomTimer),
            "5" => Some(MenuChoice::BoxBreathing),
            "6" => Some(MenuChoice::BodyScan),
            "7" => Some(MenuChoice::ViewLog),
            "0" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minutes_accept_fractions_and_whitespace() {
        assert_eq!(parse_minutes(" 7.5\n").unwrap(), 7.5);
        assert_eq!(parse_minutes("3").unwrap(), 3.0);
    }

    #[test]
    fn minutes_reject_non_positive_and_garbage() {
        for bad in ["0", "-2", "abc", "", "inf", "NaN"] {
            assert!(parse_minutes(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn blank_minutes_fall_back_to_default() {
        assert_eq!(parse_minutes_or("  ", 10.0).unwrap(), 10.0);
        assert_eq!(parse_minutes_or("12", 10.0).unwrap(), 12.0);
    }

    #[test]
    fn counts_default_when_blank() {
        assert_eq!(parse_count_or("cycles", "", 4).unwrap(), 4);
        assert_eq!(parse_count_or("cycles", "6", 4).unwrap(), 6);
    }

    #[test]
    fn counts_reject_zero_negative_and_fractions() {
        for bad in ["0", "-1", "2.5", "four"] {
            let err = parse_count_or("inhale", bad, 4).unwrap_err();
            assert!(matches!(err, ValidationError::InvalidValue { ref field, .. } if field == "inhale"));
        }
    }

    #[test]
    fn menu_choices() {
        assert_eq!(MenuChoice::parse("1"), Some(MenuChoice::Guided(5)));
        assert_eq!(MenuChoice::parse(" 3 "), Some(MenuChoice::Guided(15)));
        assert_eq!(MenuChoice::parse("0"), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::parse("9"), None);
    }
}
