//! Built-in guided meditations and session builders.

use std::time::Duration;

use crate::error::ValidationError;
use crate::session::{SessionKind, SessionSpec};
use crate::timer::{Cue, CueScript};

const GUIDED_5: &[(u64, &str)] = &[
    (0, "Sit comfortably, spine straight, hands relaxed."),
    (8, "Close your eyes softly. Bring attention to the breath."),
    (20, "Follow your inhale... and your exhale. No need to control."),
    (60, "If the mind wanders, gently bring it back to the breath."),
    (120, "Feel the body—weight on the seat, ground beneath you."),
    (180, "Notice sounds outside without judging them."),
    (240, "Feel gratitude for this time. When ready, deepen the breath."),
];

const GUIDED_10: &[(u64, &str)] = &[
    (0, "Make yourself comfortable. Relax your shoulders."),
    (10, "Close your eyes. Take three slow breaths, in and out."),
    (30, "Allow your breath to find its own natural rhythm."),
    (90, "Scan the body from head to toe—release any tension."),
    (180, "Focus on the rise and fall of the chest or belly."),
    (300, "If thoughts appear, label them 'thinking' and let them pass."),
    (420, "Extend your out-breath by one second — just softly."),
    (540, "Bring kindness to yourself. Hold this moment of calm."),
    (570, "When ready, wiggle your fingers and toes and open eyes slowly."),
];

const GUIDED_15: &[(u64, &str)] = &[
    (0, "Begin seated or lying down. Let the body soften."),
    (12, "Take a deep inhalation and a slow exhalation."),
    (40, "Scan your body and breathe into any tight spots."),
    (120, "Now focus on breath sensations — cool at the nostrils, warm at the exhale."),
    (300, "If a thought grabs you, observe it, then return to the breath."),
    (480, "Stay with a gentle attention; do not push or force."),
    (660, "Offer a short gratitude for something simple (a breath, a sound)."),
    (840, "Slowly deepen your breath and return awareness to the room."),
    (880, "When ready, open your eyes and take this calm into your next minutes."),
];

pub const BODY_PARTS: [&str; 10] = [
    "top of the head — notice sensations there",
    "forehead and eyes — soften the muscles",
    "jaw and mouth — let the jaw relax",
    "neck and shoulders — release weight into the chair",
    "arms, hands, and fingers — soft and heavy",
    "chest and belly — breathe into the chest",
    "lower back and hips — let them sink",
    "thighs and knees — feel support",
    "calves and shins — let go",
    "feet and toes — notice contact with the floor",
];

pub const GUIDED_LENGTHS: [u32; 3] = [5, 10, 15];

pub const DEFAULT_BODY_SCAN_MINUTES: u32 = 10;

/// Script for one of the built-in guided lengths (5, 10 or 15 minutes).
pub fn guided_script(minutes: u32) -> Option<CueScript> {
    let table = match minutes {
        5 => GUIDED_5,
        10 => GUIDED_10,
        15 => GUIDED_15,
        _ => return None,
    };
    CueScript::from_secs(table).ok()
}

pub fn guided(minutes: u32) -> Result<SessionSpec, ValidationError> {
    let script = guided_script(minutes).ok_or_else(|| {
        ValidationError::invalid(
            "minutes",
            format!("guided sessions come in 5, 10 or 15 minutes, not {minutes}"),
        )
    })?;
    SessionSpec::new(
        SessionKind::Guided,
        f64::from(minutes) * 60.0,
        Some(script),
        format!("Guided {minutes} min"),
    )
}

/// Silent countdown of arbitrary (fractional) length.
pub fn custom_timer(minutes: f64) -> Result<SessionSpec, ValidationError> {
    if !minutes.is_finite() || minutes <= 0.0 {
        return Err(ValidationError::invalid("minutes", "duration must be greater than zero"));
    }
    SessionSpec::new(SessionKind::CustomTimer, minutes * 60.0, None, "Custom timer")
}

/// Body parts spread evenly over the session, one cue per part.
pub fn body_scan_script(total: Duration) -> CueScript {
    let per_part = total.as_secs_f64() / BODY_PARTS.len() as f64;
    let cues = BODY_PARTS
        .iter()
        .enumerate()
        .map(|(i, part)| {
            Cue::new(
                Duration::from_secs_f64(per_part * i as f64),
                format!("Focus: {part}"),
            )
        })
        .collect();
    // Offsets are generated in ascending order.
    CueScript::new(cues).unwrap_or_default()
}

pub fn body_scan(minutes: u32) -> Result<SessionSpec, ValidationError> {
    if minutes == 0 {
        return Err(ValidationError::invalid("minutes", "duration must be at least one minute"));
    }
    let total_secs = f64::from(minutes) * 60.0;
    let script = body_scan_script(Duration::from_secs_f64(total_secs));
    SessionSpec::new(
        SessionKind::BodyScan,
        total_secs,
        Some(script),
        format!("Body-scan {minutes} min"),
    )
}
