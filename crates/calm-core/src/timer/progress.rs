//! Countdown line rendering.
//!
//! Pure functions of `(elapsed, total)`. The engine recomputes the line from
//! absolute elapsed time on every tick, so a late tick never skews it.

use std::time::Duration;

/// Number of slots in the progress bar.
pub const BAR_WIDTH: usize = 30;

/// Snapshot of a running countdown. Derived per tick, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressState {
    pub elapsed: Duration,
    pub total: Duration,
}

impl ProgressState {
    pub fn new(elapsed: Duration, total: Duration) -> Self {
        Self { elapsed, total }
    }

    /// `elapsed / total`, clamped to `0.0 ..= 1.0`.
    pub fn fraction(&self) -> f64 {
        let total = self.total.as_secs_f64();
        if total <= 0.0 {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / total).clamp(0.0, 1.0)
    }

    pub fn filled_slots(&self) -> usize {
        ((BAR_WIDTH as f64 * self.fraction()).floor() as usize).min(BAR_WIDTH)
    }

    pub fn remaining(&self) -> Duration {
        self.total.saturating_sub(self.elapsed)
    }

    pub fn bar(&self) -> String {
        let filled = self.filled_slots();
        format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
    }

    /// Remaining time as `MM:SS`, truncated toward zero.
    pub fn countdown(&self) -> String {
        format_mm_ss(self.remaining())
    }
}

/// `MM:SS` with whole seconds truncated. Minutes grow past two digits for
/// sessions longer than 99 minutes.
pub fn format_mm_ss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Render the single-line countdown display.
///
/// ```text
/// Guided: [#########---------------------] 03:30 remaining
/// ```
pub fn render(elapsed: Duration, total: Duration, label: &str) -> String {
    let state = ProgressState::new(elapsed, total);
    format!("{} {} {} remaining", label, state.bar(), state.countdown())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: f64) -> Duration {
        Duration::from_secs_f64(s)
    }

    #[test]
    fn start_of_session_is_empty_bar_full_time() {
        let line = render(Duration::ZERO, secs(300.0), "Guided:");
        assert_eq!(
            line,
            format!("Guided: [{}] 05:00 remaining", "-".repeat(30))
        );
    }

    #[test]
    fn halfway_fills_fifteen_slots() {
        let state = ProgressState::new(secs(60.0), secs(120.0));
        assert_eq!(state.filled_slots(), 15);
        assert_eq!(state.countdown(), "01:00");
    }

    #[test]
    fn countdown_truncates_instead_of_rounding() {
        let state = ProgressState::new(secs(0.2), secs(10.0));
        assert_eq!(state.countdown(), "00:09");
        let state = ProgressState::new(secs(9.99), secs(10.0));
        assert_eq!(state.countdown(), "00:00");
    }

    #[test]
    fn overshoot_clamps_to_full_bar_and_zero() {
        let line = render(secs(12.0), secs(10.0), "Timer:");
        assert_eq!(line, format!("Timer: [{}] 00:00 remaining", "#".repeat(30)));
    }

    #[test]
    fn long_sessions_show_three_digit_minutes() {
        assert_eq!(format_mm_ss(secs(100.0 * 60.0 + 5.0)), "100:05");
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn filled_slots_match_floor_and_never_decrease(
                total_ds in 1u64..36_000,
                a in 0.0f64..=1.0,
                b in 0.0f64..=1.0,
            ) {
                let total = Duration::from_millis(total_ds * 100);
                let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
                let early = Duration::from_secs_f64(total.as_secs_f64() * lo);
                let late = Duration::from_secs_f64(total.as_secs_f64() * hi);

                let s_early = ProgressState::new(early, total);
                let s_late = ProgressState::new(late, total);
                prop_assert!(s_early.filled_slots() <= s_late.filled_slots());

                let expected = (30.0 * (early.as_secs_f64() / total.as_secs_f64())).floor() as usize;
                prop_assert_eq!(s_early.filled_slots(), expected.min(BAR_WIDTH));
            }
        }
    }
}
