//! Box-breathing driver.
//!
//! A fixed four-phase cycle (inhale, hold, exhale, hold) repeated `cycles`
//! times. Each phase counts down whole seconds on a single redrawn line.
//! Like the session engine, position is derived from absolute elapsed time
//! on every tick.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Local};

use super::runner::TickSession;
use crate::clock::Clock;
use crate::error::ValidationError;
use crate::events::Event;
use crate::output::SessionOutput;
use crate::session::{SessionCompletion, SessionKind};

/// Pause between the start bell and the first inhale.
pub const DEFAULT_SETTLE: Duration = Duration::from_millis(1200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Inhale,
    Hold1,
    Exhale,
    Hold2,
}

impl Phase {
    pub const ORDER: [Phase; 4] = [Phase::Inhale, Phase::Hold1, Phase::Exhale, Phase::Hold2];

    pub fn label(self) -> &'static str {
        match self {
            Phase::Inhale => "Inhale",
            Phase::Hold1 | Phase::Hold2 => "Hold",
            Phase::Exhale => "Exhale",
        }
    }
}

/// Validated box-breathing parameters. All counts are positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxBreathingSpec {
    cycles: u32,
    inhale_s: u32,
    hold_s: u32,
    exhale_s: u32,
}

impl BoxBreathingSpec {
    pub fn new(cycles: u32, inhale_s: u32, hold_s: u32, exhale_s: u32) -> Result<Self, ValidationError> {
        for (field, value) in [
            ("cycles", cycles),
            ("inhale", inhale_s),
            ("hold", hold_s),
            ("exhale", exhale_s),
        ] {
            if value == 0 {
                return Err(ValidationError::invalid(field, "must be a positive whole number"));
            }
        }
        Ok(Self {
            cycles,
            inhale_s,
            hold_s,
            exhale_s,
        })
    }

    pub fn cycles(&self) -> u32 {
        self.cycles
    }

    pub fn phase_secs(&self, phase: Phase) -> u64 {
        u64::from(match phase {
            Phase::Inhale => self.inhale_s,
            Phase::Hold1 | Phase::Hold2 => self.hold_s,
            Phase::Exhale => self.exhale_s,
        })
    }

    pub fn cycle_secs(&self) -> u64 {
        u64::from(self.inhale_s) + 2 * u64::from(self.hold_s) + u64::from(self.exhale_s)
    }

    pub fn total_secs(&self) -> u64 {
        u64::from(self.cycles) * self.cycle_secs()
    }

    /// Logged length; total elapsed over sixty, whatever the phase mix.
    pub fn duration_minutes(&self) -> f64 {
        self.total_secs() as f64 / 60.0
    }

    /// Where in the exercise `elapsed` falls, or `None` once it is over.
    pub fn locate(&self, elapsed: Duration) -> Option<PhasePosition> {
        let whole = elapsed.as_secs();
        if whole >= self.total_secs() {
            return None;
        }
        let cycle_len = self.cycle_secs();
        let cycle = (whole / cycle_len) as u32 + 1;
        let mut into_cycle = whole % cycle_len;
        for phase in Phase::ORDER {
            let len = self.phase_secs(phase);
            if into_cycle < len {
                return Some(PhasePosition {
                    cycle,
                    phase,
                    seconds_remaining: len - into_cycle,
                });
            }
            into_cycle -= len;
        }
        None
    }

    pub fn pattern_description(&self) -> String {
        format!(
            "Cycles: {}, Pattern: Inhale {}s — Hold {}s — Exhale {}s — Hold {}s",
            self.cycles, self.inhale_s, self.hold_s, self.exhale_s, self.hold_s
        )
    }
}

/// A point inside the exercise. `cycle` is one-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhasePosition {
    pub cycle: u32,
    pub phase: Phase,
    pub seconds_remaining: u64,
}

impl fmt::Display for PhasePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.phase.label(), self.seconds_remaining)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreathingState {
    Idle,
    Running(Phase),
    Completed,
}

#[derive(Debug, Clone)]
pub struct BoxBreathingDriver {
    spec: BoxBreathingSpec,
    state: BreathingState,
    settle: Duration,
    /// Clock reading at which the first inhale begins.
    origin: Option<Duration>,
    current_cycle: u32,
    started_at: Option<DateTime<Local>>,
}

impl BoxBreathingDriver {
    pub fn new(spec: BoxBreathingSpec) -> Self {
        Self {
            spec,
            state: BreathingState::Idle,
            settle: DEFAULT_SETTLE,
            origin: None,
            current_cycle: 0,
            started_at: None,
        }
    }

    pub fn with_settle(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }

    pub fn state(&self) -> BreathingState {
        self.state
    }

    fn elapsed(&self, clock: &impl Clock) -> Option<Duration> {
        let origin = self.origin?;
        clock.now().checked_sub(origin)
    }

    pub fn start(&mut self, clock: &impl Clock, out: &mut impl SessionOutput) -> Option<Event> {
        if self.state != BreathingState::Idle {
            return None;
        }
        self.state = BreathingState::Running(Phase::Inhale);
        self.origin = Some(clock.now() + self.settle);
        let at = Local::now();
        self.started_at = Some(at);
        out.line(&self.spec.pattern_description());
        out.bell();
        tracing::info!(
            cycles = self.spec.cycles,
            total_secs = self.spec.total_secs(),
            "box breathing started"
        );
        Some(Event::SessionStarted {
            kind: SessionKind::BoxBreathing,
            total: Duration::from_secs(self.spec.total_secs()),
            at,
        })
    }

    pub fn tick(&mut self, clock: &impl Clock, out: &mut impl SessionOutput) -> Option<Event> {
        if !matches!(self.state, BreathingState::Running(_)) {
            return None;
        }
        // Still settling after the start bell.
        let elapsed = self.elapsed(clock)?;

        match self.spec.locate(elapsed) {
            Some(pos) => {
                if pos.cycle != self.current_cycle {
                    self.current_cycle = pos.cycle;
                    out.clear_line();
                    out.line(&format!("Cycle {}/{}", pos.cycle, self.spec.cycles));
                }
                if self.state != BreathingState::Running(pos.phase) {
                    tracing::debug!(cycle = pos.cycle, phase = pos.phase.label(), "phase changed");
                    self.state = BreathingState::Running(pos.phase);
                }
                out.redraw(&pos.to_string());
                None
            }
            None => Some(self.complete(out)),
        }
    }

    fn complete(&mut self, out: &mut impl SessionOutput) -> Event {
        self.state = BreathingState::Completed;
        out.clear_line();
        out.bell();
        out.message(SessionKind::BoxBreathing.completion_message());
        let completed_at = Local::now();
        let completion = SessionCompletion {
            kind: SessionKind::BoxBreathing,
            log_label: "Box breathing".to_string(),
            duration_min: self.spec.duration_minutes(),
            started_at: self.started_at.unwrap_or(completed_at),
            completed_at,
        };
        tracing::info!(duration_min = completion.duration_min, "box breathing completed");
        Event::SessionCompleted(completion)
    }
}

impl TickSession for BoxBreathingDriver {
    fn start<C: Clock, O: SessionOutput>(&mut self, clock: &C, out: &mut O) -> Option<Event> {
        BoxBreathingDriver::start(self, clock, out)
    }

    fn tick<C: Clock, O: SessionOutput>(&mut self, clock: &C, out: &mut O) -> Option<Event> {
        BoxBreathingDriver::tick(self, clock, out)
    }

    /// Wake on the next whole-second boundary of the count.
    fn next_sleep<C: Clock>(&self, clock: &C) -> Duration {
        let Some(origin) = self.origin else {
            return Duration::from_secs(1);
        };
        let now = clock.now();
        match now.checked_sub(origin) {
            None => origin - now,
            Some(elapsed) => Duration::from_secs(1) - Duration::from_nanos(u64::from(elapsed.subsec_nanos())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{AbortSignal, ManualClock};
    use crate::output::MemoryOutput;
    use crate::timer::run_session;

    fn even(cycles: u32, count: u32) -> BoxBreathingSpec {
        BoxBreathingSpec::new(cycles, count, count, count).unwrap()
    }

    #[test]
    fn total_and_logged_minutes() {
        let spec = even(2, 4);
        assert_eq!(spec.total_secs(), 32);
        assert_eq!(spec.duration_minutes(), 32.0 / 60.0);
    }

    #[test]
    fn asymmetric_phases_count_hold_twice() {
        let spec = BoxBreathingSpec::new(3, 4, 7, 8).unwrap();
        assert_eq!(spec.cycle_secs(), 26);
        assert_eq!(spec.duration_minutes(), 78.0 / 60.0);
    }

    #[test]
    fn zero_parameters_are_rejected() {
        assert!(BoxBreathingSpec::new(0, 4, 4, 4).is_err());
        assert!(BoxBreathingSpec::new(4, 0, 4, 4).is_err());
        assert!(BoxBreathingSpec::new(4, 4, 0, 4).is_err());
        assert!(BoxBreathingSpec::new(4, 4, 4, 0).is_err());
    }

    #[test]
    fn locate_walks_phases_in_order() {
        let spec = BoxBreathingSpec::new(2, 2, 1, 3).unwrap();
        let at = |s: u64| spec.locate(Duration::from_secs(s)).unwrap();

        assert_eq!(at(0), PhasePosition { cycle: 1, phase: Phase::Inhale, seconds_remaining: 2 });
        assert_eq!(at(1).seconds_remaining, 1);
        assert_eq!(at(2).phase, Phase::Hold1);
        assert_eq!(at(3).phase, Phase::Exhale);
        assert_eq!(at(5).seconds_remaining, 1);
        assert_eq!(at(6).phase, Phase::Hold2);
        assert_eq!(at(7), PhasePosition { cycle: 2, phase: Phase::Inhale, seconds_remaining: 2 });
        assert!(spec.locate(Duration::from_secs(14)).is_none());
    }

    #[test]
    fn display_line_shows_label_and_count() {
        let pos = PhasePosition { cycle: 1, phase: Phase::Hold2, seconds_remaining: 3 };
        assert_eq!(pos.to_string(), "Hold: 3");
    }

    #[test]
    fn full_run_counts_down_every_second() {
        let clock = ManualClock::new();
        let mut out = MemoryOutput::new();
        let mut driver = BoxBreathingDriver::new(even(2, 4));
        let completion = run_session(&mut driver, &clock, &mut out, &AbortSignal::new()).unwrap();

        // Settle, then one tick per counted second.
        assert_eq!(clock.now(), DEFAULT_SETTLE + Duration::from_secs(32));
        let redraws = out.redraws();
        assert_eq!(redraws.len(), 32);
        assert_eq!(&redraws[..5], ["Inhale: 4", "Inhale: 3", "Inhale: 2", "Inhale: 1", "Hold: 4"]);
        assert_eq!(
            out.lines(),
            [
                "Cycles: 2, Pattern: Inhale 4s — Hold 4s — Exhale 4s — Hold 4s",
                "Cycle 1/2",
                "Cycle 2/2",
            ]
        );
        assert_eq!(out.messages(), [SessionKind::BoxBreathing.completion_message()]);
        assert_eq!(out.bell_count(), 2);
        assert_eq!(completion.duration_min, 32.0 / 60.0);
        assert_eq!(completion.log_label, "Box breathing");
        assert_eq!(driver.state(), BreathingState::Completed);
    }

    #[test]
    fn late_ticks_realign_to_second_boundaries() {
        let clock = ManualClock::with_jitter(Duration::from_millis(250));
        let mut out = MemoryOutput::new();
        let mut driver = BoxBreathingDriver::new(even(1, 2)).with_settle(Duration::ZERO);
        run_session(&mut driver, &clock, &mut out, &AbortSignal::new()).unwrap();

        // Jitter can swallow a count, but the run never exceeds total + one tick.
        assert!(clock.now() >= Duration::from_secs(8));
        assert!(clock.now() < Duration::from_secs(9) + Duration::from_millis(250));
        assert!(out.redraws().first().is_some_and(|l| *l == "Inhale: 2"));
    }
}
