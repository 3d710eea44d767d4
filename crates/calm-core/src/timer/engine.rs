//! Session timer engine.
//!
//! The engine is a wall-clock-based state machine. It does not use
//! internal threads - the caller is responsible for calling `tick()`
//! periodically, or hands the engine to [`run_session`](super::run_session).
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> Completed
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = SessionEngine::new(spec);
//! engine.start(&clock, &mut out);
//! // In a loop:
//! engine.tick(&clock, &mut out); // Returns Some(Event) when the session ends
//! ```

use std::time::Duration;

use chrono::{DateTime, Local};

use super::cue::CueCursor;
use super::progress::{self, ProgressState};
use super::runner::TickSession;
use crate::clock::Clock;
use crate::events::Event;
use crate::output::SessionOutput;
use crate::session::{SessionCompletion, SessionKind, SessionSpec};

/// Redraw cadence for countdown sessions.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Running,
    Completed,
}

/// Drives one countdown session with optional scripted cues.
///
/// Elapsed time is always `clock.now() - start`; nothing is accumulated
/// between ticks, so a slow tick cannot make the countdown drift.
#[derive(Debug, Clone)]
pub struct SessionEngine {
    spec: SessionSpec,
    state: SessionState,
    cursor: CueCursor,
    /// Clock reading at `start()`.
    start: Option<Duration>,
    started_at: Option<DateTime<Local>>,
    tick_interval: Duration,
}

impl SessionEngine {
    pub fn new(spec: SessionSpec) -> Self {
        Self {
            spec,
            state: SessionState::Idle,
            cursor: CueCursor::START,
            start: None,
            started_at: None,
            tick_interval: DEFAULT_TICK_INTERVAL,
        }
    }

    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        if !interval.is_zero() {
            self.tick_interval = interval;
        }
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Time since `start()`, or zero while idle.
    pub fn elapsed(&self, clock: &impl Clock) -> Duration {
        self.start
            .map(|start| clock.now().saturating_sub(start))
            .unwrap_or_default()
    }

    /// Current progress, clamped to the session length.
    pub fn progress(&self, clock: &impl Clock) -> ProgressState {
        let total = self.spec.total();
        let elapsed = match self.state {
            SessionState::Completed => total,
            _ => self.elapsed(clock).min(total),
        };
        ProgressState::new(elapsed, total)
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self, clock: &impl Clock, out: &mut impl SessionOutput) -> Option<Event> {
        if self.state != SessionState::Idle {
            return None;
        }
        self.state = SessionState::Running;
        self.cursor = CueCursor::START;
        self.start = Some(clock.now());
        let at = Local::now();
        self.started_at = Some(at);
        out.bell();
        tracing::info!(
            kind = %self.spec.kind(),
            total_secs = self.spec.total().as_secs_f64(),
            cues = self.spec.cue_script().map_or(0, |s| s.len()),
            "session started"
        );
        Some(Event::SessionStarted {
            kind: self.spec.kind(),
            total: self.spec.total(),
            at,
        })
    }

    /// Call periodically. Returns `Some(Event::SessionCompleted)` on the tick
    /// that reaches the configured duration.
    pub fn tick(&mut self, clock: &impl Clock, out: &mut impl SessionOutput) -> Option<Event> {
        if self.state != SessionState::Running {
            return None;
        }
        let total = self.spec.total();
        let elapsed = self.elapsed(clock);

        if elapsed >= total {
            // Cues scheduled exactly at the end still get their moment.
            self.emit_due(total, out);
            return Some(self.complete(out));
        }

        self.emit_due(elapsed, out);
        let label = self.label(elapsed);
        out.redraw(&progress::render(elapsed, total, &label));
        None
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn emit_due(&mut self, elapsed: Duration, out: &mut impl SessionOutput) {
        let Some(script) = self.spec.cue_script() else {
            return;
        };
        let (due, next) = script.next_due(self.cursor, elapsed);
        if !due.is_empty() {
            out.clear_line();
        }
        for cue in due {
            tracing::debug!(offset_secs = cue.offset.as_secs_f64(), text = %cue.text, "cue fired");
            out.cue(&cue.text);
        }
        self.cursor = next;
    }

    /// Body scans name the part in focus; every other kind uses its fixed prefix.
    fn label(&self, elapsed: Duration) -> String {
        match (self.spec.kind(), self.spec.cue_script()) {
            (SessionKind::BodyScan, Some(script)) if !script.is_empty() => {
                let part = script.current_index(elapsed).map_or(1, |i| i + 1);
                format!("Part {}/{}:", part, script.len())
            }
            (kind, _) => kind.progress_label().to_string(),
        }
    }

    fn complete(&mut self, out: &mut impl SessionOutput) -> Event {
        self.state = SessionState::Completed;
        out.clear_line();
        out.bell();
        out.message(self.spec.kind().completion_message());

        let completed_at = Local::now();
        let completion = SessionCompletion {
            kind: self.spec.kind(),
            log_label: self.spec.log_label().to_string(),
            duration_min: self.spec.duration_minutes(),
            started_at: self.started_at.unwrap_or(completed_at),
            completed_at,
        };
        tracing::info!(
            kind = %completion.kind,
            duration_min = completion.duration_min,
            "session completed"
        );
        Event::SessionCompleted(completion)
    }
}

impl TickSession for SessionEngine {
    fn start<C: Clock, O: SessionOutput>(&mut self, clock: &C, out: &mut O) -> Option<Event> {
        SessionEngine::start(self, clock, out)
    }

    fn tick<C: Clock, O: SessionOutput>(&mut self, clock: &C, out: &mut O) -> Option<Event> {
        SessionEngine::tick(self, clock, out)
    }

    fn next_sleep<C: Clock>(&self, _clock: &C) -> Duration {
        self.tick_interval
    }
}
