//! Session descriptions and the records they produce.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::timer::CueScript;

/// Timestamp format used in the session log.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionKind {
    Guided,
    CustomTimer,
    BodyScan,
    BoxBreathing,
}

impl SessionKind {
    /// Prefix shown before the countdown bar.
    pub fn progress_label(self) -> &'static str {
        match self {
            SessionKind::Guided => "Guided:",
            SessionKind::CustomTimer => "Timer:",
            SessionKind::BodyScan => "Body-scan:",
            SessionKind::BoxBreathing => "Box breathing:",
        }
    }

    pub fn completion_message(self) -> &'static str {
        match self {
            SessionKind::Guided => "Session complete — gently come back when ready.",
            SessionKind::CustomTimer => "Time's up. Well done.",
            SessionKind::BodyScan => "Body scan complete. Slowly reconnect with the room.",
            SessionKind::BoxBreathing => "Box breathing complete. Notice how you feel.",
        }
    }
}

impl fmt::Display for SessionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionKind::Guided => "guided",
            SessionKind::CustomTimer => "custom timer",
            SessionKind::BodyScan => "body scan",
            SessionKind::BoxBreathing => "box breathing",
        };
        f.write_str(s)
    }
}

/// Everything the timer engine needs to run one session.
///
/// Only constructible through [`SessionSpec::new`], so a spec in hand always
/// has a positive, finite duration.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSpec {
    kind: SessionKind,
    total: Duration,
    cue_script: Option<CueScript>,
    /// Label written to the `type` column of the log.
    log_label: String,
}

impl SessionSpec {
    pub fn new(
        kind: SessionKind,
        total_secs: f64,
        cue_script: Option<CueScript>,
        log_label: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let invalid = || {
            ValidationError::invalid(
                "duration",
                format!("session length must be a positive number of seconds, got {total_secs}"),
            )
        };
        if !total_secs.is_finite() || total_secs <= 0.0 {
            return Err(invalid());
        }
        // Too large for a Duration, or so small it rounds to nothing.
        let total = Duration::try_from_secs_f64(total_secs).map_err(|_| invalid())?;
        if total.is_zero() {
            return Err(invalid());
        }
        Ok(Self {
            kind,
            total,
            cue_script,
            log_label: log_label.into(),
        })
    }

    pub fn kind(&self) -> SessionKind {
        self.kind
    }

    pub fn total(&self) -> Duration {
        self.total
    }

    pub fn cue_script(&self) -> Option<&CueScript> {
        self.cue_script.as_ref()
    }

    pub fn log_label(&self) -> &str {
        &self.log_label
    }

    pub fn duration_minutes(&self) -> f64 {
        self.total.as_secs_f64() / 60.0
    }
}

/// Produced exactly once when a session runs to the end.
///
/// Aborted sessions never produce one, so nothing partial can reach the log.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionCompletion {
    pub kind: SessionKind,
    pub log_label: String,
    pub duration_min: f64,
    pub started_at: DateTime<Local>,
    pub completed_at: DateTime<Local>,
}

impl SessionCompletion {
    pub fn into_record(self, notes: impl Into<String>) -> SessionRecord {
        SessionRecord {
            timestamp: truncate_to_seconds(self.completed_at.naive_local()),
            kind: self.log_label,
            duration_min: self.duration_min,
            notes: notes.into(),
        }
    }
}

/// One row of the session log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub timestamp: NaiveDateTime,
    #[serde(rename = "type")]
    pub kind: String,
    pub duration_min: f64,
    #[serde(default)]
    pub notes: String,
}

impl SessionRecord {
    pub fn timestamp_string(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }
}

fn truncate_to_seconds(ts: NaiveDateTime) -> NaiveDateTime {
    ts.with_nanosecond(0).unwrap_or(ts)
}
