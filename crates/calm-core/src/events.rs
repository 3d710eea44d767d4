use std::time::Duration;

use chrono::{DateTime, Local};

use crate::session::{SessionCompletion, SessionKind};

/// State changes reported by the session engines.
///
/// `start()` yields `SessionStarted`; `tick()` yields `SessionCompleted`
/// once, on the tick that reaches the end.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    SessionStarted {
        kind: SessionKind,
        total: Duration,
        at: DateTime<Local>,
    },
    SessionCompleted(SessionCompletion),
}

impl Event {
    pub fn into_completion(self) -> Option<SessionCompletion> {
        match self {
            Event::SessionCompleted(completion) => Some(completion),
            Event::SessionStarted { .. } => None,
        }
    }
}
