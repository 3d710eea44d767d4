//! # Calm Core Library
//!
//! Core logic for Calm, a terminal guided-meditation timer. The CLI binary
//! is a thin layer over this crate: menus and prompts live there, timing and
//! persistence live here.
//!
//! ## Architecture
//!
//! - **Timer**: wall-clock-based state machines that the caller drives by
//!   invoking `tick()`; [`run_session`] does that with a [`Clock`] and the
//!   only blocking sleep in the system
//! - **Cue scripts**: offset-ordered prompts released through a forward-only
//!   cursor
//! - **Storage**: append-only CSV session log and TOML configuration
//!
//! ## Key Components
//!
//! - [`SessionEngine`]: countdown with scripted cues
//! - [`BoxBreathingDriver`]: inhale/hold/exhale/hold repeating timer
//! - [`SessionLog`]: durable record of completed sessions
//! - [`Config`]: application configuration management

pub mod clock;
pub mod error;
pub mod events;
pub mod input;
pub mod output;
pub mod scripts;
pub mod session;
pub mod storage;
pub mod timer;

pub use clock::{AbortSignal, Clock, ManualClock, SystemClock};
pub use error::{ConfigError, CoreError, ValidationError};
pub use events::Event;
pub use output::{MemoryOutput, OutputEvent, SessionOutput};
pub use session::{SessionCompletion, SessionKind, SessionRecord, SessionSpec};
pub use storage::{Config, LogStats, SessionLog};
pub use timer::{
    run_session, BoxBreathingDriver, BoxBreathingSpec, Cue, CueScript, SessionEngine, TickSession,
};
