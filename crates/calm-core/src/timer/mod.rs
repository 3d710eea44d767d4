mod breathing;
mod cue;
mod engine;
pub mod progress;
mod runner;

pub use breathing::{
    BoxBreathingDriver, BoxBreathingSpec, BreathingState, Phase, PhasePosition, DEFAULT_SETTLE,
};
pub use cue::{Cue, CueCursor, CueScript};
pub use engine::{SessionEngine, SessionState, DEFAULT_TICK_INTERVAL};
pub use progress::{render, ProgressState};
pub use runner::{run_session, TickSession};
