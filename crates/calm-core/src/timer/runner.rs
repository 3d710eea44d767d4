use std::time::Duration;

use crate::clock::{AbortSignal, Clock};
use crate::error::{CoreError, Result};
use crate::events::Event;
use crate::output::SessionOutput;
use crate::session::SessionCompletion;

/// A session that advances by polling a clock.
pub trait TickSession {
    fn start<C: Clock, O: SessionOutput>(&mut self, clock: &C, out: &mut O) -> Option<Event>;

    /// Returns the completion event on the tick that finishes the session.
    fn tick<C: Clock, O: SessionOutput>(&mut self, clock: &C, out: &mut O) -> Option<Event>;

    /// How long to block before the next tick.
    fn next_sleep<C: Clock>(&self, clock: &C) -> Duration;
}

/// Run a session from start to completion.
///
/// The sleep between ticks is the only blocking point. `abort` is checked
/// around every sleep; once raised the run ends with
/// [`CoreError::Interrupted`] and no completion is produced.
pub fn run_session<S, C, O>(
    session: &mut S,
    clock: &C,
    out: &mut O,
    abort: &AbortSignal,
) -> Result<SessionCompletion>
where
    S: TickSession,
    C: Clock,
    O: SessionOutput,
{
    if abort.is_raised() {
        return Err(CoreError::Interrupted);
    }
    session.start(clock, out);

    loop {
        if abort.is_raised() {
            tracing::warn!("session aborted");
            out.clear_line();
            return Err(CoreError::Interrupted);
        }
        if let Some(completion) = session.tick(clock, out).and_then(Event::into_completion) {
            return Ok(completion);
        }
        clock.sleep(session.next_sleep(clock));
    }
}
