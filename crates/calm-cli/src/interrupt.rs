use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use calm_core::AbortSignal;

pub const FAREWELL: &str = "Session interrupted. Take care.";

/// Ctrl-C routing.
///
/// While a session runs the handler only raises the abort flag, and the
/// engine unwinds at its next tick. Anywhere else (menus, prompts) it says
/// goodbye and exits on the spot.
#[derive(Clone)]
pub struct Interrupt {
    abort: AbortSignal,
    in_session: Arc<AtomicBool>,
}

impl Interrupt {
    pub fn install() -> Result<Self, ctrlc::Error> {
        let interrupt = Self {
            abort: AbortSignal::new(),
            in_session: Arc::new(AtomicBool::new(false)),
        };
        let handler = interrupt.clone();
        ctrlc::set_handler(move || {
            if handler.in_session.load(Ordering::SeqCst) {
                handler.abort.raise();
            } else {
                println!("\n\n{FAREWELL}");
                std::process::exit(130);
            }
        })?;
        Ok(interrupt)
    }

    /// Run `f` as a session: the abort flag is cleared first and Ctrl-C
    /// raises it instead of exiting.
    pub fn during_session<T>(&self, f: impl FnOnce(&AbortSignal) -> T) -> T {
        self.abort.reset();
        self.in_session.store(true, Ordering::SeqCst);
        let result = f(&self.abort);
        self.in_session.store(false, Ordering::SeqCst);
        result
    }
}
