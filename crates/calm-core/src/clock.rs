//! Time source for the session engines.
//!
//! Engines never read the system clock directly. They hold a [`Clock`],
//! which supplies monotonic elapsed time and performs the blocking
//! per-tick suspension, so tests can drive a session with [`ManualClock`]
//! without sleeping.

use std::cell::Cell;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

pub trait Clock {
    /// Monotonic time since the clock's origin. Never decreases.
    fn now(&self) -> Duration;

    /// Block the current thread for `d`.
    fn sleep(&self, d: Duration);
}

/// Wall-clock implementation backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn sleep(&self, d: Duration) {
        std::thread::sleep(d);
    }
}

/// Virtual clock: `sleep` advances time instantly.
///
/// Every sleep request is recorded so tests can assert on cadence.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Duration>,
    sleeps: Cell<usize>,
    /// Extra time added on each sleep, simulating scheduler jitter.
    jitter: Duration,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every sleep overshoots by `jitter`.
    pub fn with_jitter(jitter: Duration) -> Self {
        Self {
            jitter,
            ..Self::default()
        }
    }

    pub fn advance(&self, d: Duration) {
        self.now.set(self.now.get() + d);
    }

    pub fn sleep_count(&self) -> usize {
        self.sleeps.get()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }

    fn sleep(&self, d: Duration) {
        self.sleeps.set(self.sleeps.get() + 1);
        self.advance(d + self.jitter);
    }
}

/// Cooperative cancellation flag shared with a signal handler.
///
/// Engines poll it once per tick; raising it turns the current run into
/// [`CoreError::Interrupted`](crate::error::CoreError::Interrupted).
#[derive(Debug, Clone, Default)]
pub struct AbortSignal {
    raised: Arc<AtomicBool>,
}

impl AbortSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&self) {
        self.raised.store(true, Ordering::SeqCst);
    }

    pub fn is_raised(&self) -> bool {
        self.raised.load(Ordering::SeqCst)
    }

    /// Clear the flag before starting the next session.
    pub fn reset(&self) {
        self.raised.store(false, Ordering::SeqCst);
    }
}
