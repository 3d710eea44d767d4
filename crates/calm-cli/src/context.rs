use std::path::PathBuf;

use calm_core::{Config, SessionLog};

use crate::interrupt::Interrupt;

/// Everything a command needs, resolved once at startup.
pub struct AppContext {
    pub config: Config,
    pub log: SessionLog,
    pub interrupt: Interrupt,
    /// Attached to every record written by this invocation.
    pub note: String,
}

impl AppContext {
    pub fn init(
        config: Config,
        log_override: Option<PathBuf>,
        note: Option<String>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let log_path = match log_override {
            Some(path) => path,
            None => config.log_path()?,
        };
        tracing::debug!(log = %log_path.display(), "resolved session log");
        Ok(Self {
            log: SessionLog::new(log_path),
            interrupt: Interrupt::install()?,
            note: note.unwrap_or_default(),
            config,
        })
    }
}
