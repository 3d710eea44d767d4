//! Append-only CSV session log.
//!
//! Columns: `timestamp,type,duration_min,notes`. The file is opened only for
//! the duration of a single append and closed again; nothing is held open
//! while a session runs.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use crate::error::{CoreError, Result};
use crate::session::{SessionRecord, TIMESTAMP_FORMAT};

pub const HEADER: [&str; 4] = ["timestamp", "type", "duration_min", "notes"];

/// Session log at an explicit path.
#[derive(Debug, Clone)]
pub struct SessionLog {
    path: PathBuf,
}

impl SessionLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Append one record, writing the header first if the file is new or empty.
    ///
    /// # Errors
    /// Returns [`CoreError::LogWrite`] on any I/O or encoding failure. Nothing
    /// is retried.
    pub fn append(&self, record: &SessionRecord) -> Result<()> {
        let write_err = |source: csv::Error| CoreError::LogWrite {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| write_err(e.into()))?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| write_err(e.into()))?;
        let needs_header = file.metadata().map_err(|e| write_err(e.into()))?.len() == 0;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if needs_header {
            writer.write_record(HEADER).map_err(write_err)?;
        }
        writer
            .write_record([
                record.timestamp_string(),
                record.kind.clone(),
                format_minutes(record.duration_min),
                record.notes.clone(),
            ])
            .map_err(write_err)?;
        writer.flush().map_err(|e| write_err(e.into()))?;

        tracing::debug!(path = %self.path.display(), kind = %record.kind, "session logged");
        Ok(())
    }

    /// Every record in file order. A missing file is an empty log.
    pub fn read_all(&self) -> Result<Vec<SessionRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let read_err = |source: csv::Error| CoreError::LogRead {
            path: self.path.clone(),
            source,
        };

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(&self.path)
            .map_err(read_err)?;

        let mut records = Vec::new();
        for row in reader.records() {
            let row = match row {
                Ok(row) => row,
                Err(e) if e.is_io_error() => return Err(read_err(e)),
                Err(e) => {
                    tracing::warn!(
                        path = %self.path.display(),
                        line = e.position().map(|p| p.line()),
                        error = %e,
                        "skipping undecodable log row"
                    );
                    continue;
                }
            };
            match parse_row(&row) {
                Some(record) => records.push(record),
                None => tracing::warn!(
                    path = %self.path.display(),
                    line = row.position().map(|p| p.line()),
                    "skipping malformed log row"
                ),
            }
        }
        Ok(records)
    }

    /// The last `n` records, oldest first.
    pub fn recent(&self, n: usize) -> Result<Vec<SessionRecord>> {
        let mut all = self.read_all()?;
        let skip = all.len().saturating_sub(n);
        Ok(all.split_off(skip))
    }
}

fn parse_row(row: &csv::StringRecord) -> Option<SessionRecord> {
    let timestamp = NaiveDateTime::parse_from_str(row.get(0)?.trim(), TIMESTAMP_FORMAT).ok()?;
    let kind = row.get(1)?.to_string();
    let duration_min = row.get(2)?.trim().parse::<f64>().ok()?;
    let notes = row.get(3).unwrap_or_default().to_string();
    Some(SessionRecord {
        timestamp,
        kind,
        duration_min,
        notes,
    })
}

/// Whole minutes without a trailing `.0`, fractions at full precision.
pub fn format_minutes(minutes: f64) -> String {
    format!("{minutes}")
}
