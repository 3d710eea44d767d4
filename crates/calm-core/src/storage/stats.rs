//! Totals over the session log.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::session::SessionRecord;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct KindTotals {
    pub sessions: u64,
    pub minutes: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LogStats {
    pub total_sessions: u64,
    pub total_minutes: f64,
    pub today_sessions: u64,
    pub today_minutes: f64,
    /// Keyed by the logged `type` label.
    pub by_kind: BTreeMap<String, KindTotals>,
}

impl LogStats {
    pub fn from_records(records: &[SessionRecord], today: NaiveDate) -> Self {
        let mut stats = LogStats::default();
        for record in records {
            stats.total_sessions += 1;
            stats.total_minutes += record.duration_min;
            if record.timestamp.date() == today {
                stats.today_sessions += 1;
                stats.today_minutes += record.duration_min;
            }
            let entry = stats.by_kind.entry(record.kind.clone()).or_default();
            entry.sessions += 1;
            entry.minutes += record.duration_min;
        }
        stats
    }
}
