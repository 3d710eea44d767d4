use clap::Args;

use calm_core::storage::log::format_minutes;
use calm_core::{LogStats, SessionRecord};

use crate::context::AppContext;
use crate::terminal::{self, rule};

/// Entries shown by the menu's log view.
pub const DEFAULT_LIMIT: usize = 20;

#[derive(Args)]
pub struct LogArgs {
    /// Number of most recent entries to show
    #[arg(long, short = 'n', default_value_t = DEFAULT_LIMIT)]
    pub limit: usize,
    /// Print entries as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct StatsArgs {
    /// Print statistics as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run_log(ctx: &AppContext, args: LogArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.json {
        let records = ctx.log.recent(args.limit)?;
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }
    show_log(ctx, args.limit)
}

/// Table of the most recent sessions.
pub fn show_log(ctx: &AppContext, limit: usize) -> Result<(), Box<dyn std::error::Error>> {
    if !ctx.log.exists() {
        println!(
            "No log found yet. Your sessions will be saved to {}",
            ctx.log.path().display()
        );
        return Ok(());
    }

    terminal::print_centered("Meditation Log");
    println!("{}", rule('-'));
    let records = ctx.log.recent(limit)?;
    if records.is_empty() {
        println!("No sessions logged yet.");
    } else {
        for record in &records {
            println!("{}", format_row(record));
        }
    }
    println!("{}", rule('-'));
    Ok(())
}

fn format_row(record: &SessionRecord) -> String {
    let kind: String = record.kind.chars().take(20).collect();
    format!(
        "{:20} | {:20} | {:>5} min | {}",
        record.timestamp_string(),
        kind,
        format_minutes(record.duration_min),
        record.notes
    )
}

pub fn run_stats(ctx: &AppContext, args: StatsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let records = ctx.log.read_all()?;
    let stats = LogStats::from_records(&records, chrono::Local::now().date_naive());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("Sessions:       {}", stats.total_sessions);
    println!("Minutes:        {:.1}", stats.total_minutes);
    println!("Today:          {} sessions, {:.1} min", stats.today_sessions, stats.today_minutes);
    if !stats.by_kind.is_empty() {
        println!("{}", rule('-'));
        for (kind, totals) in &stats.by_kind {
            println!("{:20} | {:>4} | {:>8.1} min", kind, totals.sessions, totals.minutes);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn row_truncates_long_kind_labels() {
        let record = SessionRecord {
            timestamp: NaiveDate::from_ymd_opt(2025, 1, 1)
                .unwrap()
                .and_hms_opt(6, 0, 0)
                .unwrap(),
            kind: "A very long session label indeed".into(),
            duration_min: 5.0,
            notes: "ok".into(),
        };
        assert_eq!(
            format_row(&record),
            "2025-01-01 06:00:00  | A very long session  |     5 min | ok"
        );
    }
}
