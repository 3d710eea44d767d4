//! Integration tests: sessions run to completion (or not) and what reaches the log.

use std::time::Duration;

use calm_core::clock::{AbortSignal, Clock, ManualClock};
use calm_core::scripts;
use calm_core::{
    run_session, BoxBreathingDriver, BoxBreathingSpec, CueScript, MemoryOutput, SessionEngine,
    SessionKind, SessionLog, SessionSpec,
};
use chrono::Local;

/// Manual clock that raises an abort after a number of sleeps.
struct InterruptAfter {
    clock: ManualClock,
    abort: AbortSignal,
    sleeps: usize,
}

impl Clock for InterruptAfter {
    fn now(&self) -> Duration {
        self.clock.now()
    }

    fn sleep(&self, d: Duration) {
        self.clock.sleep(d);
        if self.clock.sleep_count() == self.sleeps {
            self.abort.raise();
        }
    }
}

fn row_count(log: &SessionLog) -> usize {
    log.read_all().unwrap().len()
}

#[test]
fn completed_guided_session_logs_exactly_one_record() {
    let dir = tempfile::tempdir().unwrap();
    let log = SessionLog::new(dir.path().join("meditation_log.csv"));
    let before = Local::now().naive_local();

    let clock = ManualClock::new();
    let mut out = MemoryOutput::new();
    let mut engine = SessionEngine::new(scripts::guided(5).unwrap());
    let completion = run_session(&mut engine, &clock, &mut out, &AbortSignal::new()).unwrap();
    log.append(&completion.into_record("")).unwrap();

    let records = log.read_all().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].kind, "Guided 5 min");
    assert_eq!(records[0].duration_min, 300.0 / 60.0);
    // Stored at second precision, so compare against the truncated start.
    assert!(records[0].timestamp >= before - chrono::Duration::nanoseconds(999_999_999));

    assert_eq!(out.cues().len(), 7);
    assert_eq!(out.bell_count(), 2);
}

#[test]
fn scripted_scenario_through_the_runner() {
    let script = CueScript::from_secs(&[(0, "A"), (5, "B"), (5, "C"), (10, "D")]).unwrap();
    let spec = SessionSpec::new(SessionKind::Guided, 10.0, Some(script), "Guided").unwrap();
    let clock = ManualClock::new();
    let mut out = MemoryOutput::new();
    let mut engine = SessionEngine::new(spec);

    run_session(&mut engine, &clock, &mut out, &AbortSignal::new()).unwrap();
    assert_eq!(out.cues(), ["A", "B", "C", "D"]);
    assert_eq!(engine.progress(&clock).countdown(), "00:00");
}

#[test]
fn box_breathing_logs_fractional_minutes() {
    let dir = tempfile::tempdir().unwrap();
    let log = SessionLog::new(dir.path().join("meditation_log.csv"));

    let clock = ManualClock::new();
    let mut out = MemoryOutput::new();
    let mut driver = BoxBreathingDriver::new(BoxBreathingSpec::new(2, 4, 4, 4).unwrap());
    let completion = run_session(&mut driver, &clock, &mut out, &AbortSignal::new()).unwrap();
    log.append(&completion.into_record("")).unwrap();

    let records = log.read_all().unwrap();
    assert_eq!(records[0].kind, "Box breathing");
    assert!((records[0].duration_min - 0.533).abs() < 0.001);
}

#[test]
fn interrupted_session_appends_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let log = SessionLog::new(dir.path().join("meditation_log.csv"));
    log.append(
        &calm_core::SessionRecord {
            timestamp: Local::now().naive_local(),
            kind: "Custom timer".into(),
            duration_min: 1.0,
            notes: String::new(),
        },
    )
    .unwrap();
    let before = row_count(&log);

    let abort = AbortSignal::new();
    let clock = InterruptAfter {
        clock: ManualClock::new(),
        abort: abort.clone(),
        sleeps: 3,
    };
    let mut out = MemoryOutput::new();
    let mut engine = SessionEngine::new(scripts::custom_timer(1.0).unwrap());

    let err = run_session(&mut engine, &clock, &mut out, &abort).unwrap_err();
    assert!(err.is_interrupted());
    assert_eq!(out.bell_count(), 1);
    assert_eq!(row_count(&log), before);
}

#[test]
fn invalid_parameters_never_reach_an_engine() {
    assert!(scripts::custom_timer(0.0).is_err());
    assert!(SessionSpec::new(SessionKind::CustomTimer, -5.0, None, "Custom timer").is_err());
    assert!(BoxBreathingSpec::new(2, 4, 0, 4).is_err());
}

#[test]
fn body_scan_walks_every_part_in_order() {
    let clock = ManualClock::new();
    let mut out = MemoryOutput::new();
    let mut engine = SessionEngine::new(scripts::body_scan(1).unwrap());
    run_session(&mut engine, &clock, &mut out, &AbortSignal::new()).unwrap();

    let cues = out.cues();
    assert_eq!(cues.len(), scripts::BODY_PARTS.len());
    assert!(cues[0].contains("top of the head"));
    assert!(cues[9].contains("feet and toes"));
    assert!(out.redraws().iter().any(|l| l.starts_with("Part 10/10:")));
}
