use clap::Args;

use calm_core::input::{parse_count_or, parse_minutes, parse_minutes_or};
use calm_core::scripts::{self, DEFAULT_BODY_SCAN_MINUTES};
use calm_core::{
    run_session, BoxBreathingDriver, BoxBreathingSpec, CoreError, SessionCompletion,
    SessionEngine, SessionRecord, SessionSpec, SystemClock,
};

use crate::context::AppContext;
use crate::terminal::{self, TerminalOutput};

type CmdResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Args)]
pub struct GuidedArgs {
    /// Session length: 5, 10 or 15 minutes
    #[arg(long, short, default_value_t = 5)]
    pub minutes: u32,
}

#[derive(Args)]
pub struct TimerArgs {
    /// Length in minutes, fractions allowed (e.g. 7.5)
    #[arg(long, short, allow_hyphen_values = true)]
    pub minutes: String,
}

#[derive(Args)]
pub struct BoxArgs {
    /// Number of full cycles
    #[arg(long, allow_hyphen_values = true)]
    pub cycles: Option<String>,
    /// Inhale seconds
    #[arg(long, allow_hyphen_values = true)]
    pub inhale: Option<String>,
    /// Hold seconds (used after inhale and after exhale)
    #[arg(long, allow_hyphen_values = true)]
    pub hold: Option<String>,
    /// Exhale seconds
    #[arg(long, allow_hyphen_values = true)]
    pub exhale: Option<String>,
}

#[derive(Args)]
pub struct BodyScanArgs {
    /// Length in minutes (whole minutes, default 10)
    #[arg(long, short, allow_hyphen_values = true)]
    pub minutes: Option<String>,
}

pub fn run_guided(ctx: &AppContext, args: GuidedArgs) -> CmdResult<()> {
    let spec = scripts::guided(args.minutes)?;
    run_countdown(ctx, spec, None)?;
    Ok(())
}

pub fn run_timer(ctx: &AppContext, args: TimerArgs) -> CmdResult<()> {
    let spec = timer_spec(&args.minutes)?;
    let intro = timer_intro(&spec);
    run_countdown(ctx, spec, Some(intro))?;
    Ok(())
}

pub fn run_box(ctx: &AppContext, args: BoxArgs) -> CmdResult<()> {
    let defaults = &ctx.config.box_breathing;
    let field = |name: &str, value: &Option<String>, default: u32| {
        parse_count_or(name, value.as_deref().unwrap_or(""), default)
    };
    let spec = BoxBreathingSpec::new(
        field("cycles", &args.cycles, defaults.cycles)?,
        field("inhale", &args.inhale, defaults.inhale)?,
        field("hold", &args.hold, defaults.hold)?,
        field("exhale", &args.exhale, defaults.exhale)?,
    )?;
    run_box_breathing(ctx, spec)?;
    Ok(())
}

pub fn run_body_scan(ctx: &AppContext, args: BodyScanArgs) -> CmdResult<()> {
    let spec = body_scan_spec(args.minutes.as_deref().unwrap_or(""))?;
    let intro = body_scan_intro(&spec);
    run_countdown(ctx, spec, Some(intro))?;
    Ok(())
}

// ── Shared with the interactive menu ────────────────────────────────

pub fn timer_spec(input: &str) -> Result<SessionSpec, CoreError> {
    let minutes = parse_minutes(input)?;
    Ok(scripts::custom_timer(minutes)?)
}

pub fn timer_intro(spec: &SessionSpec) -> String {
    format!(
        "Custom silent timer — {} minutes",
        calm_core::storage::log::format_minutes(spec.duration_minutes())
    )
}

/// Blank input means the default length; fractions are dropped.
pub fn body_scan_spec(input: &str) -> Result<SessionSpec, CoreError> {
    let minutes = parse_minutes_or(input, f64::from(DEFAULT_BODY_SCAN_MINUTES))?;
    Ok(scripts::body_scan(minutes.trunc() as u32)?)
}

pub fn body_scan_intro(spec: &SessionSpec) -> String {
    format!("Body-scan — {} minutes", spec.duration_minutes())
}

/// Run a countdown session and log it on completion.
pub fn run_countdown(
    ctx: &AppContext,
    spec: SessionSpec,
    intro: Option<String>,
) -> Result<SessionRecord, CoreError> {
    terminal::clear_screen(ctx.config.clear_screen);
    if let Some(intro) = intro {
        terminal::print_centered(&intro);
    }

    let mut engine = SessionEngine::new(spec).with_tick_interval(ctx.config.tick_interval());
    let mut out = TerminalOutput::new(ctx.config.bell.clone());
    let clock = SystemClock::new();
    let completion = ctx
        .interrupt
        .during_session(|abort| run_session(&mut engine, &clock, &mut out, abort))?;
    record(ctx, completion)
}

pub fn run_box_breathing(ctx: &AppContext, spec: BoxBreathingSpec) -> Result<SessionRecord, CoreError> {
    terminal::clear_screen(ctx.config.clear_screen);
    terminal::print_centered("Box Breathing Exercise");
    println!();

    let mut driver = BoxBreathingDriver::new(spec).with_settle(ctx.config.settle());
    let mut out = TerminalOutput::new(ctx.config.bell.clone());
    let clock = SystemClock::new();
    let completion = ctx
        .interrupt
        .during_session(|abort| run_session(&mut driver, &clock, &mut out, abort))?;
    record(ctx, completion)
}

fn record(ctx: &AppContext, completion: SessionCompletion) -> Result<SessionRecord, CoreError> {
    let record = completion.into_record(ctx.note.clone());
    ctx.log.append(&record)?;
    Ok(record)
}
