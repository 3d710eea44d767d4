//! Interactive numeric menu.

use std::thread;
use std::time::Duration;

use calm_core::input::{parse_count_or, MenuChoice};
use calm_core::{scripts, BoxBreathingSpec, CoreError};

use super::log::{show_log, DEFAULT_LIMIT};
use super::session;
use crate::context::AppContext;
use crate::terminal::{self, print_centered, prompt, rule};

const FAREWELL: &str = "May you have a calm and peaceful day — goodbye.";

fn print_menu() {
    println!("{}", rule('='));
    print_centered("Calm CLI — Simple Meditation App");
    println!("{}", rule('='));
    println!("Choose an option:");
    println!(" 1) Guided — 5 minutes");
    println!(" 2) Guided — 10 minutes");
    println!(" 3) Guided — 15 minutes");
    println!(" 4) Custom silent timer");
    println!(" 5) Box breathing exercise");
    println!(" 6) Body-scan meditation (10 min default)");
    println!(" 7) View session log");
    println!(" 0) Exit");
    println!();
}

/// Loop until the user exits or input ends.
///
/// Only an interrupted session escapes as an error; anything else is shown
/// and the menu comes back.
pub fn run(ctx: &AppContext) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal::clear_screen(ctx.config.clear_screen);
        print_menu();
        let Some(choice) = prompt("Enter choice: ")? else {
            break;
        };

        let outcome = match MenuChoice::parse(&choice) {
            Some(MenuChoice::Guided(minutes)) => scripts::guided(minutes)
                .map_err(CoreError::from)
                .and_then(|spec| session::run_countdown(ctx, spec, None))
                .map(|_| ()),
            Some(MenuChoice::CustomTimer) => custom_timer(ctx),
            Some(MenuChoice::BoxBreathing) => box_breathing(ctx),
            Some(MenuChoice::BodyScan) => body_scan(ctx),
            Some(MenuChoice::ViewLog) => {
                terminal::clear_screen(ctx.config.clear_screen);
                if let Err(e) = show_log(ctx, DEFAULT_LIMIT) {
                    eprintln!("error: {e}");
                }
                terminal::pause()?;
                continue;
            }
            Some(MenuChoice::Exit) => break,
            None => {
                println!("Unknown choice. Try again.");
                thread::sleep(Duration::from_secs(1));
                continue;
            }
        };

        match outcome {
            Ok(()) => terminal::pause()?,
            Err(CoreError::Interrupted) => return Err(CoreError::Interrupted.into()),
            Err(CoreError::Validation(e)) => {
                println!("Invalid input: {e}");
                terminal::pause()?;
            }
            Err(e) => {
                eprintln!("error: {e}");
                terminal::pause()?;
            }
        }
    }

    terminal::clear_screen(ctx.config.clear_screen);
    print_centered(FAREWELL);
    Ok(())
}

fn ask(message: &str) -> Result<String, CoreError> {
    Ok(prompt(message)?.unwrap_or_default())
}

fn custom_timer(ctx: &AppContext) -> Result<(), CoreError> {
    let input = ask("Enter duration in minutes (e.g., 7.5): ")?;
    let spec = session::timer_spec(&input)?;
    let intro = session::timer_intro(&spec);
    session::run_countdown(ctx, spec, Some(intro)).map(|_| ())
}

fn box_breathing(ctx: &AppContext) -> Result<(), CoreError> {
    let defaults = &ctx.config.box_breathing;
    let count = |field: &str, label: &str, default: u32| -> Result<u32, CoreError> {
        let input = ask(&format!("{label} (default {default}): "))?;
        Ok(parse_count_or(field, &input, default)?)
    };
    let cycles = count("cycles", "Number of cycles", defaults.cycles)?;
    let inhale = count("inhale", "Inhale seconds", defaults.inhale)?;
    let hold = count("hold", "Hold seconds", defaults.hold)?;
    let exhale = count("exhale", "Exhale seconds", defaults.exhale)?;
    let spec = BoxBreathingSpec::new(cycles, inhale, hold, exhale).map_err(CoreError::from)?;
    session::run_box_breathing(ctx, spec).map(|_| ())
}

fn body_scan(ctx: &AppContext) -> Result<(), CoreError> {
    let input = ask(&format!(
        "Duration minutes (default {}): ",
        scripts::DEFAULT_BODY_SCAN_MINUTES
    ))?;
    let spec = session::body_scan_spec(&input)?;
    let intro = session::body_scan_intro(&spec);
    session::run_countdown(ctx, spec, Some(intro)).map(|_| ())
}
