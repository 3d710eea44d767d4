use std::path::PathBuf;

use clap::{Parser, Subcommand};

use calm_core::{Config, CoreError};

mod commands;
mod context;
mod interrupt;
mod terminal;

use context::AppContext;

#[derive(Parser)]
#[command(name = "calm", version, about = "Calm — terminal meditation timer")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Session log to use instead of the configured one
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Note stored with the session record
    #[arg(long, global = true)]
    note: Option<String>,

    /// Show debug diagnostics on stderr
    #[arg(long, short, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only show errors on stderr
    #[arg(long, short, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Guided meditation with timed prompts
    Guided(commands::session::GuidedArgs),
    /// Silent countdown timer
    Timer(commands::session::TimerArgs),
    /// Box breathing exercise
    Box(commands::session::BoxArgs),
    /// Body-scan meditation
    BodyScan(commands::session::BodyScanArgs),
    /// Show recent sessions
    Log(commands::log::LogArgs),
    /// Session statistics
    Stats(commands::log::StatsArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing(quiet: bool, verbose: bool) {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("CALM_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    // Config commands run without a session log.
    let command = match cli.command {
        Some(Commands::Config { action }) => return commands::config::run(action),
        other => other,
    };

    let config = Config::load()?;
    let ctx = AppContext::init(config, cli.log_file, cli.note)?;

    match command {
        None => commands::menu::run(&ctx),
        Some(Commands::Guided(args)) => commands::session::run_guided(&ctx, args),
        Some(Commands::Timer(args)) => commands::session::run_timer(&ctx, args),
        Some(Commands::Box(args)) => commands::session::run_box(&ctx, args),
        Some(Commands::BodyScan(args)) => commands::session::run_body_scan(&ctx, args),
        Some(Commands::Log(args)) => commands::log::run_log(&ctx, args),
        Some(Commands::Stats(args)) => commands::log::run_stats(&ctx, args),
        Some(Commands::Config { .. }) => Ok(()),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose);

    if let Err(e) = run(cli) {
        let interrupted = e
            .downcast_ref::<CoreError>()
            .is_some_and(CoreError::is_interrupted);
        if interrupted {
            println!("\n\n{}", interrupt::FAREWELL);
            std::process::exit(130);
        }
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
