//! phasewatch-validate - Replay a recorded poll trace through the estimators.
//!
//! Usage: phasewatch-validate <trace.jsonl> [--config <file>] [--user] [--json] [--summary]
//!
//! Without `--config`, builtin and custom definition directories are merged.
//! Output is one line per frame (or only the last frame with `--summary`).

mod replay;
mod trace;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use phasewatch_core::config::{self, ConfigError};
use phasewatch_core::CastState;
use phasewatch_types::EstimatorConfig;
use phasewatch_types::formatting::{format_countdown, format_progress, format_secs};
use tracing_subscriber::filter::EnvFilter;

use replay::{FrameReport, Replay};

#[derive(Parser)]
#[command(version, about = "Replay a recorded poll trace through the phase estimators")]
struct Cli {
    /// JSON-lines trace file
    trace: PathBuf,

    /// Estimator config (TOML). Defaults to builtin + custom definitions.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Emit JSON lines instead of text
    #[arg(long)]
    json: bool,

    /// Print only the final frame
    #[arg(long)]
    summary: bool,

    /// Merge the per-user config (created with defaults if missing)
    #[arg(long)]
    user: bool,

    /// Use `,` as the decimal separator
    #[arg(long)]
    european: bool,
}

fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    // If PHASEWATCH_LOG_PATH is set, append to that file
    if let Ok(path) = std::env::var("PHASEWATCH_LOG_PATH")
        && let Ok(file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
    {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_ansi(false)
            .with_writer(file)
            .init();
        return;
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<EstimatorConfig, ConfigError> {
    let mut loaded = match &cli.config {
        Some(path) => config::load_file(path)?,
        None => config::load_definitions(
            config::default_builtin_dir().as_deref(),
            config::default_custom_dir().as_deref(),
        )?,
    };

    if cli.user {
        let replaced = config::merge(&mut loaded, config::load_user_config()?);
        if !replaced.is_empty() {
            tracing::info!(?replaced, "User config overrides cooldowns");
        }
    }

    Ok(loaded)
}

fn state_name(state: CastState) -> &'static str {
    match state {
        CastState::Idle => "idle",
        CastState::Charging => "charging",
        CastState::Overridden(_) => "overridden",
    }
}

fn print_text(report: &FrameReport, european: bool) {
    if report.skipped {
        println!("t={} (no subject)", format_secs(report.t, 3, european));
        return;
    }

    let mut line = format!(
        "t={} tick={} next={} progress={}",
        format_secs(report.t, 3, european),
        format_secs(report.tick.last_tick, 3, european),
        format_secs(report.tick.next_tick, 3, european),
        format_progress(report.tick.progress, european),
    );
    for cd in &report.cooldowns {
        line.push_str(&format!(
            " | {} {} {} charges={}",
            cd.id,
            state_name(cd.view.state),
            format_countdown(cd.view.remaining, "s", "ready", european),
            cd.view.charges,
        ));
        if let Some(label) = &cd.view.label {
            line.push_str(&format!(" [{}]", label));
        }
    }
    println!("{}", line);
}

fn print_report(report: &FrameReport, cli: &Cli) {
    if cli.json {
        match serde_json::to_string(report) {
            Ok(json) => println!("{}", json),
            Err(e) => tracing::error!(error = %e, "Failed to serialize report"),
        }
    } else {
        print_text(report, cli.european);
    }
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load config");
            return ExitCode::FAILURE;
        }
    };

    let frames = match trace::read_trace(&cli.trace) {
        Ok(frames) => frames,
        Err(e) => {
            tracing::error!(error = %e, "Failed to read trace");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        frames = frames.len(),
        cooldowns = config.cooldowns.len(),
        resource = config.tick.resource.label(),
        "Replaying trace"
    );

    let mut replay = Replay::new(&config);
    let mut last = None;
    for frame in &frames {
        let report = replay.step(frame);
        if !cli.summary {
            print_report(&report, &cli);
        }
        last = Some(report);
    }

    if cli.summary
        && let Some(report) = &last
    {
        print_report(report, &cli);
    }

    replay.dispose();
    ExitCode::SUCCESS
}
