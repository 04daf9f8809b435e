//! zscore-signal - replay recorded tick/minute events through the engine

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};

use zscore_signal::adapters::cli::{CheckConfigCmd, CliApp, Command, ReplayCmd};
use zscore_signal::adapters::{replay_file, ConsoleSink};
use zscore_signal::application::EventDriver;
use zscore_signal::config::{load_config, Config};
use zscore_signal::strategy::EngineParams;

fn main() -> Result<()> {
    // Load .env file if it exists (RUST_LOG may be set there)
    dotenvy::dotenv().ok();

    let app = CliApp::parse();

    match app.command {
        Command::Replay(cmd) => replay_command(cmd, app.verbose, app.debug),
        Command::CheckConfig(cmd) => check_config_command(cmd, app.verbose, app.debug),
    }
}

/// `--debug` beats `--verbose`, which beats RUST_LOG, which beats the config level
fn init_logging(verbose: bool, debug: bool, config_level: Option<&str>) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else if verbose {
        EnvFilter::new("info")
    } else if let Ok(filter) = EnvFilter::try_from_default_env() {
        filter
    } else {
        EnvFilter::new(config_level.unwrap_or("warn"))
    };

    fmt().with_env_filter(filter).init();
}

fn expand_path(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).to_string())
}

fn load(path: &Path) -> Result<Config> {
    let path = expand_path(path);
    load_config(&path).with_context(|| format!("Failed to load configuration from {}", path.display()))
}

fn replay_command(cmd: ReplayCmd, verbose: bool, debug: bool) -> Result<()> {
    let config = load(&cmd.config)?;
    init_logging(verbose, debug, Some(&config.logging.level));

    let mut engine = config.build_engine().context("Failed to build engine from config")?;

    let mut params = EngineParams::from(&config);
    if let Some(threshold) = cmd.z_threshold {
        params = params.with_z_threshold(threshold);
    }
    if let Some(threshold) = cmd.z_close_threshold {
        params = params.with_close_threshold(threshold);
    }
    engine.configure(params);

    let events = expand_path(&cmd.events);
    tracing::info!("Replaying events from {}", events.display());

    let mut driver = EventDriver::new(engine, ConsoleSink::new());
    let stats = match replay_file(&events, &mut driver) {
        Ok(stats) => stats,
        Err(e) => {
            tracing::error!("Replay aborted: {}", e);
            return Err(e).with_context(|| format!("Replay of {} failed", events.display()));
        }
    };

    println!(
        "Replayed {} ticks, {} minutes: {} signals | final position {} | last signal {}",
        stats.ticks,
        stats.minutes,
        stats.transitions,
        driver.engine().position(),
        driver.engine().signal()
    );
    if let Some(ts) = stats.last_event_at {
        println!("Last event at {}", ts.to_rfc3339());
    }

    if cmd.json {
        let state = serde_json::to_string_pretty(driver.engine().state())
            .context("Failed to serialize engine state")?;
        println!("{}", state);
    }

    Ok(())
}

fn check_config_command(cmd: CheckConfigCmd, verbose: bool, debug: bool) -> Result<()> {
    let config = load(&cmd.config)?;
    init_logging(verbose, debug, Some(&config.logging.level));

    let engine = config.build_engine().context("Invalid seed values")?;
    let params = engine.params();

    println!("Configuration OK: {}", cmd.config.display());
    println!("  sma_window:        {}", params.sma_window);
    println!("  stdev_window:      {}", params.stdev_window);
    println!("  z_threshold:       {}", params.z_threshold);
    println!("  z_close_threshold: {}", params.z_close_threshold);
    println!(
        "  seed:              bid={} ask={} mid={} z={} mean={} stdev={} regime={}",
        engine.bid(),
        engine.ask(),
        engine.mid(),
        engine.deviation(),
        engine.mean(),
        engine.stdev(),
        engine.regime()
    );
    if !config.seed.position.is_flat() {
        println!("  note: seed position {} is ignored, engine starts FLAT", config.seed.position);
    }

    Ok(())
}
