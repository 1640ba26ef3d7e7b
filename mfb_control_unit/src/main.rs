//! # MFB Control Unit
//!
//! Loads a plant configuration, runs the motor function block scan against
//! simulated drives and logs a per-equipment summary. `--dump` prints every
//! equipment's SCADA view as JSON after the run.

use clap::Parser;
use mfb_common::config::LogLevel;
use mfb_common::motor::scada::MotorScada;
use mfb_control_unit::config::{EquipmentKind, PlantConfig, load_config};
use mfb_control_unit::cycle::ScanRunner;
use serde::Serialize;
use std::path::PathBuf;
use std::process;
use tracing::{Level, error, info};
use tracing_subscriber::EnvFilter;

/// MFB Control Unit: motor function block scan
#[derive(Parser, Debug)]
#[command(name = "mfb_control_unit")]
#[command(author = "RTS007")]
#[command(version)]
#[command(about = "Scan-based motor and VSD function blocks against simulated drives")]
struct Args {
    /// Path to the plant configuration TOML.
    #[arg(default_value = "config/plant.toml")]
    config: PathBuf,

    /// Number of scans to execute (default: run until killed).
    #[arg(long, value_name = "N")]
    scans: Option<u64>,

    /// Run scans back to back instead of pacing to the scan time.
    #[arg(long)]
    no_pace: bool,

    /// Print every equipment's SCADA view as JSON after the run.
    #[arg(long)]
    dump: bool,

    /// Enable verbose logging (DEBUG level).
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format.
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct ScadaDump<'a> {
    name: &'a str,
    kind: EquipmentKind,
    scada: &'a MotorScada,
}

fn main() {
    let args = Args::parse();
    let loaded = load_config(&args.config);

    let level = match (&loaded, args.verbose) {
        (_, true) => LogLevel::Debug,
        (Ok(config), false) => config.shared.log_level,
        (Err(_), false) => LogLevel::Info,
    };
    setup_tracing(level, args.json);

    info!("MFB Control Unit v{} starting...", env!("CARGO_PKG_VERSION"));

    let result = loaded
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error>)
        .and_then(|config| run(&args, &config));
    if let Err(e) = result {
        error!("FATAL: {e}");
        process::exit(1);
    }

    info!("MFB Control Unit shutdown complete");
}

fn run(args: &Args, config: &PlantConfig) -> Result<(), Box<dyn std::error::Error>> {
    info!(
        "Config OK: station={}, scan_time={}ms, equipment={}",
        config.shared.station_name,
        config.scan.scan_time_ms,
        config.equipment.len(),
    );

    let mut runner = ScanRunner::new(config);
    let executed = runner.run(args.scans, !args.no_pace);

    let stats = runner.stats();
    info!(
        scans = executed,
        avg_us = stats.avg_scan_ns() / 1_000,
        max_us = stats.max_scan_ns / 1_000,
        overruns = stats.overruns,
        "scan summary"
    );

    for unit in runner.plant().units() {
        let core = unit.equipment.core();
        let feedback = &core.scada().feedback;
        info!(
            equipment = core.name(),
            state = ?core.state(),
            mode = ?core.mode(),
            running = feedback.running,
            priority = feedback.priority,
            run_hours = feedback.run_hours,
            speed = feedback.speed_feedback,
            "equipment status"
        );
    }

    if args.dump {
        for unit in runner.plant().units() {
            let dump = ScadaDump {
                name: unit.equipment.name(),
                kind: unit.equipment.kind(),
                scada: unit.equipment.scada(),
            };
            println!("{}", serde_json::to_string_pretty(&dump)?);
        }
    }

    Ok(())
}

/// Setup tracing subscriber for the configured level.
fn setup_tracing(level: LogLevel, json: bool) {
    let level = match level {
        LogLevel::Trace => Level::TRACE,
        LogLevel::Debug => Level::DEBUG,
        LogLevel::Info => Level::INFO,
        LogLevel::Warn => Level::WARN,
        LogLevel::Error => Level::ERROR,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .compact()
            .init();
    }
}
