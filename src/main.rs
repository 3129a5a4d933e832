// Main entrypoint for the stripemap contention workload.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info, warn};

use stripemap::config::{Config, ConfigTrait};
use stripemap::workload;

const CONFIG_PATH: &str = "cfg/stripemap.cfg.yaml";
const CONFIG_PATH_LOCAL: &str = "cfg/stripemap.cfg.local.yaml";

/// stripemap - run concurrent updates against lock-striped maps of different widths
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Custom config file path
    #[arg(short, long, value_name = "FILE")]
    cfg: Option<PathBuf>,

    /// Shard counts to run against (overrides workload.shard_counts)
    #[arg(short, long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    shards: Vec<u64>,
}

/// Loads the configuration struct from YAML file.
/// Tries local config first, then falls back to default config.
fn load_cfg(path: Option<PathBuf>) -> Result<Config> {
    if let Some(custom_path) = path {
        let cfg = Config::load(&custom_path)
            .with_context(|| format!("failed to load custom config from {:?}", custom_path))?;
        info!(
            component = "config",
            event = "load_success",
            path = ?custom_path,
            "config loaded"
        );
        return Ok(cfg);
    }

    match Config::load(PathBuf::from(CONFIG_PATH_LOCAL)) {
        Ok(cfg) => {
            info!(
                component = "config",
                event = "load_success",
                path = CONFIG_PATH_LOCAL,
                "config loaded"
            );
            Ok(cfg)
        }
        Err(_) => {
            let cfg = Config::load(PathBuf::from(CONFIG_PATH))
                .with_context(|| format!("failed to load config from {}", CONFIG_PATH))?;
            info!(
                component = "config",
                event = "load_success",
                path = CONFIG_PATH,
                "config loaded"
            );
            Ok(cfg)
        }
    }
}

/// Configures structured logging based on configuration.
fn configure_logger(cfg: &Config) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let log_level = cfg
        .logs()
        .and_then(|logs| logs.level.as_deref())
        .unwrap_or("info");

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    if cfg.is_prod() {
        // Production: JSON format
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        // Development: Pretty console format
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().pretty())
            .init();
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let cfg = load_cfg(args.cfg)?;

    // Configure logger (must be done after config is loaded)
    configure_logger(&cfg);

    let params = cfg.params();
    let shard_counts: Vec<usize> = if args.shards.is_empty() {
        cfg.shard_counts()
    } else {
        args.shards.iter().map(|&n| n as usize).collect()
    };

    if cfg.workload().is_none() {
        warn!(
            component = "main",
            event = "workload_defaults",
            threads = params.threads,
            keys = params.keys,
            passes = params.passes,
            "no workload configured, using defaults"
        );
    }

    for shards in shard_counts {
        let report = workload::run(shards, &params).map_err(|e| {
            error!(
                component = "main",
                event = "verify_failed",
                shards = shards,
                error = %e,
                "concurrent updates produced a wrong snapshot"
            );
            e
        })?;

        info!(
            component = "main",
            event = "report",
            shards = report.shards,
            entries = report.entries,
            elapsed = %humantime::format_duration(report.elapsed),
            "{} locks",
            report.shards
        );
    }

    Ok(())
}
