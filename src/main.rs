//! gridmix entry point: CLI wiring, logging, and server startup.

use std::path::Path;
use std::process;
use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use gridmix::api::{ApiServer, AppState};
use gridmix::config::ServiceConfig;
use gridmix::io::export::export_daily_csv;
use gridmix::mix::ChargingHours;
use gridmix::service;
use gridmix::source::{self, DataSource};

/// Parsed CLI arguments.
struct CliArgs {
    config_path: Option<String>,
    preset: Option<String>,
    port_override: Option<u16>,
    seed_override: Option<u64>,
    report: bool,
    hours: String,
    export_csv: Option<String>,
}

fn print_help() {
    eprintln!("gridmix: generation-mix summaries and clean charging windows");
    eprintln!();
    eprintln!("Usage: gridmix [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config <path>          Load service config from TOML file");
    eprintln!("  --preset <name>          Use a built-in preset (live, offline)");
    eprintln!("  --port <u16>             Override listening port");
    eprintln!("  --seed <u64>             Override sample source seed");
    eprintln!("  --report                 Print summaries once instead of serving");
    eprintln!("  --hours <1-6>            Charging window length for --report (default: 3)");
    eprintln!("  --export-csv <path>      With --report, write daily averages to CSV");
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("If no --config or --preset is given, the live preset is used.");
    eprintln!("Log verbosity follows RUST_LOG (default: gridmix=info).");
}

fn require_value(args: &[String], i: usize, flag: &str, what: &str) -> String {
    match args.get(i) {
        Some(v) => v.clone(),
        None => {
            eprintln!("error: {flag} requires {what}");
            process::exit(1);
        }
    }
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        config_path: None,
        preset: None,
        port_override: None,
        seed_override: None,
        report: false,
        hours: "3".to_string(),
        export_csv: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--config" => {
                i += 1;
                cli.config_path = Some(require_value(&args, i, "--config", "a path argument"));
            }
            "--preset" => {
                i += 1;
                cli.preset = Some(require_value(&args, i, "--preset", "a name argument"));
            }
            "--port" => {
                i += 1;
                let raw = require_value(&args, i, "--port", "a u16 argument");
                if let Ok(p) = raw.parse::<u16>() {
                    cli.port_override = Some(p);
                } else {
                    eprintln!("error: --port value \"{raw}\" is not a valid u16");
                    process::exit(1);
                }
            }
            "--seed" => {
                i += 1;
                let raw = require_value(&args, i, "--seed", "a u64 argument");
                if let Ok(s) = raw.parse::<u64>() {
                    cli.seed_override = Some(s);
                } else {
                    eprintln!("error: --seed value \"{raw}\" is not a valid u64");
                    process::exit(1);
                }
            }
            "--report" => {
                cli.report = true;
            }
            "--hours" => {
                i += 1;
                cli.hours = require_value(&args, i, "--hours", "an integer argument");
            }
            "--export-csv" => {
                i += 1;
                cli.export_csv = Some(require_value(&args, i, "--export-csv", "a path argument"));
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    if cli.config_path.is_some() && cli.preset.is_some() {
        eprintln!("error: --config and --preset are mutually exclusive");
        process::exit(1);
    }
    if cli.export_csv.is_some() && !cli.report {
        eprintln!("error: --export-csv requires --report");
        process::exit(1);
    }

    cli
}

fn load_config(cli: &CliArgs) -> ServiceConfig {
    // --config takes priority, then --preset, then the live default
    let loaded = if let Some(ref path) = cli.config_path {
        ServiceConfig::from_toml_file(Path::new(path))
    } else if let Some(ref name) = cli.preset {
        ServiceConfig::from_preset(name)
    } else {
        Ok(ServiceConfig::live())
    };
    let mut config = loaded.unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });

    if let Some(port) = cli.port_override {
        config.server.port = port;
    }
    if let Some(seed) = cli.seed_override {
        config.source.seed = seed;
    }

    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }
    config
}

/// One-shot mode: print both summaries and optionally export CSV.
async fn run_report(source: &dyn DataSource, cli: &CliArgs) -> Result<(), String> {
    let hours = ChargingHours::parse(Some(&cli.hours)).map_err(|e| format!("--hours: {e}"))?;
    let now = Utc::now();

    let summary = service::energy_mix_summary(source, now)
        .await
        .map_err(|e| e.to_string())?;
    println!("{summary}");

    match service::optimal_charging_window(source, now, hours).await {
        Ok(window) => println!("\nBest {hours}h charging window: {window}"),
        Err(e) => println!("\nNo {hours}h charging window: {e}"),
    }

    if let Some(ref path) = cli.export_csv {
        export_daily_csv(&summary.days, Path::new(path))
            .map_err(|e| format!("failed to write CSV: {e}"))?;
        info!(%path, "daily averages written");
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gridmix=info")),
        )
        .init();

    let cli = parse_args();
    let config = load_config(&cli);

    let source: Arc<dyn DataSource> = source::from_config(&config.source).unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });
    info!(source = source.name(), "data source ready");

    if cli.report {
        if let Err(e) = run_report(source.as_ref(), &cli).await {
            eprintln!("error: {e}");
            process::exit(1);
        }
        return;
    }

    // validate() already checked the host
    let addr = config.socket_addr().unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });
    let state = Arc::new(AppState::new(source));
    let server = ApiServer::bind(addr, state).await.unwrap_or_else(|e| {
        eprintln!("error: failed to bind to {addr}: {e}");
        process::exit(1);
    });
    if let Err(e) = server.serve_with_shutdown(shutdown_signal()).await {
        eprintln!("error: server error: {e}");
        process::exit(1);
    }
}
