//! Rare Disease Triage API - Main Entry Point

use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;
use std::process;
use tokio::signal;
use tracing::{error, info, warn};
use triage_api::config::ServiceConfig;
use triage_api::observability::init_default_logging;
use triage_api::triage::{predict_lenient, predict_values};
use triage_api::{TriageServer, SERVICE_INFO};

/// Deterministic rare-disease symptom triage
#[derive(Parser)]
#[command(name = "triage-api")]
#[command(about = "Rare disease triage HTTP service")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP service
    Serve {
        /// IP address to bind, overrides the config file
        #[arg(long)]
        host: Option<String>,
        /// Port to bind, overrides the config file
        #[arg(long, env = "TRIAGE_PORT")]
        port: Option<u16>,
    },
    /// Triage one set of measurements without starting the server
    Predict {
        #[arg(long, allow_negative_numbers = true)]
        fever: f64,
        #[arg(long, allow_negative_numbers = true)]
        pain: f64,
        #[arg(long, allow_negative_numbers = true)]
        days: f64,
        #[arg(long, allow_negative_numbers = true)]
        comorbidity: Option<f64>,
        #[arg(long, allow_negative_numbers = true)]
        age: Option<f64>,
    },
    /// Print the reference cases and their labels
    Demo,
    /// Validate configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_default_logging();

    let result = match cli.command {
        Commands::Serve { host, port } => run_server(cli.config, host, port).await,
        Commands::Predict {
            fever,
            pain,
            days,
            comorbidity,
            age,
        } => run_predict(fever, pain, days, comorbidity, age),
        Commands::Demo => run_demo(),
        Commands::Config { show } => handle_config_command(cli.config, show),
    };

    if let Err(e) = result {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn load_configuration(
    config_path: Option<PathBuf>,
) -> Result<ServiceConfig, Box<dyn std::error::Error>> {
    let (config, source) = ServiceConfig::discover(config_path.as_deref())?;
    match source {
        Some(path) => info!("Loaded configuration from: {}", path.display()),
        None => info!("No configuration file found, using defaults"),
    }
    Ok(config)
}

async fn run_server(
    config_path: Option<PathBuf>,
    host: Option<String>,
    port: Option<u16>,
) -> Result<(), Box<dyn std::error::Error>> {
    info!(
        "Starting {} v{}",
        SERVICE_INFO.name, SERVICE_INFO.version
    );

    let config = load_configuration(config_path)?.with_overrides(host, port)?;
    let server = TriageServer::new(config.server);
    server.run(shutdown_signal()).await?;

    info!("Application shutdown complete");
    Ok(())
}

/// Resolves on SIGINT or SIGTERM
async fn shutdown_signal() {
    let mut sigterm = match signal::unix::signal(signal::unix::SignalKind::terminate()) {
        Ok(sigterm) => sigterm,
        Err(e) => {
            warn!("Cannot listen for SIGTERM, only SIGINT will stop the server: {}", e);
            if let Err(e) = signal::ctrl_c().await {
                error!("Cannot listen for SIGINT: {}", e);
            }
            return;
        }
    };

    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Received SIGINT, shutting down gracefully...");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down gracefully...");
        }
    }
}

fn run_predict(
    fever: f64,
    pain: f64,
    days: f64,
    comorbidity: Option<f64>,
    age: Option<f64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let prediction = predict_values(fever, pain, days, comorbidity, age)?;
    println!("{}", serde_json::to_string_pretty(&prediction)?);
    Ok(())
}

fn run_demo() -> Result<(), Box<dyn std::error::Error>> {
    let cases = [
        json!({"fever": 0.5, "pain": 1, "days": 0}),
        json!({"fever": 2.0, "pain": 3, "days": 3}),
        json!({"fever": 6.0, "pain": 6, "days": 10, "comorbidity": 1}),
        json!({"fever": 4.0, "pain": 4, "days": 45}),
    ];

    for case in &cases {
        let prediction = predict_lenient(case)?;
        println!("{case} -> {}", prediction.status);
    }
    Ok(())
}

fn handle_config_command(
    config_path: Option<PathBuf>,
    show: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_configuration(config_path)?;

    if show {
        println!("{}", toml::to_string_pretty(&config)?);
    }

    info!("Configuration validation complete");
    Ok(())
}
