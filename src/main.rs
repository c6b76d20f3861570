//! Thermal Guard CLI
//!
//! Runs the HTTP API (default), classifies a single image file, or writes an
//! untrained model record for smoke testing.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use thermal_guard::backend::{backend_name, default_device, InferenceBackend};
use thermal_guard::config::{ServerConfig, DEFAULT_HOST, DEFAULT_MODEL_PATH, DEFAULT_PORT};
use thermal_guard::inference::{BurnModelSource, Classifier};
use thermal_guard::model::{init_record, ThermalNetConfig};
use thermal_guard::server::{self, AppState};
use thermal_guard::utils::format_millis;
use thermal_guard::utils::logging::{init_logging, LogConfig, LogLevel};

/// Thermal Guard: fire risk detection from thermal images
#[derive(Parser, Debug)]
#[command(name = "thermal-guard")]
#[command(version)]
#[command(about = "Fire risk detection from thermal images", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, default_value = "false")]
    verbose: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "THERMAL_GUARD_LOG", default_value = "info")]
    log_level: String,

    /// Path to the model record
    #[arg(long, env = "THERMAL_GUARD_MODEL", default_value = DEFAULT_MODEL_PATH)]
    model: PathBuf,

    #[command(flatten)]
    listen: ListenArgs,

    /// Subcommand to execute (defaults to `serve`)
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args, Debug)]
struct ListenArgs {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Host to bind to
    #[arg(long, env = "THERMAL_GUARD_HOST", default_value = DEFAULT_HOST)]
    host: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API
    Serve,

    /// Classify a single image file and print the result as JSON
    Classify {
        /// Image to classify
        #[arg(short, long)]
        image: PathBuf,
    },

    /// Write a freshly initialized (untrained) model record
    InitModel {
        /// Output path (defaults to the configured model path)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_config = if cli.verbose {
        LogConfig::verbose()
    } else {
        LogConfig::default().with_level(cli.log_level.parse::<LogLevel>()?)
    };
    init_logging(&log_config)?;

    let config = ServerConfig {
        host: cli.listen.host,
        port: cli.listen.port,
        model_path: cli.model,
    };

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => cmd_serve(config).await,
        Commands::Classify { image } => cmd_classify(&config, &image),
        Commands::InitModel { output } => {
            cmd_init_model(output.as_deref().unwrap_or(config.model_path.as_path()))
        }
    }
}

async fn cmd_serve(config: ServerConfig) -> Result<()> {
    info!("Thermal Guard API v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration:");
    info!("  Listen:     {}:{}", config.host, config.port);
    info!("  Model path: {:?}", config.model_path);
    info!("  Backend:    {}", backend_name());

    let addr = config.socket_addr()?;
    let classifier = Classifier::new(BurnModelSource::new(config.model_path.clone()));
    let state = Arc::new(AppState::new(classifier));

    let warm_state = Arc::clone(&state);
    let loaded = tokio::task::spawn_blocking(move || server::warm_up(&warm_state.classifier))
        .await
        .context("model warm-up task failed")?;
    if loaded {
        info!("Model ready");
    }

    let app = server::router(state);

    info!("Starting server on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn cmd_classify(config: &ServerConfig, image: &Path) -> Result<()> {
    let classifier = Classifier::new(BurnModelSource::new(config.model_path.clone()));

    let start = Instant::now();
    let assessment = classifier
        .analyze_file(image)
        .with_context(|| format!("failed to classify {:?}", image))?;
    let elapsed = start.elapsed();

    let headline = format!("{} ({:.1}% confidence)", assessment.risk, assessment.confidence);
    match assessment.risk {
        thermal_guard::RiskLevel::Low => eprintln!("{}", headline.green().bold()),
        thermal_guard::RiskLevel::Medium => eprintln!("{}", headline.yellow().bold()),
        thermal_guard::RiskLevel::High => eprintln!("{}", headline.red().bold()),
    }
    eprintln!("  Analyzed in {}", format_millis(elapsed));

    println!("{}", serde_json::to_string_pretty(&assessment)?);
    Ok(())
}

fn cmd_init_model(output: &Path) -> Result<()> {
    let written =
        init_record::<InferenceBackend>(output, &ThermalNetConfig::new(), &default_device())?;

    println!(
        "{} Wrote untrained model record to {:?}",
        "✓".green().bold(),
        written
    );
    println!("  Predictions from this record are not meaningful; replace it with trained weights.");
    Ok(())
}
