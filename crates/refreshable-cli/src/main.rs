use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use refreshable_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "refreshable")]
#[command(author, version, about = "Pull-to-refresh for scrollable views")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to the configuration file
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the terminal demo
    Run,
    /// Replay one pull gesture without a terminal
    Simulate {
        /// Content offsets reported while dragging, in order
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
        offsets: Vec<f64>,
        /// Content offset when the drag begins
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        start: f64,
        /// Pull distance that commits a refresh (overrides config)
        #[arg(long)]
        threshold: Option<f64>,
        /// Seconds between release and the refresh callback (overrides config)
        #[arg(long)]
        delay: Option<f64>,
        /// Visible height of the simulated view
        #[arg(long, default_value_t = 800.0)]
        height: f64,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn env_filter(config: &AppConfig) -> EnvFilter {
    EnvFilter::new(std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()))
}

/// Log to stderr
fn init_logging(config: &AppConfig) {
    tracing_subscriber::registry()
        .with(env_filter(config))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

/// Log to `<data_dir>/refreshable.log`; the terminal belongs to the UI
fn init_file_logging(config: &AppConfig) -> Result<PathBuf> {
    fs::create_dir_all(config.data_dir())?;
    let log_path = config.log_path();
    let file = File::options().create(true).append(true).open(&log_path)?;

    tracing_subscriber::registry()
        .with(env_filter(config))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();

    Ok(log_path)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };

    match cli.command {
        Some(Commands::Run) | None => {
            let log_path = init_file_logging(&config)?;
            tracing::info!(log = %log_path.display(), "Starting terminal demo");
            commands::run::run(&config).await
        }
        Some(Commands::Simulate {
            offsets,
            start,
            threshold,
            delay,
            height,
            json,
        }) => {
            init_logging(&config);
            let options = commands::simulate::SimulateOptions {
                offsets,
                start,
                threshold,
                delay_secs: delay,
                view_height: height,
            };
            commands::simulate::run(&config, options, json)
        }
        Some(Commands::Config { action }) => {
            init_logging(&config);
            match action {
                ConfigAction::Show => commands::config::show(&config, cli.config.as_deref()),
                ConfigAction::Init { force } => commands::config::init(cli.config, force),
            }
        }
    }
}
