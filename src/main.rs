//! InternSight CLI
//!
//! Interactive client for the InternSight backend.
//!
//! Logging goes to stderr; `RUST_LOG` overrides the configured level.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use internsight::{
    generate_default_config, Config, ConfigSource, HttpBackend, LoggingConfig, Shell,
};
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "internsight")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Track internship applications and get AI career guidance")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file (default: search the usual locations)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Backend URL, overrides the config file
    #[arg(long, global = true)]
    api_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive shell (default)
    Shell,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Config { output }) = &cli.command {
        let content = generate_default_config();
        match output {
            Some(path) => {
                std::fs::write(path, content)
                    .with_context(|| format!("writing config to {:?}", path))?;
                println!("Config written to {:?}", path);
            }
            None => print!("{}", content),
        }
        return Ok(());
    }

    let (mut config, source) = match &cli.config {
        Some(path) => (Config::load_with_env(path)?, ConfigSource::file(path)),
        None => Config::load_default(),
    };
    if let Some(url) = cli.api_url {
        config.backend.url = url;
    }

    init_tracing(&config.logging);
    tracing::info!("InternSight v{}", env!("CARGO_PKG_VERSION"));
    source.log();
    tracing::info!("Backend: {}", config.backend.base_url());

    let backend = Arc::new(HttpBackend::new(&config).context("building HTTP client")?);
    let mut shell = Shell::new(backend, config.ui.clone());
    shell.run(BufReader::new(tokio::io::stdin())).await?;

    tracing::info!("Goodbye");
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("internsight={}", logging.level)));

    let registry = tracing_subscriber::registry().with(filter);
    if logging.is_json() {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
