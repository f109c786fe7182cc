//! sinistro-admin CLI entry point

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use sinistro_admin::{
    catalog::SqliteCatalog,
    commands::{cmd_init, cmd_serve, cmd_status, print_status},
    config::{Config, ConfigOverrides},
    error::Result,
};
use std::path::{Path, PathBuf};
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "sinistro-admin")]
#[command(version, about = "REST backend for claim procedure checklists", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server
    Serve {
        /// Address to bind
        #[arg(long, env = "HOST")]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,

        /// sqlx SQLite URL (defaults to database.db in the config directory)
        #[arg(long, env = "DATABASE_URL")]
        database_url: Option<String>,

        /// Do not seed the default catalog into an empty database
        #[arg(long)]
        no_seed: bool,
    },

    /// Write a default config file and create the database
    Init {
        /// Force overwrite existing config
        #[arg(long)]
        force: bool,
    },

    /// Show configuration and catalog row counts
    Status,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(
            cli.log_json
                .then(|| fmt::layer().json().with_writer(std::io::stderr)),
        )
        .with((!cli.log_json).then(|| fmt::layer().with_writer(std::io::stderr)))
        .with(filter)
        .init();

    match cli.command {
        Commands::Init { force } => handle_init(cli.config.as_deref(), force, cli.json).await,

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "sinistro-admin", &mut std::io::stdout());
            Ok(())
        }

        Commands::Serve {
            host,
            port,
            database_url,
            no_seed,
        } => {
            let mut config = load_config(cli.config.as_deref())?;
            config.apply_overrides(ConfigOverrides {
                host,
                port,
                database_url,
                seed: no_seed.then_some(false),
            })?;
            cmd_serve(&config).await
        }

        Commands::Status => {
            let config = load_config(cli.config.as_deref())?;
            let catalog = SqliteCatalog::connect(&config).await?;
            catalog.init_schema().await?;
            let status = cmd_status(&config, &catalog).await?;
            catalog.close().await;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&status)?);
            } else {
                print_status(&status);
            }
            Ok(())
        }
    }
}

async fn handle_init(config: Option<&Path>, force: bool, json: bool) -> Result<()> {
    // A .toml path names the config file; anything else is the base directory
    let base_dir = match config {
        Some(path) if path.extension().is_some_and(|e| e == "toml") => Some(
            path.parent()
                .map(PathBuf::from)
                .unwrap_or_else(Config::default_base_dir),
        ),
        Some(path) => Some(path.to_path_buf()),
        None => None,
    };

    let report = cmd_init(base_dir, force).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("✓ sinistro-admin initialized successfully");
    println!("  Config: {}", report.config_path.display());
    println!("  Database: {}", report.database_url);
    if report.seeded {
        println!("  Default catalog seeded");
    }
    println!("\nNext steps:");
    println!("  1. Edit the config file to customize settings");
    println!("  2. Start the API: sinistro-admin serve");

    Ok(())
}

/// Explicit config paths must exist; otherwise fall back to defaults
fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None => Config::load_from(None),
    }
}
