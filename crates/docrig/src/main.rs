//! docrig CLI - Sphinx documentation as explicit build steps.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "docrig")]
#[command(about = "Build, clean and install Sphinx documentation")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to docrig.toml config file
    #[arg(short, long, default_value = "docrig.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default docrig.toml
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        yes: bool,
    },

    /// Report whether the documentation tool is installed
    Probe,

    /// Fail unless the documentation tool is installed
    Check,

    /// Build HTML documentation
    Build {
        /// Documentation source directory
        #[arg(short, long)]
        source: Option<PathBuf>,

        /// Build directory for staged sources and output
        #[arg(short, long)]
        build_dir: Option<PathBuf>,
    },

    /// Remove generated documentation
    Clean {
        /// Build directory to remove
        #[arg(short, long)]
        build_dir: Option<PathBuf>,
    },

    /// Install built documentation
    Install {
        /// Installation prefix
        #[arg(short, long)]
        prefix: Option<PathBuf>,

        /// Staging root prepended to the install destination
        #[arg(long)]
        destdir: Option<PathBuf>,

        /// Build directory holding the output
        #[arg(short, long)]
        build_dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    match cli.command {
        Commands::Init { yes } => {
            commands::init::run(&cli.config, yes).await?;
        }
        Commands::Probe => {
            let doc_config = config::load_config(&cli.config)?;
            commands::probe::run(&doc_config).await?;
        }
        Commands::Check => {
            let doc_config = config::load_config(&cli.config)?;
            commands::check::run(&doc_config)?;
        }
        Commands::Build { source, build_dir } => {
            let mut doc_config = config::load_config(&cli.config)?;
            if let Some(source) = source {
                doc_config.source_dir = source;
            }
            if let Some(build_dir) = build_dir {
                doc_config.build_dir = build_dir;
            }
            commands::build::run(doc_config).await?;
        }
        Commands::Clean { build_dir } => {
            let mut doc_config = config::load_config(&cli.config)?;
            if let Some(build_dir) = build_dir {
                doc_config.build_dir = build_dir;
            }
            commands::clean::run(&doc_config)?;
        }
        Commands::Install {
            prefix,
            destdir,
            build_dir,
        } => {
            let mut doc_config = config::load_config(&cli.config)?;
            if let Some(prefix) = prefix {
                doc_config.install_prefix = prefix;
            }
            if let Some(build_dir) = build_dir {
                doc_config.build_dir = build_dir;
            }
            commands::install::run(&doc_config, destdir.as_deref())?;
        }
    }

    Ok(())
}
