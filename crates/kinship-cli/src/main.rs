//! kinship CLI: validate, project and render family documents.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kinship_core::KinshipConfig;

mod commands;
mod render;

use commands::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "kinship")]
#[command(author, version, about = "Family tree graph and layout tool", long_about = None)]
struct Cli {
    /// TOML configuration file (layout spacing, adapter, logging).
    #[arg(long, global = true, env = "KINSHIP_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Load a family document and report what it contains.
    Validate {
        /// Path to the JSON family document.
        file: PathBuf,
    },

    /// Print the positioned layout seen from a root person.
    Project {
        /// Path to the JSON family document.
        file: PathBuf,

        /// Id of the root person.
        #[arg(long)]
        root: String,

        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Draw the tree as text, then apply node clicks in order.
    Render {
        /// Path to the JSON family document.
        file: PathBuf,

        /// Id of the initial root person.
        #[arg(long)]
        root: String,

        /// Person to click after the first frame (repeatable).
        #[arg(long = "click")]
        clicks: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = KinshipConfig::load(cli.config.as_deref()).context("loading configuration")?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.logging.level.clone()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Validate { file } => commands::cmd_validate(&file),
        Commands::Project { file, root, format } => {
            commands::cmd_project(&file, &root, format, &config)
        }
        Commands::Render {
            file,
            root,
            clicks,
        } => commands::cmd_render(&file, &root, &clicks, &config),
    }
}
