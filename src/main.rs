//! Quill CLI entry point

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod settings;

#[derive(Parser)]
#[command(name = "quill")]
#[command(about = "Hierarchical key index and incremental autocomplete", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Project root path (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    root: PathBuf,

    /// Config file (defaults to <root>/quill.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory of table files to index instead of the snapshot
    #[arg(long, global = true)]
    tables: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the index and report what was inserted
    Index {
        /// Write the index snapshot under .quill/
        #[arg(short, long)]
        save: bool,
    },
    /// Print the symbol tree outline
    Tree {
        /// Maximum depth to print
        #[arg(short, long)]
        depth: Option<usize>,
    },
    /// List completions for the path before a trigger
    Complete {
        word: String,
    },
    /// Show the tag text for a key
    Define {
        word: String,
    },
    /// Replay a key script against an in-memory buffer
    Simulate {
        /// Initial buffer text, caret at the end
        #[arg(long, default_value = "")]
        text: String,

        /// Keys to replay, e.g. "table<ctrl+_>1<enter>"
        #[arg(long)]
        keys: String,
    },
    /// Clear the cache
    Clear,
    /// Show version
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!("quill={}", log_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!("Quill v{}", env!("CARGO_PKG_VERSION"));
    tracing::debug!("Project root: {}", cli.root.display());

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| cli.root.join(settings::CONFIG_FILE));
    let settings = settings::Settings::load(&config_path)?;
    let ctx = commands::Context::new(cli.root, settings, cli.tables);

    match cli.command {
        Commands::Index { save } => commands::index(&ctx, save),
        Commands::Tree { depth } => commands::tree(&ctx, depth),
        Commands::Complete { word } => commands::complete(&ctx, &word),
        Commands::Define { word } => commands::define(&ctx, &word),
        Commands::Simulate { text, keys } => commands::simulate(&ctx, &text, &keys),
        Commands::Clear => commands::clear(&ctx),
        Commands::Version => {
            println!("Quill v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
