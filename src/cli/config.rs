use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "autofill-detection",
    version,
    about = "Detect login forms in view-tree snapshots and plan credential fill/save"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: autofill-detection.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a fill plan for a view-tree snapshot
    Fill {
        /// Path to the JSON view-tree snapshot
        #[arg(long)]
        tree: String,

        /// Requesting package or origin
        #[arg(long)]
        origin: String,

        /// YAML credential store to look up matches in
        #[arg(long)]
        store: Option<String>,

        /// Append a JSONL trace record to this file
        #[arg(long)]
        trace: Option<String>,
    },

    /// Build a save plan and read back submitted credentials
    Save {
        /// Path to the JSON view-tree snapshot, including field values
        #[arg(long)]
        tree: String,

        /// Requesting package or origin
        #[arg(long)]
        origin: String,

        /// YAML credential store to persist into; created if missing
        #[arg(long)]
        store: Option<String>,

        /// Append a JSONL trace record to this file
        #[arg(long)]
        trace: Option<String>,
    },

    /// List every login-relevant field the classifier finds
    Inspect {
        /// Path to the JSON view-tree snapshot
        #[arg(long)]
        tree: String,
    },
}

// ============================================================================
// Logging
// ============================================================================

pub fn log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// `RUST_LOG` wins over `-v` when set.
pub fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level(verbose)));

    let result = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();

    if let Err(e) = result {
        eprintln!("Warning: logging already initialized: {}", e);
    }
}
