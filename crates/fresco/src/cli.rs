//! Command-line interface for the fresco binary.

use clap::{Parser, Subcommand};
use fresco_core::{BusinessCategory, MonthKey};

/// Scheduled social-media content generation from a user's media library.
#[derive(Debug, Parser)]
#[command(name = "fresco", version, about)]
pub struct Cli {
    /// Emit JSON-formatted logs
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the content mix a business category gets for a post count
    Plan {
        /// Business category (ecommerce, service, restaurant, other)
        #[arg(long)]
        category: BusinessCategory,

        /// Number of posts to plan for
        #[arg(long, default_value_t = 10)]
        posts: usize,
    },

    /// Run a generation batch against the bundled demo library
    Generate {
        /// Owner id for the demo library
        #[arg(long, default_value = "demo")]
        owner: String,

        /// Target month key (e.g. "october_2025"); defaults to the current month
        #[arg(long)]
        month: Option<MonthKey>,

        /// Number of posts to generate
        #[arg(long, default_value_t = 5)]
        posts: usize,
    },
}
