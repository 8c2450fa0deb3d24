mod commands;
mod config;
mod notes;
mod pipeline;
mod render;
mod sanitize;
mod templates;
mod vault;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "notedir")]
#[command(about = "Sync upcoming calendar appointments into a linked markdown notes directory")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate notes for upcoming appointments
    Pull {
        /// Fetch from this date (YYYY-MM-DD, defaults to now)
        #[arg(long)]
        from: Option<String>,

        /// Fetch until this date (YYYY-MM-DD, defaults to from + window_days)
        #[arg(long)]
        to: Option<String>,

        /// Keep processing remaining appointments after one fails
        #[arg(long)]
        keep_going: bool,
    },
    /// Show what a pull would write, without writing
    Status {
        /// Fetch from this date (YYYY-MM-DD, defaults to now)
        #[arg(long)]
        from: Option<String>,

        /// Fetch until this date (YYYY-MM-DD, defaults to from + window_days)
        #[arg(long)]
        to: Option<String>,
    },
    /// Create the default config file and templates
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Pull {
            from,
            to,
            keep_going,
        } => commands::pull::run(from, to, keep_going).await,
        Commands::Status { from, to } => commands::status::run(from, to).await,
        Commands::Init => commands::init::run(),
    }
}
