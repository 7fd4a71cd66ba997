use anyhow::Result;
use clap::Parser;

mod artists;
mod commands;

#[derive(Debug, Parser)]
#[command(name = "hitcast", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Harvest track metadata for the built-in artist list
    ///
    /// Runs the ingestion pipeline end-to-end:
    ///
    /// - Resolves each artist name to a catalog id (best match only)
    /// - Pages through every album and single of each resolved artist
    /// - Collects a deduplicated set of track ids
    /// - Fetches track details in batches of 50, with bounded retries
    /// - Writes the deduplicated table to raw_data.csv
    ///
    /// Requires Spotify client credentials; see `hitcast harvest` output
    /// for where to configure them. Page failures skip the affected
    /// artist or album and the harvest continues with partial results.
    Harvest,
    /// Train the popularity model on model_ready_data.csv
    ///
    /// Loads the externally feature-engineered table, fits a 100-tree
    /// random forest on an 80/20 split (fixed seed), prints MSE and R²,
    /// and writes a ranked feature-importance chart to
    /// feature_importance.png.
    Train,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Harvest => commands::run_harvest().await,
        Commands::Train => commands::run_train(),
    }
}
