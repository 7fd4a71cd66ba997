use std::path::Path;

use anyhow::Result;

use hitcast_etl::config::{self, Config};
use hitcast_etl::{pipeline, SpotifyClient};

use crate::artists;

/// Output of the ingestion pipeline, overwritten on every run.
const RAW_DATA_PATH: &str = "raw_data.csv";

pub async fn run_harvest() -> Result<()> {
    let settings = Config::load()?;
    let credentials = match settings.credentials() {
        Ok(credentials) => credentials,
        Err(e) => {
            if config::ensure_config_file()? {
                log::info!(
                    "wrote an example config to {}",
                    config::config_file_path().display()
                );
            }
            return Err(e);
        }
    };

    let client = SpotifyClient::connect(credentials).await?;

    let summary =
        pipeline::run(&client, artists::DEFAULT_ARTISTS, Path::new(RAW_DATA_PATH)).await?;

    println!("Resolved {} artists", summary.artists_resolved);
    println!("Found {} unique tracks", summary.unique_tracks);
    println!("Fetched details for {} tracks", summary.records_fetched);
    println!("Saved {} unique rows to {RAW_DATA_PATH}", summary.rows_written);
    println!("Data pipeline complete");

    Ok(())
}
