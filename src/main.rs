use std::process::ExitCode;

use product_scraper::{ScraperConfig, ScraperService};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut service = match ScraperService::new(ScraperConfig::default()) {
        Ok(service) => service,
        Err(e) => {
            error!("Failed to set up scraper: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match service.run_all().await {
        Ok(results) => {
            for result in &results {
                info!("{}: {} rows -> {:?}", result.target.name, result.records, result.csv_path);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Scrape aborted: {}", e);
            ExitCode::FAILURE
        }
    }
}
