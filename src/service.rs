use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::future::poll_fn;
use reqwest::Client;
use tower::Service;
use tracing::info;
use url::Url;

use crate::catalog::{catalog, Strategy, Target};
use crate::config::ScraperConfig;
use crate::error::ScraperError;
use crate::expandable::ExpandableListingFetcher;
use crate::http::build_client;
use crate::listing::FlatListingFetcher;
use crate::traits::ProductSource;
use crate::writer::write_products;

/// Outcome of one target.
#[derive(Debug)]
pub struct ScrapeResult {
    pub target: Target,
    pub csv_path: PathBuf,
    pub records: usize,
}

/// tower::Service that scrapes one [`Target`] and writes its CSV.
#[derive(Debug, Clone)]
pub struct ScraperService {
    config: Arc<ScraperConfig>,
    base_url: Url,
    client: Client,
}

impl ScraperService {
    pub fn new(config: ScraperConfig) -> Result<Self, ScraperError> {
        let base_url = Url::parse(&config.base_url)?;
        Ok(Self {
            config: Arc::new(config),
            base_url,
            client: build_client()?,
        })
    }

    pub fn targets(&self) -> Result<Vec<Target>, ScraperError> {
        catalog(&self.base_url)
    }

    /// Every target in catalogue order. The first failure ends the run;
    /// files already written stay on disk.
    pub async fn run_all(&mut self) -> Result<Vec<ScrapeResult>, ScraperError> {
        let mut results = Vec::new();
        for target in self.targets()? {
            poll_fn(|cx| self.poll_ready(cx)).await?;
            results.push(self.call(target).await?);
        }
        Ok(results)
    }

    fn source_for(&self, strategy: Strategy) -> Result<Box<dyn ProductSource>, ScraperError> {
        Ok(match strategy {
            Strategy::FlatListing => Box::new(FlatListingFetcher::new(self.client.clone())?),
            Strategy::ExpandableListing => Box::new(ExpandableListingFetcher::new(
                self.client.clone(),
                self.base_url.clone(),
                &self.config,
            )?),
        })
    }
}

impl Service<Target> for ScraperService {
    type Response = ScrapeResult;
    type Error = ScraperError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, target: Target) -> Self::Future {
        info!("Scraping {}", target);

        let source = self.source_for(target.strategy);
        let csv_path = self.config.output_dir.join(target.file_name());

        Box::pin(async move {
            let source = source?;
            let products = source.fetch(&target.url).await?;
            write_products(&csv_path, &products)?;

            info!(
                "Finished {}: {} products -> {:?}",
                target.name,
                products.len(),
                csv_path
            );

            Ok(ScrapeResult {
                target,
                csv_path,
                records: products.len(),
            })
        })
    }
}
