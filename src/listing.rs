use async_trait::async_trait;
use reqwest::Client;
use tracing::info;
use url::Url;

use crate::error::ScraperError;
use crate::extract::ListingTemplate;
use crate::http::get_html;
use crate::product::Product;
use crate::traits::ProductSource;

/// Reads every tile from a page that renders its whole listing up front.
pub struct FlatListingFetcher {
    client: Client,
    template: ListingTemplate,
}

impl FlatListingFetcher {
    pub fn new(client: Client) -> Result<Self, ScraperError> {
        Ok(Self {
            client,
            template: ListingTemplate::new()?,
        })
    }
}

#[async_trait]
impl ProductSource for FlatListingFetcher {
    async fn fetch(&self, url: &Url) -> Result<Vec<Product>, ScraperError> {
        let html = get_html(&self.client, url).await?;
        let products = self.template.parse_page(&html)?;
        info!("{} products on {}", products.len(), url);
        Ok(products)
    }
}
