use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::error::ScraperError;
use crate::extract::DetailTemplate;
use crate::http::get_html;
use crate::product::Product;

/// Fetches a single product page and extracts its record.
pub struct DetailPageFetcher {
    client: Client,
    base_url: Url,
    template: DetailTemplate,
}

impl DetailPageFetcher {
    pub fn new(client: Client, base_url: Url) -> Result<Self, ScraperError> {
        Ok(Self {
            client,
            base_url,
            template: DetailTemplate::new()?,
        })
    }

    /// `href` may be relative (`/test-sites/...`) or absolute.
    pub fn resolve(&self, href: &str) -> Result<Url, ScraperError> {
        Ok(self.base_url.join(href)?)
    }

    pub async fn fetch(&self, href: &str) -> Result<Product, ScraperError> {
        let url = self.resolve(href)?;
        let html = get_html(&self.client, &url).await?;
        let product = self.template.parse_page(&html)?;
        debug!("detail page {} -> {:?}", url, product.title());
        Ok(product)
    }
}
