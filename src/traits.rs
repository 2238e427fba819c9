use async_trait::async_trait;
use url::Url;

use crate::error::ScraperError;
use crate::product::Product;

/// A way of turning one listing URL into product records.
#[async_trait]
pub trait ProductSource: Send + Sync {
    /// Records in page order. Any failure aborts the whole listing.
    async fn fetch(&self, url: &Url) -> Result<Vec<Product>, ScraperError>;
}
