use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::error::ScraperError;

/// Client with library defaults: no custom headers, cookies or auth.
pub fn build_client() -> Result<Client, ScraperError> {
    Ok(Client::builder().build()?)
}

/// One GET. Non-2xx statuses are errors; nothing is retried.
pub async fn get_html(client: &Client, url: &Url) -> Result<String, ScraperError> {
    debug!("GET {}", url);
    let body = client
        .get(url.clone())
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    Ok(body)
}
