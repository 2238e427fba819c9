use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};
use url::Url;

use super::pager::{ExpansionReport, LoadMoreSurface, Pager};
use super::session::{BrowserSession, ListingSession};
use crate::config::{BrowserSettings, ScraperConfig};
use crate::detail::DetailPageFetcher;
use crate::error::ScraperError;
use crate::product::Product;
use crate::traits::ProductSource;

/// Expands a listing in the browser, then reads every product from its own
/// page, one request at a time.
pub struct ExpandableListingFetcher {
    details: DetailPageFetcher,
    browser: BrowserSettings,
    pager: Pager,
}

impl ExpandableListingFetcher {
    pub fn new(client: Client, base_url: Url, config: &ScraperConfig) -> Result<Self, ScraperError> {
        Ok(Self {
            details: DetailPageFetcher::new(client, base_url)?,
            browser: config.browser.clone(),
            pager: Pager::new(config.load_more_timeout, config.settle_delay)?,
        })
    }

    /// Browser part: launch, then load, expand and read links.
    pub async fn collect_detail_links(&self, url: &Url) -> Result<Vec<String>, ScraperError> {
        let session = BrowserSession::launch(&self.browser).await?;
        collect_in_session(session, url, &self.pager).await
    }
}

/// Opens `url` in `session`, expands it and reads the detail links. The
/// session is closed before returning, whether this succeeded or not.
pub async fn collect_in_session<S>(
    mut session: S,
    url: &Url,
    pager: &Pager,
) -> Result<Vec<String>, ScraperError>
where
    S: ListingSession,
{
    let links = match session.open(url).await {
        Ok(()) => expand_and_collect(&mut session, pager)
            .await
            .map(|(_, links)| links),
        Err(e) => Err(e),
    };

    session.close().await;
    links
}

/// Runs the pager to completion, then reads detail links from whatever is
/// rendered at that point.
pub async fn expand_and_collect<S>(
    surface: &mut S,
    pager: &Pager,
) -> Result<(ExpansionReport, Vec<String>), ScraperError>
where
    S: LoadMoreSurface + ?Sized,
{
    let report = pager.run(surface).await;
    debug!(
        "Expansion finished after {} clicks with {} tiles",
        report.clicks,
        report.state.tiles()
    );

    let html = surface.page_source().await?;
    let links = pager.listing().detail_links(&html);
    Ok((report, links))
}

#[async_trait]
impl ProductSource for ExpandableListingFetcher {
    async fn fetch(&self, url: &Url) -> Result<Vec<Product>, ScraperError> {
        let links = self.collect_detail_links(url).await?;
        info!("{} detail links on {}", links.len(), url);

        let mut products = Vec::with_capacity(links.len());
        for link in &links {
            products.push(self.details.fetch(link).await?);
        }
        Ok(products)
    }
}
