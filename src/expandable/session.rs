use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;
use tokio::time::{sleep, timeout};
use tracing::{debug, info, warn};
use url::Url;

use super::pager::{ClickOutcome, LoadMoreSurface};
use crate::config::BrowserSettings;
use crate::error::ScraperError;

pub const LOAD_MORE_SELECTOR: &str = ".ecomerce-items-scroll-more";

const CLICKABLE_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// True when the control exists, is enabled, and has a visible box.
const CLICKABLE_SCRIPT: &str = r#"
    (function() {
        var el = document.querySelector('.ecomerce-items-scroll-more');
        if (!el || el.disabled) {
            return false;
        }
        var style = window.getComputedStyle(el);
        if (style.display === 'none' || style.visibility === 'hidden') {
            return false;
        }
        var rect = el.getBoundingClientRect();
        return rect.width > 0 && rect.height > 0;
    })()
"#;

/// A launched page that lives from `open` until `close`.
///
/// [`collect_in_session`](super::collect_in_session) is the only caller and
/// closes the session on every path out.
#[async_trait]
pub trait ListingSession: LoadMoreSurface + Sized {
    async fn open(&mut self, url: &Url) -> Result<(), ScraperError>;

    /// Releases the session. Teardown problems are logged, not returned.
    async fn close(self);
}

/// One browser process with a single page.
///
/// If a session is dropped without `close` (a panic in between), the handler
/// task is aborted, the profile directory removed, and chromiumoxide kills
/// the child process on drop.
pub struct BrowserSession {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
    user_data_dir: PathBuf,
    closed: bool,
}

impl BrowserSession {
    pub async fn launch(settings: &BrowserSettings) -> Result<Self, ScraperError> {
        info!("Launching browser (headless={})", settings.headless);

        // Separate profile per launch so back-to-back sessions never share a lock.
        let unique_id = format!(
            "{}-{}",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos()
        );
        let user_data_dir = std::env::temp_dir().join(format!("product-scraper-{}", unique_id));

        let config = browser_config(settings, &user_data_dir)?;
        let (mut browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| ScraperError::BrowserInit(e.to_string()))?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                debug!("Browser event: {:?}", event);
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                if let Err(close_err) = browser.close().await {
                    debug!("Failed to close browser after page error: {}", close_err);
                }
                handler.abort();
                if let Err(rm_err) = std::fs::remove_dir_all(&user_data_dir) {
                    debug!("Failed to remove {:?}: {}", user_data_dir, rm_err);
                }
                return Err(ScraperError::BrowserInit(e.to_string()));
            }
        };

        Ok(Self {
            browser,
            page,
            handler,
            user_data_dir,
            closed: false,
        })
    }

    async fn wait_until_clickable(&self) -> Result<(), ScraperError> {
        loop {
            let clickable = self
                .page
                .evaluate(CLICKABLE_SCRIPT)
                .await
                .map_err(|e| ScraperError::Automation(e.to_string()))?
                .into_value::<bool>()
                .unwrap_or(false);

            if clickable {
                return Ok(());
            }
            sleep(CLICKABLE_POLL_INTERVAL).await;
        }
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        self.handler.abort();
        if self.closed {
            return;
        }
        warn!("Browser session dropped without close; killing browser");
        if let Err(e) = std::fs::remove_dir_all(&self.user_data_dir) {
            debug!("Failed to remove {:?}: {}", self.user_data_dir, e);
        }
    }
}

#[async_trait]
impl ListingSession for BrowserSession {
    async fn open(&mut self, url: &Url) -> Result<(), ScraperError> {
        info!("Opening {}", url);
        self.page
            .goto(url.as_str())
            .await
            .map_err(|e| ScraperError::Navigation(e.to_string()))?;
        self.page
            .wait_for_navigation()
            .await
            .map_err(|e| ScraperError::Navigation(e.to_string()))?;
        Ok(())
    }

    async fn close(mut self) {
        info!("Closing browser...");

        if let Err(e) = self.browser.close().await {
            warn!("Failed to close browser: {}", e);
        }
        if let Err(e) = self.browser.wait().await {
            debug!("Failed to wait for browser exit: {}", e);
        }
        self.handler.abort();
        if let Err(e) = std::fs::remove_dir_all(&self.user_data_dir) {
            debug!("Failed to remove {:?}: {}", self.user_data_dir, e);
        }
        self.closed = true;

        info!("Browser closed");
    }
}

#[async_trait]
impl LoadMoreSurface for BrowserSession {
    async fn page_source(&mut self) -> Result<String, ScraperError> {
        self.page
            .content()
            .await
            .map_err(|e| ScraperError::Automation(e.to_string()))
    }

    async fn click_load_more(&mut self, wait: Duration) -> Result<ClickOutcome, ScraperError> {
        match timeout(wait, self.wait_until_clickable()).await {
            Err(_) => return Ok(ClickOutcome::TimedOut),
            Ok(ready) => ready?,
        }

        self.page
            .find_element(LOAD_MORE_SELECTOR)
            .await
            .map_err(|e| ScraperError::Automation(format!("'More' control: {}", e)))?
            .click()
            .await
            .map_err(|e| ScraperError::Automation(format!("'More' click: {}", e)))?;
        debug!("Clicked 'More'");

        Ok(ClickOutcome::Clicked)
    }
}

fn browser_config(
    settings: &BrowserSettings,
    user_data_dir: &Path,
) -> Result<BrowserConfig, ScraperError> {
    let (width, height) = settings.window_size;
    let mut builder = BrowserConfig::builder()
        .window_size(width, height)
        .user_data_dir(user_data_dir)
        .request_timeout(settings.request_timeout)
        .arg("--disable-dev-shm-usage")
        .arg("--disable-gpu");

    if let Some(path) = &settings.chrome_executable {
        builder = builder.chrome_executable(path);
    }
    if !settings.headless {
        builder = builder.with_head();
    }

    builder
        .build()
        .map_err(|e| ScraperError::BrowserInit(format!("browser config: {}", e)))
}
