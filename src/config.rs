use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://webscraper.io/";

/// How long to wait for the "load more" control to become clickable.
pub const LOAD_MORE_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Clone)]
pub struct ScraperConfig {
    pub base_url: String,
    pub output_dir: PathBuf,
    pub load_more_timeout: Duration,
    /// Pause after each click so appended tiles are rendered before re-counting.
    pub settle_delay: Duration,
    pub browser: BrowserSettings,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            output_dir: PathBuf::from("."),
            load_more_timeout: LOAD_MORE_TIMEOUT,
            settle_delay: Duration::from_millis(500),
            browser: BrowserSettings::default(),
        }
    }
}

impl ScraperConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = path.into();
        self
    }

    pub fn with_load_more_timeout(mut self, timeout: Duration) -> Self {
        self.load_more_timeout = timeout;
        self
    }

    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    pub fn with_browser(mut self, browser: BrowserSettings) -> Self {
        self.browser = browser;
        self
    }
}

/// Launch options for the headless browser.
///
/// Handed to the expandable-listing fetcher on each call; nothing about the
/// browser is configured at process level.
#[derive(Debug, Clone)]
pub struct BrowserSettings {
    pub headless: bool,
    /// Falls back to `CHROME_PATH`, then to chromiumoxide's own detection.
    pub chrome_executable: Option<PathBuf>,
    pub window_size: (u32, u32),
    pub request_timeout: Duration,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            headless: true,
            chrome_executable: std::env::var_os("CHROME_PATH").map(PathBuf::from),
            window_size: (1280, 800),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl BrowserSettings {
    pub fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    pub fn with_chrome_executable(mut self, path: impl Into<PathBuf>) -> Self {
        self.chrome_executable = Some(path.into());
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}
