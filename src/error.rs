use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("fetch error: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("invalid selector `{css}`: {reason}")]
    InvalidSelector { css: &'static str, reason: String },

    #[error("missing field `{field}` (selector `{selector}`)")]
    MissingField {
        field: &'static str,
        selector: &'static str,
    },

    #[error("invalid value for `{field}`: {value:?}")]
    InvalidField { field: &'static str, value: String },

    #[error("browser init error: {0}")]
    BrowserInit(String),

    #[error("navigation error: {0}")]
    Navigation(String),

    /// Fault while driving the page (waiting on or clicking a control).
    #[error("browser automation error: {0}")]
    Automation(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("file I/O error: {0}")]
    FileIO(#[from] std::io::Error),
}
