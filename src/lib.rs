//! Product scraper for the webscraper.io e-commerce test site.
//!
//! - Flat listings (home, computers, phones): one GET, every tile parsed.
//! - Expandable listings (tablets, laptops, touch): a headless browser clicks
//!   "More" until the tile count stops growing, then each product's detail
//!   page is fetched.
//!
//! Each category ends up in its own CSV file.
//!
//! # Usage
//!
//! ```rust,ignore
//! use product_scraper::{ScraperConfig, ScraperService};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut service = ScraperService::new(ScraperConfig::default()).unwrap();
//!     for result in service.run_all().await.unwrap() {
//!         println!("{}: {} rows in {:?}", result.target.name, result.records, result.csv_path);
//!     }
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod detail;
pub mod error;
pub mod expandable;
pub mod extract;
pub mod http;
pub mod listing;
pub mod product;
pub mod service;
pub mod traits;
pub mod writer;

pub use catalog::{catalog, Strategy, Target};
pub use config::{BrowserSettings, ScraperConfig};
pub use detail::DetailPageFetcher;
pub use error::ScraperError;
pub use expandable::ExpandableListingFetcher;
pub use listing::FlatListingFetcher;
pub use product::{Product, FIELDS};
pub use service::{ScrapeResult, ScraperService};
pub use traits::ProductSource;
pub use writer::write_products;
