//! Listings that only reveal their full item set after repeated clicks on a
//! "load more" control, driven through a headless browser.

mod fetcher;
mod pager;
mod session;

pub use fetcher::{collect_in_session, expand_and_collect, ExpandableListingFetcher};
pub use pager::{AbortReason, ClickOutcome, ExpansionReport, LoadMoreSurface, Pager, PollState};
pub use session::{BrowserSession, ListingSession, LOAD_MORE_SELECTOR};
