//! Polling loop that expands a listing until the tile count stops growing.
//!
//! The site gives no "end of list" marker, so the loop compares the visible
//! tile count with the previous pass. Three ways out:
//!
//! - `Stable`: the count did not change, everything is loaded.
//! - `Aborted(WaitTimeout)`: the control never became clickable in time.
//! - `Aborted(Fault)`: anything else went wrong while driving the page.
//!
//! None of them is an error for the caller; the tiles present at that point
//! are used as-is.

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::error::ScraperError;
use crate::extract::ListingTemplate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Clicked,
    /// The control did not become clickable within the wait.
    TimedOut,
}

/// A rendered listing page with a "load more" control.
#[async_trait]
pub trait LoadMoreSurface: Send {
    /// Current rendered HTML.
    async fn page_source(&mut self) -> Result<String, ScraperError>;

    /// Waits up to `wait` for the control, then clicks it.
    async fn click_load_more(&mut self, wait: Duration) -> Result<ClickOutcome, ScraperError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbortReason {
    WaitTimeout,
    Fault(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollState {
    Polling { previous: usize },
    Stable { tiles: usize },
    Aborted { tiles: usize, reason: AbortReason },
}

impl PollState {
    /// Tiles seen when the state was entered.
    pub fn tiles(&self) -> usize {
        match self {
            PollState::Polling { previous } => *previous,
            PollState::Stable { tiles } | PollState::Aborted { tiles, .. } => *tiles,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpansionReport {
    pub state: PollState,
    pub clicks: usize,
}

pub struct Pager {
    wait: Duration,
    settle: Duration,
    listing: ListingTemplate,
}

impl Pager {
    pub fn new(wait: Duration, settle: Duration) -> Result<Self, ScraperError> {
        Ok(Self {
            wait,
            settle,
            listing: ListingTemplate::new()?,
        })
    }

    /// Template used to count tiles and read links off the rendered page.
    pub fn listing(&self) -> &ListingTemplate {
        &self.listing
    }

    pub async fn run<S>(&self, surface: &mut S) -> ExpansionReport
    where
        S: LoadMoreSurface + ?Sized,
    {
        let mut state = PollState::Polling { previous: 0 };
        let mut clicks = 0;

        while let PollState::Polling { previous } = state {
            state = self.step(surface, previous).await;
            if let PollState::Polling { .. } = state {
                clicks += 1;
                sleep(self.settle).await;
            }
        }

        match &state {
            PollState::Stable { tiles } => {
                info!("All products loaded: {} tiles after {} clicks", tiles, clicks)
            }
            PollState::Aborted {
                tiles,
                reason: AbortReason::WaitTimeout,
            } => warn!(
                "'More' control not found or not clickable; continuing with {} tiles",
                tiles
            ),
            PollState::Aborted {
                tiles,
                reason: AbortReason::Fault(e),
            } => warn!("Stopped loading more products ({}); continuing with {} tiles", e, tiles),
            PollState::Polling { .. } => {}
        }

        ExpansionReport { state, clicks }
    }

    /// One pass: count, compare, click. Returns `Polling` only after a click.
    pub async fn step<S>(&self, surface: &mut S, previous: usize) -> PollState
    where
        S: LoadMoreSurface + ?Sized,
    {
        let rendered = surface.page_source().await;
        let tiles = match rendered.map(|html| self.listing.count_tiles(&html)) {
            Ok(tiles) => tiles,
            Err(e) => {
                return PollState::Aborted {
                    tiles: previous,
                    reason: AbortReason::Fault(e.to_string()),
                }
            }
        };
        debug!("Visible tiles: {} (previous {})", tiles, previous);

        if tiles == previous {
            return PollState::Stable { tiles };
        }

        match surface.click_load_more(self.wait).await {
            Ok(ClickOutcome::Clicked) => PollState::Polling { previous: tiles },
            Ok(ClickOutcome::TimedOut) => PollState::Aborted {
                tiles,
                reason: AbortReason::WaitTimeout,
            },
            Err(e) => PollState::Aborted {
                tiles,
                reason: AbortReason::Fault(e.to_string()),
            },
        }
    }
}
