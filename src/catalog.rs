use std::fmt;

use url::Url;

use crate::error::ScraperError;

/// How a listing has to be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Everything is in the first response.
    FlatListing,
    /// Needs "load more" clicks in a browser; records come from detail pages.
    ExpandableListing,
}

/// One category page and the file its products go to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub name: &'static str,
    pub url: Url,
    pub strategy: Strategy,
}

impl Target {
    pub fn file_name(&self) -> String {
        format!("{}.csv", self.name)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.url)
    }
}

/// The six targets, in the order they are scraped.
pub fn catalog(base: &Url) -> Result<Vec<Target>, ScraperError> {
    let home = base.join("test-sites/e-commerce/more/")?;
    let computers = home.join("computers/")?;
    let phones = home.join("phones/")?;
    let laptops = computers.join("laptops")?;
    let tablets = computers.join("tablets")?;
    let touch = phones.join("touch")?;

    let target = |name, url, strategy| Target {
        name,
        url,
        strategy,
    };

    Ok(vec![
        target("home", home, Strategy::FlatListing),
        target("computers", computers, Strategy::FlatListing),
        target("phones", phones, Strategy::FlatListing),
        target("tablets", tablets, Strategy::ExpandableListing),
        target("laptops", laptops, Strategy::ExpandableListing),
        target("touch", touch, Strategy::ExpandableListing),
    ])
}
