//! Field extraction for the two page templates of the test site.
//!
//! Listing tiles and detail pages encode the same product differently: the
//! tile carries the title in an attribute and the rating in `data-rating`,
//! while the detail page has the title as text and one star `<span>` per
//! rating point. Each template keeps its own rule.

use scraper::{ElementRef, Html, Selector};

use crate::error::ScraperError;
use crate::product::Product;

pub const TILE_SELECTOR: &str = ".thumbnail";
pub const DETAIL_LINK_SELECTOR: &str = "a.title";

/// A named field and the selector that locates it.
struct Field {
    name: &'static str,
    css: &'static str,
    selector: Selector,
}

impl Field {
    fn new(name: &'static str, css: &'static str) -> Result<Self, ScraperError> {
        Ok(Self {
            name,
            css,
            selector: parse_selector(css)?,
        })
    }

    fn find<'a>(&self, scope: ElementRef<'a>) -> Result<ElementRef<'a>, ScraperError> {
        scope
            .select(&self.selector)
            .next()
            .ok_or(ScraperError::MissingField {
                field: self.name,
                selector: self.css,
            })
    }

    fn text(&self, scope: ElementRef<'_>) -> Result<String, ScraperError> {
        Ok(element_text(self.find(scope)?))
    }

    fn attr(&self, scope: ElementRef<'_>, attr: &str) -> Result<String, ScraperError> {
        self.find(scope)?
            .value()
            .attr(attr)
            .map(str::to_string)
            .ok_or(ScraperError::MissingField {
                field: self.name,
                selector: self.css,
            })
    }
}

/// Selectors shared by both templates.
struct CommonFields {
    title: Field,
    description: Field,
    price: Field,
    review_count: Field,
}

impl CommonFields {
    fn new() -> Result<Self, ScraperError> {
        Ok(Self {
            title: Field::new("title", ".title")?,
            description: Field::new("description", ".description")?,
            price: Field::new("price", ".price")?,
            review_count: Field::new("num_of_reviews", "p.review-count")?,
        })
    }

    fn price(&self, scope: ElementRef<'_>) -> Result<f64, ScraperError> {
        parse_price(&self.price.text(scope)?)
    }

    fn num_of_reviews(&self, scope: ElementRef<'_>) -> Result<u32, ScraperError> {
        parse_review_count(&self.review_count.text(scope)?)
    }
}

/// Template for product tiles on a listing page.
pub struct ListingTemplate {
    tile: Selector,
    detail_link: Selector,
    fields: CommonFields,
    rating: Field,
}

impl ListingTemplate {
    pub fn new() -> Result<Self, ScraperError> {
        Ok(Self {
            tile: parse_selector(TILE_SELECTOR)?,
            detail_link: parse_selector(DETAIL_LINK_SELECTOR)?,
            fields: CommonFields::new()?,
            rating: Field::new("rating", "p[data-rating]")?,
        })
    }

    pub fn tiles<'a>(&self, document: &'a Html) -> Vec<ElementRef<'a>> {
        document.select(&self.tile).collect()
    }

    /// Number of product tiles in the rendered page.
    pub fn count_tiles(&self, html: &str) -> usize {
        Html::parse_document(html).select(&self.tile).count()
    }

    /// `href` of every product title link, in document order.
    pub fn detail_links(&self, html: &str) -> Vec<String> {
        Html::parse_document(html)
            .select(&self.detail_link)
            .filter_map(|a| a.value().attr("href"))
            .map(str::to_string)
            .collect()
    }

    /// Extracts one record from a single tile.
    pub fn extract(&self, tile: ElementRef<'_>) -> Result<Product, ScraperError> {
        let title = self.fields.title.attr(tile, "title")?;
        let description = self.fields.description.text(tile)?;
        let price = self.fields.price(tile)?;
        let raw_rating = self.rating.attr(tile, "data-rating")?;
        let rating = raw_rating
            .parse::<u32>()
            .map_err(|_| ScraperError::InvalidField {
                field: "rating",
                value: raw_rating.clone(),
            })?;
        let num_of_reviews = self.fields.num_of_reviews(tile)?;

        Ok(Product::new(title, description, price, rating, num_of_reviews))
    }

    /// Extracts every tile in document order. Any bad tile fails the page.
    pub fn parse_page(&self, html: &str) -> Result<Vec<Product>, ScraperError> {
        let document = Html::parse_document(html);
        self.tiles(&document)
            .into_iter()
            .map(|tile| self.extract(tile))
            .collect()
    }
}

/// Template for a product's own page.
pub struct DetailTemplate {
    fields: CommonFields,
    rating_indicator: Selector,
}

impl DetailTemplate {
    pub fn new() -> Result<Self, ScraperError> {
        Ok(Self {
            fields: CommonFields::new()?,
            rating_indicator: parse_selector("p.review-count span")?,
        })
    }

    pub fn extract(&self, document: &Html) -> Result<Product, ScraperError> {
        let root = document.root_element();

        let title = self.fields.title.text(root)?;
        let description = self.fields.description.text(root)?;
        let price = self.fields.price(root)?;
        let rating = indicator_rating(root.select(&self.rating_indicator).count())?;
        let num_of_reviews = self.fields.num_of_reviews(root)?;

        Ok(Product::new(title, description, price, rating, num_of_reviews))
    }

    pub fn parse_page(&self, html: &str) -> Result<Product, ScraperError> {
        self.extract(&Html::parse_document(html))
    }
}

/// Detail-page rating: one point per star indicator.
fn indicator_rating(count: usize) -> Result<u32, ScraperError> {
    u32::try_from(count).map_err(|_| ScraperError::InvalidField {
        field: "rating",
        value: count.to_string(),
    })
}

/// Price text such as `"$1099.99"`, without the currency symbol. Rejects negatives.
pub fn parse_price(text: &str) -> Result<f64, ScraperError> {
    let cleaned = text.trim().replace('$', "");
    match cleaned.trim().parse::<f64>() {
        Ok(price) if price.is_finite() && price >= 0.0 => Ok(price),
        _ => Err(ScraperError::InvalidField {
            field: "price",
            value: text.to_string(),
        }),
    }
}

/// Leading integer of text like `"14 reviews"`.
pub fn parse_review_count(text: &str) -> Result<u32, ScraperError> {
    text.split_whitespace()
        .next()
        .and_then(|token| token.parse::<u32>().ok())
        .ok_or_else(|| ScraperError::InvalidField {
            field: "num_of_reviews",
            value: text.to_string(),
        })
}

fn parse_selector(css: &'static str) -> Result<Selector, ScraperError> {
    Selector::parse(css).map_err(|e| ScraperError::InvalidSelector {
        css,
        reason: e.to_string(),
    })
}

/// Concatenated text nodes, untrimmed.
fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}
