use serde::Serialize;

/// CSV header, in the order fields are serialized.
pub const FIELDS: [&str; 5] = ["title", "description", "price", "rating", "num_of_reviews"];

/// One scraped product. Built only with all five values present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    title: String,
    description: String,
    price: f64,
    rating: u32,
    num_of_reviews: u32,
}

impl Product {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        price: f64,
        rating: u32,
        num_of_reviews: u32,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            price,
            rating,
            num_of_reviews,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn rating(&self) -> u32 {
        self.rating
    }

    pub fn num_of_reviews(&self) -> u32 {
        self.num_of_reviews
    }
}
