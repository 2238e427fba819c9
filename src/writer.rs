use std::path::Path;

use csv::{Terminator, WriterBuilder};
use tracing::info;

use crate::error::ScraperError;
use crate::product::{Product, FIELDS};

/// Writes `FIELDS` then one row per product, replacing any existing file.
/// Rows end in CRLF.
pub fn write_products(path: &Path, products: &[Product]) -> Result<(), ScraperError> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::CRLF)
        .from_path(path)?;

    writer.write_record(FIELDS)?;
    for product in products {
        writer.serialize(product)?;
    }
    writer.flush()?;

    info!("Wrote {} products to {:?}", products.len(), path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> Vec<Product> {
        vec![
            Product::new("Galaxy Tab", "7\" screen, Android", 251.99, 2, 8),
            Product::new("Iconia B1-730HD", "Black", 99.99, 1, 0),
            Product::new("IdeaTab A3500L", "Wi-Fi, 8GB", 88.0, 4, 14),
        ]
    }

    fn read_rows(path: &Path) -> Vec<Vec<String>> {
        csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(path)
            .unwrap()
            .records()
            .map(|r| r.unwrap().iter().map(str::to_string).collect())
            .collect()
    }

    #[test]
    fn test_header_then_rows_in_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tablets.csv");

        write_products(&path, &sample()).unwrap();
        let rows = read_rows(&path);

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0], FIELDS);
        assert_eq!(rows[1], ["Galaxy Tab", "7\" screen, Android", "251.99", "2", "8"]);
        assert_eq!(rows[2][0], "Iconia B1-730HD");
        assert_eq!(rows[3], ["IdeaTab A3500L", "Wi-Fi, 8GB", "88.0", "4", "14"]);
    }

    #[test]
    fn test_embedded_delimiters_are_quoted() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("quoted.csv");

        write_products(&path, &sample()[..1]).unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();

        assert_eq!(
            raw,
            "title,description,price,rating,num_of_reviews\r\nGalaxy Tab,\"7\"\" screen, Android\",251.99,2,8\r\n"
        );
    }

    #[test]
    fn test_rewrite_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("home.csv");

        write_products(&path, &sample()).unwrap();
        let once = std::fs::read(&path).unwrap();
        write_products(&path, &sample()).unwrap();
        let twice = std::fs::read(&path).unwrap();
        assert_eq!(once, twice);

        write_products(&path, &[]).unwrap();
        assert_eq!(read_rows(&path).len(), 1);
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("no-such-dir").join("home.csv");

        let err = write_products(&path, &sample()).unwrap_err();
        assert!(matches!(err, ScraperError::Csv(_) | ScraperError::FileIO(_)));
    }
}
