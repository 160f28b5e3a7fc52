//! CSV decoding of the catalog feed.

use std::str::FromStr;

use quimica_core::{Price, Product, ProductId};
use rust_decimal::Decimal;

use super::CatalogError;

/// Positions of the required columns in the header row.
struct Columns {
    id: usize,
    title: usize,
    description: usize,
    price: usize,
    image: usize,
    category: usize,
}

impl Columns {
    fn locate(headers: &csv::StringRecord) -> Result<Self, CatalogError> {
        let find = |name: &'static str| {
            headers
                .iter()
                .position(|header| {
                    header
                        .trim_start_matches('\u{feff}')
                        .trim()
                        .eq_ignore_ascii_case(name)
                })
                .ok_or(CatalogError::MissingColumn(name))
        };

        Ok(Self {
            id: find("id")?,
            title: find("title")?,
            description: find("description")?,
            price: find("price")?,
            image: find("image")?,
            category: find("category")?,
        })
    }

    /// The first required column a record of `len` cells does not reach.
    fn first_missing(&self, len: usize) -> Option<&'static str> {
        [
            ("id", self.id),
            ("title", self.title),
            ("description", self.description),
            ("price", self.price),
            ("image", self.image),
            ("category", self.category),
        ]
        .into_iter()
        .find(|&(_, index)| index >= len)
        .map(|(name, _)| name)
    }
}

/// Decode a CSV payload into products.
///
/// The header row names the columns; order does not matter and extra columns
/// are ignored. Blank rows are skipped. A single unparseable or negative price
/// rejects the whole payload.
///
/// # Errors
///
/// `CatalogError::Parse` for malformed CSV, `MissingColumn` when a required
/// header is absent, `MissingField` for a row too short to reach a required
/// column, `InvalidPrice` for a bad price cell.
pub fn parse_catalog(data: &[u8]) -> Result<Vec<Product>, CatalogError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(data);

    let columns = Columns::locate(reader.headers()?)?;
    let mut products = Vec::new();

    for record in reader.records() {
        let record = record?;
        if record.iter().all(str::is_empty) {
            continue;
        }

        let row = record.position().map_or(0, csv::Position::line);
        if let Some(column) = columns.first_missing(record.len()) {
            return Err(CatalogError::MissingField { row, column });
        }

        let field = |index: usize| record.get(index).unwrap_or_default();

        let raw_price = field(columns.price);
        let price = Decimal::from_str(raw_price)
            .ok()
            .and_then(|amount| Price::new(amount).ok())
            .ok_or_else(|| CatalogError::InvalidPrice {
                row,
                value: raw_price.to_string(),
            })?;

        products.push(Product {
            id: ProductId::new(field(columns.id)),
            title: field(columns.title).to_string(),
            description: field(columns.description).to_string(),
            price,
            image: field(columns.image).to_string(),
            category: field(columns.category).to_string(),
        });
    }

    Ok(products)
}
