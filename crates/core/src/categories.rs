//! Per-category visibility and the categorized listing.
//!
//! Visibility is independent of filtering: a collapsed category still reports
//! how many products pass the filter, it just renders no tiles.

use serde::{Deserialize, Serialize};

use crate::filter::FilterCriteria;
use crate::product::Product;

/// Open/closed state of one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryState {
    pub category: String,
    pub is_open: bool,
}

/// Open/closed toggles for every category of the current catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryVisibility {
    states: Vec<CategoryState>,
}

impl CategoryVisibility {
    /// Reset to exactly `categories`, all open.
    ///
    /// Categories missing from the new set are dropped.
    pub fn initialize<I, S>(&mut self, categories: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.states = categories
            .into_iter()
            .map(|category| CategoryState {
                category: category.into(),
                is_open: true,
            })
            .collect();
    }

    /// Flip one category. Returns the new state, or `None` for an unknown
    /// category, which is left untouched.
    pub fn toggle(&mut self, category: &str) -> Option<bool> {
        let state = self
            .states
            .iter_mut()
            .find(|state| state.category == category)?;
        state.is_open = !state.is_open;
        Some(state.is_open)
    }

    /// Whether `category` is expanded. Unknown categories read as closed.
    #[must_use]
    pub fn is_open(&self, category: &str) -> bool {
        self.states
            .iter()
            .any(|state| state.category == category && state.is_open)
    }

    #[must_use]
    pub fn states(&self) -> &[CategoryState] {
        &self.states
    }
}

/// One category block of the listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySection<'a> {
    pub category: &'a str,
    /// Products passing the filter, whether or not the section is open.
    pub count: usize,
    pub is_open: bool,
    /// Tiles to render; empty while collapsed.
    pub products: Vec<&'a Product>,
}

/// Build the categorized listing.
///
/// Categories with no product passing `criteria` are omitted.
#[must_use]
pub fn sections<'a>(
    products: &'a [Product],
    categories: &'a [String],
    criteria: &FilterCriteria,
    visibility: &CategoryVisibility,
) -> Vec<CategorySection<'a>> {
    let visible = criteria.apply(products);

    categories
        .iter()
        .filter_map(|category| {
            let matching: Vec<&Product> = visible
                .iter()
                .copied()
                .filter(|product| &product.category == category)
                .collect();
            if matching.is_empty() {
                return None;
            }

            let is_open = visibility.is_open(category);
            Some(CategorySection {
                category,
                count: matching.len(),
                is_open,
                products: if is_open { matching } else { Vec::new() },
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::product::fixtures::product;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            product("1", "Jabon", "100", "Limpieza"),
            product("2", "Crema", "200", "Belleza"),
            product("3", "Lavandina", "300", "Limpieza"),
        ])
    }

    #[test]
    fn test_initialize_opens_everything() {
        let mut visibility = CategoryVisibility::default();
        visibility.initialize(["Limpieza", "Belleza"]);
        assert!(visibility.states().iter().all(|s| s.is_open));
        assert_eq!(visibility.states().len(), 2);
    }

    #[test]
    fn test_initialize_replaces_prior_state() {
        let mut visibility = CategoryVisibility::default();
        visibility.initialize(["Limpieza", "Belleza"]);
        visibility.toggle("Limpieza");
        visibility.initialize(["Limpieza", "Perfumeria"]);

        assert!(visibility.is_open("Limpieza"));
        assert!(visibility.is_open("Perfumeria"));
        assert!(!visibility.states().iter().any(|s| s.category == "Belleza"));
    }

    #[test]
    fn test_toggle_twice_round_trips() {
        let mut visibility = CategoryVisibility::default();
        visibility.initialize(["Limpieza"]);
        assert_eq!(visibility.toggle("Limpieza"), Some(false));
        assert_eq!(visibility.toggle("Limpieza"), Some(true));
        assert!(visibility.is_open("Limpieza"));
    }

    #[test]
    fn test_toggle_unknown_is_noop() {
        let mut visibility = CategoryVisibility::default();
        visibility.initialize(["Limpieza"]);
        let before = visibility.clone();
        assert_eq!(visibility.toggle("Ferreteria"), None);
        assert_eq!(visibility, before);
    }

    #[test]
    fn test_closed_category_renders_no_tiles() {
        let catalog = catalog();
        let mut visibility = CategoryVisibility::default();
        visibility.initialize(catalog.categories().iter().cloned());
        visibility.toggle("Limpieza");

        let listing = sections(
            catalog.products(),
            catalog.categories(),
            &FilterCriteria::default(),
            &visibility,
        );

        assert_eq!(listing.len(), 2);
        let limpieza = &listing[0];
        assert_eq!(limpieza.category, "Limpieza");
        assert_eq!(limpieza.count, 2);
        assert!(!limpieza.is_open);
        assert!(limpieza.products.is_empty());

        let belleza = &listing[1];
        assert!(belleza.is_open);
        assert_eq!(belleza.products.len(), 1);
    }

    #[test]
    fn test_sections_skip_categories_without_matches() {
        let catalog = catalog();
        let mut visibility = CategoryVisibility::default();
        visibility.initialize(catalog.categories().iter().cloned());

        let listing = sections(
            catalog.products(),
            catalog.categories(),
            &FilterCriteria::new("crema", None),
            &visibility,
        );

        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].category, "Belleza");
        assert_eq!(listing[0].count, 1);
    }
}
