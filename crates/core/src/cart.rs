//! The shopper's cart.
//!
//! Append-only: every add is its own line, even for a product already in the
//! cart. There is no removal or quantity edit.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::product::Product;
use crate::types::Quantity;

/// One accepted add-to-cart action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    pub product: Product,
    pub quantity: Quantity,
}

impl CartEntry {
    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.price.times(self.quantity)
    }
}

/// Ordered cart entries, insertion order preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    /// Append one entry.
    pub fn add(&mut self, product: Product, quantity: Quantity) {
        self.entries.push(CartEntry { product, quantity });
    }

    #[must_use]
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    /// Sum of `price * quantity` over all entries, saturating at `Decimal::MAX`.
    #[must_use]
    pub fn total(&self) -> Decimal {
        sum_line_totals(&self.entries)
    }

    /// Number of add actions, regardless of quantity.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Sum of quantities over all entries.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.entries
            .iter()
            .map(|entry| u64::from(entry.quantity.get()))
            .sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Saturating sum of line totals.
pub(crate) fn sum_line_totals(entries: &[CartEntry]) -> Decimal {
    entries
        .iter()
        .map(CartEntry::line_total)
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::product::fixtures::product;

    #[test]
    fn test_empty_cart() {
        let cart = Cart::default();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Decimal::ZERO);
        assert_eq!(cart.entry_count(), 0);
        assert_eq!(cart.total_quantity(), 0);
    }

    #[test]
    fn test_total_is_additive() {
        let mut cart = Cart::default();
        cart.add(product("1", "Jabon", "150.50", "Limpieza"), Quantity::new(2).unwrap());
        cart.add(product("2", "Crema", "1000", "Belleza"), Quantity::new(3).unwrap());

        assert_eq!(cart.total(), Decimal::new(330_100, 2));
    }

    #[test]
    fn test_entry_count_grows_by_one_per_add() {
        let mut cart = Cart::default();
        cart.add(product("1", "Jabon", "10", "Limpieza"), Quantity::new(5).unwrap());
        assert_eq!(cart.entry_count(), 1);
        cart.add(product("2", "Crema", "10", "Belleza"), Quantity::ONE);
        assert_eq!(cart.entry_count(), 2);
        assert_eq!(cart.total_quantity(), 6);
    }

    #[test]
    fn test_repeated_product_is_not_merged() {
        let mut cart = Cart::default();
        let jabon = product("1", "Jabon", "10", "Limpieza");
        cart.add(jabon.clone(), Quantity::ONE);
        cart.add(jabon, Quantity::new(2).unwrap());

        assert_eq!(cart.entry_count(), 2);
        assert_eq!(cart.entries()[0].quantity.get(), 1);
        assert_eq!(cart.entries()[1].quantity.get(), 2);
    }

    #[test]
    fn test_huge_amounts_saturate() {
        let mut cart = Cart::default();
        let huge = product("1", "Granel", "100000000000000000000", "Limpieza");
        cart.add(huge.clone(), Quantity::new(u32::MAX).unwrap());
        cart.add(huge, Quantity::new(u32::MAX).unwrap());

        assert_eq!(cart.entries()[0].line_total(), Decimal::MAX);
        assert_eq!(cart.total(), Decimal::MAX);
        assert_eq!(cart.total_quantity(), 2 * u64::from(u32::MAX));
    }
}
