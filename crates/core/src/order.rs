//! Order text sent to the messaging service.
//!
//! The text is plain and unencoded. Percent-encoding happens where the outbound
//! link is built.

use std::fmt::Write as _;

use crate::cart::{CartEntry, sum_line_totals};
use crate::types::format_ars;

/// Summarise cart entries as order text.
///
/// One `* {title} - {unit price} ({quantity} unidades)` line per entry in
/// insertion order, then `Total: {grand total}`.
#[must_use]
pub fn compose(entries: &[CartEntry]) -> String {
    let mut text = String::new();

    for entry in entries {
        // Writing to a String cannot fail.
        let _ = writeln!(
            text,
            "* {} - {} ({} unidades)",
            entry.product.title,
            entry.product.price,
            entry.quantity
        );
    }

    let _ = write!(text, "Total: {}", format_ars(sum_line_totals(entries)));
    text
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cart::Cart;
    use crate::product::fixtures::product;
    use crate::types::Quantity;

    #[test]
    fn test_single_entry_with_quantity() {
        let mut cart = Cart::default();
        cart.add(product("1", "Soap", "1000", "Limpieza"), Quantity::new(2).unwrap());

        assert_eq!(
            compose(cart.entries()),
            "* Soap - $ 1.000,00 (2 unidades)\nTotal: $ 2.000,00"
        );
    }

    #[test]
    fn test_lines_follow_insertion_order() {
        let mut cart = Cart::default();
        cart.add(product("2", "Crema", "450", "Belleza"), Quantity::ONE);
        cart.add(product("1", "Jabon", "120.5", "Limpieza"), Quantity::new(4).unwrap());

        assert_eq!(
            compose(cart.entries()),
            "* Crema - $ 450,00 (1 unidades)\n\
             * Jabon - $ 120,50 (4 unidades)\n\
             Total: $ 932,00"
        );
    }

    #[test]
    fn test_empty_cart_has_only_total() {
        assert_eq!(compose(&[]), "Total: $ 0,00");
    }

    #[test]
    fn test_oversized_total_does_not_panic() {
        let mut cart = Cart::default();
        cart.add(
            product("1", "Granel", "100000000000000000000", "Limpieza"),
            Quantity::new(u32::MAX).unwrap(),
        );

        let text = compose(cart.entries());
        assert!(text.contains("(4294967295 unidades)"));
        assert!(text.contains("\nTotal: $ 79.228.162.514.264.337.593.543.950.335,00"));
    }
}
