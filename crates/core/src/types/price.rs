//! Type-safe price representation using decimal arithmetic.
//!
//! Every price in the catalog is an Argentine peso amount. Formatting follows
//! the `es-AR` currency convention: `$` symbol, a space, `.` as the thousands
//! separator, `,` before exactly two decimals.

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::PriceError;
use crate::types::Quantity;

/// A non-negative peso amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::Negative` if `amount` is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// The raw amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Unit price times `quantity`, saturating at `Decimal::MAX`.
    #[must_use]
    pub fn times(&self, quantity: Quantity) -> Decimal {
        self.0.saturating_mul(Decimal::from(quantity.get()))
    }

    /// Format for display (e.g., `$ 1.000,00`).
    #[must_use]
    pub fn display(&self) -> String {
        format_ars(self.0)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_ars(self.0))
    }
}

/// Format an amount as Argentine pesos.
///
/// Rounds half away from zero to two decimals. Total over all decimals; callers
/// only pass non-negative amounts, but a negative one still renders with a
/// leading `-`.
#[must_use]
pub fn format_ars(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let digits = format!("{:.2}", rounded.abs());
    let (integer, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}$ {grouped},{fraction}")
}
