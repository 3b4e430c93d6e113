//! Type-safe price representation using decimal arithmetic.
//!
//! Catalog prices come back from the API as whole New Taiwan Dollars, but cart
//! totals may carry a fraction once a coupon is applied, so amounts are held as
//! [`Decimal`] rather than integers.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// A zero price in the default currency.
    pub const ZERO: Self = Self::new(Decimal::ZERO, CurrencyCode::TWD);

    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a price in New Taiwan Dollars.
    #[must_use]
    pub const fn twd(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::TWD)
    }

    /// Whether the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Format for display (e.g., "NT$ 1200", "NT$ 1080.5").
    #[must_use]
    pub fn display(&self) -> String {
        format!("{} {}", self.currency_code.symbol(), self.amount.normalize())
    }
}

impl Default for Price {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl From<i64> for Price {
    fn from(amount: i64) -> Self {
        Self::twd(Decimal::from(amount))
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    TWD,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::TWD => "NT$",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_whole_amount() {
        assert_eq!(Price::from(1200).to_string(), "NT$ 1200");
    }

    #[test]
    fn test_display_strips_trailing_zeros() {
        let price = Price::twd(Decimal::new(108_050, 2));
        assert_eq!(price.display(), "NT$ 1080.5");
    }

    #[test]
    fn test_default_is_zero() {
        assert!(Price::default().is_zero());
        assert_eq!(Price::default().currency_code, CurrencyCode::TWD);
    }
}
