//! Bounded cart quantity.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Quantity`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum QuantityError {
    /// The value is outside `MIN..=MAX`.
    #[error("quantity must be between {min} and {max} (got {value})")]
    OutOfRange {
        /// Rejected value.
        value: i64,
        /// Smallest allowed quantity.
        min: u8,
        /// Largest allowed quantity.
        max: u8,
    },
    /// The input is not a whole number.
    #[error("quantity must be a whole number (got {0:?})")]
    NotANumber(String),
}

/// A quantity the shopper may request for one cart entry.
///
/// ## Constraints
///
/// - Range: 1-10 inclusive
///
/// The quantity controls never step outside this range, so a `Quantity` is
/// the only thing the cart operations accept when issuing a request.
///
/// ## Examples
///
/// ```
/// use pantry_core::Quantity;
///
/// let qty = Quantity::new(1).unwrap();
/// assert!(qty.decrement().is_none());
/// assert_eq!(qty.increment().map(Quantity::get), Some(2));
///
/// assert!(Quantity::new(0).is_err());
/// assert!(Quantity::new(11).is_err());
/// assert_eq!("3".parse::<Quantity>().unwrap().get(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Quantity(u8);

impl Quantity {
    /// Smallest quantity (decrement is disabled here).
    pub const MIN: Self = Self(1);
    /// Largest quantity (increment is disabled here).
    pub const MAX: Self = Self(10);

    /// Create a quantity, rejecting values outside `MIN..=MAX`.
    ///
    /// # Errors
    ///
    /// Returns [`QuantityError::OutOfRange`] for values below 1 or above 10.
    pub fn new(value: impl Into<i64>) -> Result<Self, QuantityError> {
        let value = value.into();
        if (i64::from(Self::MIN.0)..=i64::from(Self::MAX.0)).contains(&value) {
            u8::try_from(value)
                .map(Self)
                .map_err(|_| Self::out_of_range(value))
        } else {
            Err(Self::out_of_range(value))
        }
    }

    const fn out_of_range(value: i64) -> QuantityError {
        QuantityError::OutOfRange {
            value,
            min: Self::MIN.0,
            max: Self::MAX.0,
        }
    }

    /// The numeric value.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Whether one more unit is allowed.
    #[must_use]
    pub const fn can_increment(self) -> bool {
        self.0 < Self::MAX.0
    }

    /// Whether one fewer unit is allowed.
    #[must_use]
    pub const fn can_decrement(self) -> bool {
        self.0 > Self::MIN.0
    }

    /// The next quantity up, or `None` at the upper bound.
    #[must_use]
    pub const fn increment(self) -> Option<Self> {
        if self.can_increment() {
            Some(Self(self.0 + 1))
        } else {
            None
        }
    }

    /// The next quantity down, or `None` at the lower bound.
    #[must_use]
    pub const fn decrement(self) -> Option<Self> {
        if self.can_decrement() {
            Some(Self(self.0 - 1))
        } else {
            None
        }
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::MIN
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Quantity {
    type Err = QuantityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<i64>()
            .map_err(|_| QuantityError::NotANumber(s.to_owned()))?;
        Self::new(value)
    }
}

impl TryFrom<i64> for Quantity {
    type Error = QuantityError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for u8 {
    fn from(qty: Quantity) -> Self {
        qty.0
    }
}

impl From<Quantity> for u32 {
    fn from(qty: Quantity) -> Self {
        Self::from(qty.0)
    }
}
