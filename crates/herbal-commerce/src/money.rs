//! Money type for representing prices.
//!
//! Amounts are held in the currency's minor unit (paise for INR) so that
//! cart totals never accumulate floating-point error.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CommerceError;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    INR,
}

impl Currency {
    /// Get the currency code (e.g., "INR").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::INR => "INR",
        }
    }

    /// Get the currency symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::INR => "\u{20b9}",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in the smallest currency unit.
    pub amount_minor: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a Money value from minor units.
    pub fn new(amount_minor: i64, currency: Currency) -> Self {
        Self {
            amount_minor,
            currency,
        }
    }

    /// Zero in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Convert a catalog price (major units) into Money.
    ///
    /// Rejects negative, non-finite and out-of-range values.
    ///
    /// ```
    /// use herbal_commerce::money::{Currency, Money};
    /// let price = Money::from_price(249.5, Currency::INR).unwrap();
    /// assert_eq!(price.amount_minor, 24950);
    /// ```
    pub fn from_price(amount: f64, currency: Currency) -> Result<Self, CommerceError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(CommerceError::InvalidPrice(amount.to_string()));
        }
        checked_minor((amount * 100.0).round())
            .map(|minor| Self::new(minor, currency))
            .ok_or_else(|| CommerceError::InvalidPrice(amount.to_string()))
    }

    /// Value in major units.
    pub fn to_major(&self) -> f64 {
        self.amount_minor as f64 / 100.0
    }

    /// Multiply by a quantity, returning None on overflow.
    pub fn try_multiply(&self, quantity: u32) -> Option<Self> {
        self.amount_minor
            .checked_mul(i64::from(quantity))
            .map(|amount| Self::new(amount, self.currency))
    }

    /// Add two values, returning None on overflow.
    pub fn try_add(&self, other: &Self) -> Option<Self> {
        self.amount_minor
            .checked_add(other.amount_minor)
            .map(|amount| Self::new(amount, self.currency))
    }

    /// Format for display, e.g. `₹249.00`.
    pub fn display(&self) -> String {
        let sign = if self.amount_minor < 0 { "-" } else { "" };
        let abs = self.amount_minor.unsigned_abs();
        format!(
            "{}{}{}.{:02}",
            sign,
            self.currency.symbol(),
            abs / 100,
            abs % 100
        )
    }

    /// Plain decimal amount without a symbol, e.g. `249.00`.
    pub fn decimal(&self) -> String {
        let sign = if self.amount_minor < 0 { "-" } else { "" };
        let abs = self.amount_minor.unsigned_abs();
        format!("{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

// `i64::MAX as f64` rounds up to 2^63, which is itself out of range.
fn checked_minor(minor: f64) -> Option<i64> {
    if minor >= i64::MAX as f64 {
        return None;
    }
    Some(minor as i64)
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}
