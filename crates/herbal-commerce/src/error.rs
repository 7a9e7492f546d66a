//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in storefront domain operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommerceError {
    /// Price is negative, not finite, or not representable.
    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    /// Category name is not one of the storefront categories.
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in cart calculation")]
    Overflow,

    /// Quantity exceeds maximum allowed.
    #[error("Quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(u32, u32),
}
