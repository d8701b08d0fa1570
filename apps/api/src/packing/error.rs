use thiserror::Error;

/// Errors raised by the packing engine.
///
/// Catalog construction and solving fail with an explicit value; no partial
/// result is ever returned alongside one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PackingError {
    /// The package size list was empty or contained a non-positive size.
    #[error("invalid package configuration: {0}")]
    InvalidConfiguration(String),

    /// A negative quantity was requested.
    #[error("quantity must be non-negative, got {0}")]
    InvalidQuantity(i64),

    /// The DP table for this quantity exceeds `u32::MAX` entries or could not
    /// be allocated, or no delivered quantity at or above it was reachable.
    /// The latter cannot happen for a valid catalog.
    #[error("no package combination can deliver {quantity}")]
    NoFeasiblePlan { quantity: u64 },
}
