//! Error types for Sluice.

use thiserror::Error;

/// Result type alias using Sluice's Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Sluice operations.
///
/// Every variant is an allocation-class failure raised while sizing or
/// growing the output buffer of a [`collect`](crate::pipeline::Pipeline::collect)
/// call. Pipeline construction never fails.
#[derive(Error, Debug)]
pub enum Error {
    /// A bounding memory resource denied an output-buffer growth request.
    #[error("memory budget exhausted: requested {requested} bytes, budget is {budget} bytes")]
    BudgetExhausted {
        /// Total backing storage the output buffer asked for, in bytes.
        requested: usize,
        /// The resource's byte budget.
        budget: usize,
    },

    /// Memory allocation failed.
    #[error("memory allocation failed: {0}")]
    AllocationFailed(String),
}
