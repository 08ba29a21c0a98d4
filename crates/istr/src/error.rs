//! Error Module - Pool Error Types
//!
//! Defines all error types used by the interning pool.
//!
//! The pool has a deliberately small error surface: it is a synchronous,
//! local data structure with no retryable conditions. Allocation failure
//! aborts the process (the payload is allocated before any table mutation,
//! so a fault can never leave the table half-updated), and broken internal
//! invariants are asserted fatal rather than reported.

use thiserror::Error;

/// Main error type for all pool operations
///
/// # Examples
///
/// ```rust
/// use istr::{Pool, PoolConfig, PoolError};
///
/// let config = PoolConfig {
///     initial_capacity: 17, // not a power of two
///     ..Default::default()
/// };
///
/// match Pool::with_config(config) {
///     Err(PoolError::Configuration(msg)) => eprintln!("bad config: {}", msg),
///     _ => unreachable!(),
/// }
/// ```
#[derive(Debug, Error)]
pub enum PoolError {
    /// Configuration error
    ///
    /// **When returned:** Invalid pool configuration detected
    ///
    /// **Recovery strategy:** Fix the configuration and reconstruct
    ///
    /// **Example scenarios:**
    /// - Slot-table capacity not a power of two or below the minimum
    /// - Pinning-ring capacity of zero or not a power of two
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error - indicates a bug in the pool
    ///
    /// **When returned:** Invariant violation or unexpected state
    ///
    /// **Recovery strategy:** Cannot recover - this is a bug
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PoolError {
    /// Check if this error indicates a bug in the code
    pub fn is_bug(&self) -> bool {
        matches!(self, PoolError::Internal(_))
    }
}

/// Result type alias for pool operations
pub type Result<T> = std::result::Result<T, PoolError>;
