//! Configuration Module - Pool Tuning Parameters
//!
//! Manages all configuration parameters for the interning pool.
//! All parameters have sensible defaults; construction through
//! [`Pool::with_config`](crate::Pool::with_config) validates them.

use crate::error::{PoolError, Result};
use crate::hash::HashStrategy;

/// Minimum slot-table capacity
///
/// The table never shrinks below this, and growth always lands on a
/// power of two at or above it.
pub const MIN_TABLE_CAPACITY: usize = 16;

/// Default pinning-ring capacity
///
/// The ring holds strong references to the most recently interned
/// payloads so hot values are not reclaimed between uses.
pub const DEFAULT_RING_CAPACITY: usize = 256;

static_assertions::const_assert!(MIN_TABLE_CAPACITY.is_power_of_two());
static_assertions::const_assert!(DEFAULT_RING_CAPACITY.is_power_of_two());

/// Main configuration for an interning pool
///
/// Stores all parameters affecting pool behavior.
///
/// # Examples
///
/// ```rust
/// use istr::{Pool, PoolConfig, HashStrategy};
///
/// // Default configuration: keyed hashing, 16-slot table, 256-slot ring
/// let pool = Pool::new();
///
/// // Custom configuration for a test rig with deterministic hashing
/// let config = PoolConfig {
///     initial_capacity: 64,
///     ring_capacity: 4,
///     hash: HashStrategy::rolling_with(0),
/// };
/// let pool = Pool::with_config(config)?;
/// # Ok::<(), istr::PoolError>(())
/// ```
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Initial slot-table capacity
    ///
    /// Must be a power of two and at least [`MIN_TABLE_CAPACITY`].
    /// The table grows (and compacts tombstones) automatically once
    /// occupancy reaches capacity.
    ///
    /// Default: 16
    pub initial_capacity: usize,

    /// Pinning-ring capacity
    ///
    /// Number of most-recently-interned handles held with a strong
    /// reference. Must be a non-zero power of two. Larger rings keep hot
    /// values alive longer; smaller rings reclaim sooner.
    ///
    /// Default: 256
    pub ring_capacity: usize,

    /// Hash strategy for bucket placement
    ///
    /// [`HashStrategy::keyed`](crate::HashStrategy::keyed) (the default)
    /// resists algorithmic-complexity attacks via a 128-bit random key.
    /// [`HashStrategy::rolling`](crate::HashStrategy::rolling) is a fast
    /// unkeyed variant for low-stakes or debug use.
    pub hash: HashStrategy,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            initial_capacity: MIN_TABLE_CAPACITY,
            ring_capacity: DEFAULT_RING_CAPACITY,
            hash: HashStrategy::keyed(),
        }
    }
}

impl PoolConfig {
    /// Validate configuration parameters
    ///
    /// # Returns
    ///
    /// - `Ok(())` - Configuration is valid
    /// - `Err(PoolError::Configuration)` - A parameter is out of range
    pub fn validate(&self) -> Result<()> {
        if self.initial_capacity < MIN_TABLE_CAPACITY {
            return Err(PoolError::Configuration(format!(
                "initial_capacity {} is below the minimum of {}",
                self.initial_capacity, MIN_TABLE_CAPACITY
            )));
        }
        if !self.initial_capacity.is_power_of_two() {
            return Err(PoolError::Configuration(format!(
                "initial_capacity {} must be a power of two",
                self.initial_capacity
            )));
        }
        if self.ring_capacity == 0 {
            return Err(PoolError::Configuration(
                "ring_capacity must be non-zero".to_string(),
            ));
        }
        if !self.ring_capacity.is_power_of_two() {
            return Err(PoolError::Configuration(format!(
                "ring_capacity {} must be a power of two",
                self.ring_capacity
            )));
        }
        Ok(())
    }
}
