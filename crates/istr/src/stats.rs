//! Statistics Module - Pool Observability Counters
//!
//! Cheap monotonic counters plus two point-in-time gauges, snapshotted
//! through [`Pool::stats`](crate::Pool::stats). Counting happens inline
//! on the intern path; there is no sampling and no background work.

/// Point-in-time statistics snapshot for a pool
///
/// # Examples
///
/// ```rust
/// use istr::Pool;
///
/// let mut pool = Pool::new();
/// pool.intern_str("a");
/// pool.intern_str("a");
///
/// let stats = pool.stats();
/// assert_eq!(stats.hits, 1);
/// assert_eq!(stats.misses, 1);
/// assert_eq!(stats.live, 1);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PoolStats {
    /// Entries whose payload is currently alive
    pub live: usize,
    /// Current slot-table capacity
    pub capacity: usize,
    /// Intern calls resolved to an existing payload
    pub hits: u64,
    /// Intern calls that allocated a new payload
    pub misses: u64,
    /// Chain hops taken during lookups past the home slot
    pub collisions: u64,
    /// Foreign occupants moved out of their non-home slot
    pub relocations: u64,
    /// Table rebuilds (growth or reseed)
    pub rehashes: u64,
    /// Hash key refreshes
    pub reseeds: u64,
}

impl PoolStats {
    /// Fraction of intern calls that hit an existing payload
    ///
    /// Returns 0.0 before any intern call.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Fraction of slots holding a live entry
    ///
    /// Returns 0.0 for a pool with no capacity (which cannot be
    /// constructed, but the division stays total).
    pub fn load_factor(&self) -> f64 {
        if self.capacity == 0 {
            0.0
        } else {
            self.live as f64 / self.capacity as f64
        }
    }
}

/// Counters owned by the slot table
///
/// Merged with the pool-level hit/miss counters into a [`PoolStats`]
/// snapshot on demand.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct TableStats {
    pub(crate) collisions: u64,
    pub(crate) relocations: u64,
    pub(crate) rehashes: u64,
    pub(crate) reseeds: u64,
}
