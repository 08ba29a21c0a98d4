//! Pool Module - The Public Interning Facade
//!
//! [`Pool`] ties the pieces together: the weak slot table resolves
//! content to canonical payloads, the pinning ring keeps recent payloads
//! alive, and hit/miss counters feed the statistics snapshot.
//!
//! The pool is single-threaded by construction. It owns `Rc`-based
//! handles, so the compiler already refuses to send a pool or a handle
//! across threads; callers that want cross-thread interning run one
//! pool per thread.

use std::fmt;
use std::rc::Rc;

use crate::config::PoolConfig;
use crate::error::Result;
use crate::payload::{Istr, Payload};
use crate::ring::PinRing;
use crate::stats::PoolStats;
use crate::table::SlotTable;

/// Content-addressed interning pool
///
/// Interning the same bytes twice yields the same handle; handle
/// equality is pointer equality. Payloads stay alive while any handle
/// (the caller's or a ring pin) references them, and their table slots
/// decay into tombstones once the last handle drops.
///
/// # Examples
///
/// ```rust
/// use istr::Pool;
///
/// let mut pool = Pool::new();
///
/// let a = pool.intern_str("request-id");
/// let b = pool.intern_bytes(b"request-id");
/// assert_eq!(a, b);
///
/// let other = pool.intern_str("other");
/// assert_ne!(a, other);
/// ```
pub struct Pool {
    table: SlotTable,
    ring: PinRing,
    hits: u64,
    misses: u64,
}

impl Pool {
    /// Create a pool with the default configuration
    pub fn new() -> Self {
        // The default configuration is valid by compile-time assertion
        // on its constants, so construction cannot fail.
        match Pool::with_config(PoolConfig::default()) {
            Ok(pool) => pool,
            Err(_) => unreachable!("default pool configuration is always valid"),
        }
    }

    /// Create a pool with a custom configuration
    ///
    /// # Returns
    ///
    /// - `Ok(Pool)` - Pool created successfully
    /// - `Err(PoolError::Configuration)` - A parameter is out of range
    pub fn with_config(config: PoolConfig) -> Result<Self> {
        config.validate()?;
        log::debug!(
            "creating pool: capacity {}, ring {}",
            config.initial_capacity,
            config.ring_capacity
        );
        Ok(Pool {
            table: SlotTable::new(config.initial_capacity, config.hash),
            ring: PinRing::new(config.ring_capacity),
            hits: 0,
            misses: 0,
        })
    }

    /// Intern a byte buffer, returning its canonical handle
    ///
    /// On a hit the existing payload is returned; on a miss the bytes
    /// are copied into a fresh payload and registered. Either way the
    /// handle is pinned in the recency ring before it is returned.
    ///
    /// Embedded zero bytes are ordinary content; the stored length, not
    /// a terminator scan, delimits the payload.
    pub fn intern_bytes(&mut self, bytes: &[u8]) -> Istr {
        if let Some(existing) = self.table.lookup(bytes) {
            self.hits += 1;
            let handle = Istr::from_rc(existing);
            self.ring.pin(&handle);
            return handle;
        }
        self.misses += 1;
        // Allocate before touching the table: a payload exists in full
        // before any slot refers to it.
        let payload = Payload::from_bytes(bytes);
        self.table.insert(&payload);
        let handle = Istr::from_rc(payload);
        self.ring.pin(&handle);
        handle
    }

    /// Intern a string slice
    pub fn intern_str(&mut self, s: &str) -> Istr {
        self.intern_bytes(s.as_bytes())
    }

    /// Intern formatted output
    ///
    /// Formats into a transient buffer, then interns the result. The
    /// [`intern_fmt!`](crate::intern_fmt) macro wraps this with
    /// `format_args!` so call sites read like `format!`.
    pub fn intern_fmt(&mut self, args: fmt::Arguments<'_>) -> Istr {
        let formatted = fmt::format(args);
        self.intern_bytes(formatted.as_bytes())
    }

    /// Find the handle for `bytes` without interning
    ///
    /// Read-only: a miss does not allocate, and a hit is not pinned in
    /// the recency ring, so this never extends a payload's lifetime
    /// beyond the returned handle's own.
    pub fn lookup(&self, bytes: &[u8]) -> Option<Istr> {
        self.table.probe(bytes).map(Istr::from_rc)
    }

    /// O(1) length of an interned handle's content
    ///
    /// The length was recorded at intern time; embedded zero bytes do
    /// not truncate it.
    pub fn length_of(&self, handle: &Istr) -> usize {
        handle.len()
    }

    /// Draw a fresh hash key and rebuild the table
    ///
    /// Bucket placement changes for every entry; handles and content
    /// are untouched. Useful when bucket placement may have become
    /// observable to an untrusted input source.
    pub fn reseed_hash(&mut self) {
        self.table.reseed();
    }

    /// Number of live interned payloads
    pub fn live_count(&self) -> usize {
        self.table.live_count()
    }

    /// Current slot-table capacity
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Snapshot of the pool's counters and gauges
    pub fn stats(&self) -> PoolStats {
        let table = self.table.stats();
        PoolStats {
            live: self.table.live_count(),
            capacity: self.table.capacity(),
            hits: self.hits,
            misses: self.misses,
            collisions: table.collisions,
            relocations: table.relocations,
            rehashes: table.rehashes,
            reseeds: table.reseeds,
        }
    }
}

impl Default for Pool {
    fn default() -> Self {
        Pool::new()
    }
}

impl fmt::Debug for Pool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pool")
            .field("live", &self.table.live_count())
            .field("capacity", &self.table.capacity())
            .field("hits", &self.hits)
            .field("misses", &self.misses)
            .finish()
    }
}

/// Intern formatted output into a pool
///
/// Expands to a [`Pool::intern_fmt`] call; arguments are anything
/// `format!` accepts.
///
/// # Examples
///
/// ```rust
/// use istr::{intern_fmt, Pool};
///
/// let mut pool = Pool::new();
/// let a = intern_fmt!(pool, "job-{}", 7);
/// let b = pool.intern_str("job-7");
/// assert_eq!(a, b);
/// ```
#[macro_export]
macro_rules! intern_fmt {
    ($pool:expr, $($arg:tt)*) => {
        $pool.intern_fmt(core::format_args!($($arg)*))
    };
}

// Rc-based handles keep the pool thread-local.
static_assertions::assert_not_impl_any!(Pool: Send, Sync);
static_assertions::assert_not_impl_any!(Istr: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::HashStrategy;

    fn small_pool() -> Pool {
        Pool::with_config(PoolConfig {
            initial_capacity: 16,
            ring_capacity: 4,
            hash: HashStrategy::rolling_with(0),
        })
        .unwrap()
    }

    #[test]
    fn test_intern_identity() {
        let mut pool = Pool::new();
        let a = pool.intern_str("x");
        let b = pool.intern_str("x");
        assert_eq!(a, b);
        assert!(a.ptr_eq(&b));
    }

    #[test]
    fn test_hit_miss_counters() {
        let mut pool = small_pool();
        pool.intern_str("a");
        pool.intern_str("b");
        pool.intern_str("a");
        let stats = pool.stats();
        assert_eq!(stats.misses, 2);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.live, 2);
    }

    #[test]
    fn test_lookup_without_interning() {
        let mut pool = small_pool();
        assert!(pool.lookup(b"ghost").is_none());
        let h = pool.intern_bytes(b"ghost");
        let found = pool.lookup(b"ghost").unwrap();
        assert_eq!(h, found);
        // The probe neither hit nor missed.
        assert_eq!(pool.stats().hits, 0);
        assert_eq!(pool.stats().misses, 1);
    }

    #[test]
    fn test_length_of_embedded_zeros() {
        let mut pool = small_pool();
        let h = pool.intern_bytes(&[0, 1, 0, 2, 0]);
        assert_eq!(pool.length_of(&h), 5);
        assert_eq!(h.as_bytes(), &[0, 1, 0, 2, 0]);
    }

    #[test]
    fn test_intern_fmt_matches_plain() {
        let mut pool = small_pool();
        let a = intern_fmt!(pool, "{}-{}", "part", 42);
        let b = pool.intern_str("part-42");
        assert_eq!(a, b);
    }

    #[test]
    fn test_reseed_keeps_handles_valid() {
        let mut pool = small_pool();
        let before = pool.intern_str("stable");
        pool.reseed_hash();
        let after = pool.intern_str("stable");
        assert_eq!(before, after);
        assert_eq!(pool.stats().reseeds, 1);
    }

    #[test]
    fn test_ring_keeps_recent_alive() {
        let mut pool = small_pool();
        // No outside handle is held, yet the ring pin keeps the payload
        // alive across the next few interns.
        pool.intern_str("transient");
        pool.intern_str("filler");
        assert!(pool.lookup(b"transient").is_some());
    }

    #[test]
    fn test_ring_eviction_releases() {
        let mut pool = small_pool();
        pool.intern_str("doomed");
        for i in 0..4 {
            intern_fmt!(pool, "filler-{}", i);
        }
        assert!(pool.lookup(b"doomed").is_none());
    }
}
