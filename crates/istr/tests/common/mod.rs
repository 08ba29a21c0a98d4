//! Shared test fixtures and assertion helpers
//!
//! Integration tests construct pools through these helpers so that
//! hashing is deterministic where a test needs to reason about bucket
//! placement, and so that failure messages carry enough context to
//! diagnose without re-running.

// Each integration test binary compiles this module separately and
// uses a different subset of the helpers.
#![allow(dead_code)]

use istr::{HashStrategy, Istr, Pool, PoolConfig};

/// Pool with deterministic rolling hashing and the default ring
///
/// Bucket placement is reproducible across runs, which lets tests
/// craft collision chains by brute force.
pub fn deterministic_pool() -> Pool {
    Pool::with_config(PoolConfig {
        initial_capacity: 16,
        ring_capacity: 256,
        hash: HashStrategy::rolling_with(0),
    })
    .expect("deterministic test config must validate")
}

/// Pool whose ring holds only `ring` pins
///
/// Small rings make reclamation observable with a handful of interns.
pub fn tiny_ring_pool(ring: usize) -> Pool {
    Pool::with_config(PoolConfig {
        initial_capacity: 16,
        ring_capacity: ring,
        hash: HashStrategy::rolling_with(0),
    })
    .expect("tiny-ring test config must validate")
}

/// The hash strategy used by the deterministic fixtures
pub fn fixture_strategy() -> HashStrategy {
    HashStrategy::rolling_with(0)
}

/// Find `n` distinct keys that share one home slot
///
/// Generates candidate keys and groups them by `hash & (capacity - 1)`
/// until some slot has collected `n` of them.
pub fn colliding_keys(strategy: &HashStrategy, capacity: usize, n: usize) -> Vec<String> {
    let mut buckets: Vec<Vec<String>> = vec![Vec::new(); capacity];
    for i in 0u64.. {
        let key = format!("collide{}", i);
        let home = (strategy.hash(key.as_bytes()) as usize) & (capacity - 1);
        buckets[home].push(key);
        if buckets[home].len() == n {
            return buckets.swap_remove(home);
        }
    }
    unreachable!("candidate space is unbounded");
}

/// Assert two handles are the same interned payload
///
/// **Bug this finds:** deduplication failure, where identical content
/// produces distinct payloads and pointer equality silently breaks.
pub fn assert_same_handle(a: &Istr, b: &Istr) {
    assert!(
        a.ptr_eq(b),
        "expected one payload, got two: {:?} vs {:?}",
        a,
        b
    );
}

/// Assert two handles are different interned payloads
///
/// **Bug this finds:** false merging, where distinct content collapses
/// into one payload (a hash-only comparison with no content check).
pub fn assert_distinct_handles(a: &Istr, b: &Istr) {
    assert!(
        !a.ptr_eq(b),
        "expected distinct payloads, both are {:?}",
        a
    );
}

/// Assert a pool resolves `bytes` to exactly `expected`
///
/// **Bug this finds:** chain breakage, where an entry still alive
/// becomes unreachable after an unrelated insert, rehash, or death.
pub fn assert_resolves(pool: &Pool, bytes: &[u8], expected: &Istr) {
    match pool.lookup(bytes) {
        Some(found) => assert!(
            found.ptr_eq(expected),
            "lookup of {:?} found a different payload",
            String::from_utf8_lossy(bytes)
        ),
        None => panic!(
            "lookup of {:?} found nothing, expected {:?}",
            String::from_utf8_lossy(bytes),
            expected
        ),
    }
}
