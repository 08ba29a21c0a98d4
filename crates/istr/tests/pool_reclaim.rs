//! Reclamation and tombstone behavior
//!
//! The table holds payloads weakly; these tests drive payloads through
//! death and observe that lookups miss them, chains through their slots
//! survive, and re-interning produces a valid fresh payload.

mod common;

use common::{assert_resolves, colliding_keys, fixture_strategy, tiny_ring_pool};

// ===========================================================================
// Ring pinning and eviction
// ===========================================================================

/// **Bug this finds:** the ring failing to pin, so a payload with no
/// caller handle dies immediately instead of surviving recent use.
#[test]
fn test_recent_intern_survives_without_caller_handle() {
    let mut pool = tiny_ring_pool(4);
    pool.intern_str("hot");
    pool.intern_str("other");
    assert!(pool.lookup(b"hot").is_some());
}

/// **Bug this finds:** pins never being evicted, which would make the
/// pool hold every payload forever.
#[test]
fn test_eviction_releases_unreferenced_payload() {
    let mut pool = tiny_ring_pool(4);
    pool.intern_str("doomed");
    for i in 0..4 {
        pool.intern_str(&format!("evictor-{}", i));
    }
    assert!(pool.lookup(b"doomed").is_none());
    assert_eq!(pool.live_count(), 4);
}

/// **Bug this finds:** a hit that skips re-pinning, letting a hot
/// payload die even though it was just interned again.
#[test]
fn test_hit_repins() {
    let mut pool = tiny_ring_pool(4);
    pool.intern_str("hot");
    for i in 0..3 {
        pool.intern_str(&format!("mid-{}", i));
    }
    // This hit claims a fresh pin, so the following evictions hit the
    // older pins first.
    pool.intern_str("hot");
    for i in 0..3 {
        pool.intern_str(&format!("late-{}", i));
    }
    assert!(pool.lookup(b"hot").is_some());
}

#[test]
fn test_caller_handle_outlives_eviction() {
    let mut pool = tiny_ring_pool(1);
    let held = pool.intern_str("held");
    for i in 0..4 {
        pool.intern_str(&format!("churn-{}", i));
    }
    assert_resolves(&pool, b"held", &held);

    drop(held);
    assert!(pool.lookup(b"held").is_none());
}

// ===========================================================================
// Tombstones in chains
// ===========================================================================

/// **Bug this finds:** a dead slot breaking its chain, making entries
/// past the tombstone unreachable.
#[test]
fn test_chain_survives_middle_death() {
    let mut pool = tiny_ring_pool(1);
    let keys = colliding_keys(&fixture_strategy(), pool.capacity(), 4);

    let mut handles: Vec<_> = keys.iter().map(|k| pool.intern_str(k)).collect();

    // Drop the second chain member; the ring (capacity 1) only pins the
    // last intern, so the payload dies now.
    handles.remove(1);
    assert!(pool.lookup(keys[1].as_bytes()).is_none());

    for (idx, handle) in [0usize, 2, 3].into_iter().zip(&handles) {
        assert_resolves(&pool, keys[idx].as_bytes(), handle);
    }
}

/// **Bug this finds:** a tombstoned home slot rejecting reuse, leaking
/// slots until an unnecessary rebuild.
#[test]
fn test_reintern_after_death() {
    let mut pool = tiny_ring_pool(1);
    let keys = colliding_keys(&fixture_strategy(), pool.capacity(), 3);

    let mut handles: Vec<_> = keys.iter().map(|k| pool.intern_str(k)).collect();
    handles.remove(0);
    assert!(pool.lookup(keys[0].as_bytes()).is_none());

    let fresh = pool.intern_str(&keys[0]);
    assert_eq!(fresh.as_bytes(), keys[0].as_bytes());
    assert_resolves(&pool, keys[0].as_bytes(), &fresh);
    for (key, handle) in keys[1..].iter().zip(&handles) {
        assert_resolves(&pool, key.as_bytes(), handle);
    }
}

// ===========================================================================
// Reclamation across rebuilds
// ===========================================================================

/// **Bug this finds:** dead entries surviving a rebuild, or live ones
/// lost while tombstones are compacted away.
#[test]
fn test_reseed_compacts_dead_entries() {
    let mut pool = tiny_ring_pool(1);
    let mut handles: Vec<_> = (0..10)
        .map(|i| pool.intern_str(&format!("life-{}", i)))
        .collect();
    handles.truncate(3);
    // The single ring pin still holds "life-9"; repin a survivor so
    // only the three held payloads stay alive.
    pool.intern_str("life-0");

    pool.reseed_hash();

    assert_eq!(pool.live_count(), 3);
    for (i, handle) in handles.iter().enumerate() {
        assert_resolves(&pool, format!("life-{}", i).as_bytes(), handle);
    }
    for i in 3..10 {
        assert!(pool.lookup(format!("life-{}", i).as_bytes()).is_none());
    }
}
