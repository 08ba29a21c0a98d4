//! Hash Provider - Seeded Content Hashing
//!
//! Computes bucket hashes over payload content. Two interchangeable
//! strategies are supported:
//!
//! - [`HashStrategy::Rolling`]: a fast multiply-xor hash over at most the
//!   first 128 bytes of content, folding in the length and a seed. Cheap
//!   and predictable; intended for low-stakes or debug use, and for tests
//!   that need to craft deterministic collision chains.
//! - [`HashStrategy::Keyed`]: SipHash-1-3 under a 128-bit key drawn from
//!   the OS randomness source. This is the default; an attacker who
//!   cannot observe the key cannot force degenerate bucket chains.
//!
//! [`HashStrategy::reseed`] draws a fresh key. Reseeding changes bucket
//! placement for every entry, so the owning table must rehash afterwards;
//! payload identities are unaffected.
//!
//! A hash of 0 is remapped to a fixed non-zero sentinel. The value 0 is
//! reserved in derived arithmetic (an empty slot reads as "no hash"), so
//! it must never escape the provider.

use rand::rngs::OsRng;
use rand::RngCore;
use siphasher::sip::SipHasher13;
use std::hash::Hasher;

/// Replacement for a computed hash of 0
pub const ZERO_SENTINEL: u64 = 1234567;

/// Multiplier of the rolling hash recurrence
const ROLLING_PRIME: u64 = 1000003;

/// Rolling hash reads at most this many leading bytes
///
/// Long payloads hash in O(1); ties beyond the prefix are resolved by the
/// table's byte-for-byte comparison, not by the hash.
const ROLLING_PREFIX: usize = 128;

/// Hash strategy for bucket placement
///
/// Carries the current seed/key material. Cheap to copy; the pool owns
/// the authoritative instance and mutates it on reseed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashStrategy {
    /// Multiply-xor rolling hash with a folded-in seed
    Rolling {
        /// Seed xored into the initial state
        seed: u64,
    },
    /// SipHash-1-3 under a 128-bit key
    Keyed {
        /// First half of the key
        k0: u64,
        /// Second half of the key
        k1: u64,
    },
}

impl HashStrategy {
    /// Rolling strategy with a seed drawn from the OS randomness source
    pub fn rolling() -> Self {
        HashStrategy::Rolling {
            seed: OsRng.next_u64(),
        }
    }

    /// Rolling strategy with a caller-chosen seed
    ///
    /// Deterministic; intended for tests that need reproducible bucket
    /// placement (e.g. crafting collision chains).
    pub fn rolling_with(seed: u64) -> Self {
        HashStrategy::Rolling { seed }
    }

    /// Keyed strategy with a fresh 128-bit key from the OS randomness source
    pub fn keyed() -> Self {
        HashStrategy::Keyed {
            k0: OsRng.next_u64(),
            k1: OsRng.next_u64(),
        }
    }

    /// Keyed strategy with a caller-chosen key
    pub fn keyed_with(k0: u64, k1: u64) -> Self {
        HashStrategy::Keyed { k0, k1 }
    }

    /// Hash a byte buffer
    ///
    /// Deterministic for a fixed key/seed. Never returns 0: a computed 0
    /// (including the empty input under the rolling strategy) is remapped
    /// to [`ZERO_SENTINEL`].
    pub fn hash(&self, bytes: &[u8]) -> u64 {
        let h = match *self {
            HashStrategy::Rolling { seed } => rolling_hash(seed, bytes),
            HashStrategy::Keyed { k0, k1 } => {
                let mut hasher = SipHasher13::new_with_keys(k0, k1);
                hasher.write(bytes);
                hasher.finish()
            }
        };
        if h == 0 {
            ZERO_SENTINEL
        } else {
            h
        }
    }

    /// Draw fresh key material from the OS randomness source
    ///
    /// The strategy kind is preserved; only the seed/key changes. The
    /// caller owns the follow-up rehash.
    pub fn reseed(&mut self) {
        match self {
            HashStrategy::Rolling { seed } => *seed = OsRng.next_u64(),
            HashStrategy::Keyed { k0, k1 } => {
                *k0 = OsRng.next_u64();
                *k1 = OsRng.next_u64();
            }
        }
    }
}

/// Multiply-xor rolling hash over the leading prefix
///
/// Initial state folds the first byte, the full length, and the seed;
/// each prefix byte then applies `h = h * 1000003 ^ byte`.
fn rolling_hash(seed: u64, bytes: &[u8]) -> u64 {
    if bytes.is_empty() {
        return 0;
    }
    let mut h = ((bytes[0] as u64) << 7) ^ (bytes.len() as u64) ^ seed;
    for &b in bytes.iter().take(ROLLING_PREFIX) {
        h = h.wrapping_mul(ROLLING_PRIME) ^ (b as u64);
    }
    h
}
