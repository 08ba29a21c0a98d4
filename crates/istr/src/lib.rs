//! # istr - Content-Addressed Interning Pool
//!
//! A pool that maps byte content to canonical, deduplicated handles.
//! Interning the same bytes twice returns the same handle, so equality
//! checks collapse to pointer comparisons and each distinct payload is
//! stored exactly once.
//!
//! ## Features
//!
//! - **Pointer-equality handles**: [`Istr`] compares and hashes by
//!   payload identity; content comparison happens once, at intern time
//! - **Weak storage**: the table holds payloads weakly, so content with
//!   no outstanding handle is reclaimed instead of accumulating forever
//! - **Recency pinning**: the most recently interned handles are held
//!   strongly in a small ring, keeping hot values alive between uses
//! - **Keyed hashing**: bucket placement uses SipHash-1-3 under a random
//!   128-bit key by default, with on-demand reseeding
//! - **Binary-clean content**: embedded zero bytes are ordinary data;
//!   lengths are stored, never scanned
//!
//! ## Quick Start
//!
//! ```rust
//! use istr::Pool;
//!
//! let mut pool = Pool::new();
//!
//! let alpha = pool.intern_str("alpha");
//! let again = pool.intern_str("alpha");
//! assert_eq!(alpha, again);
//!
//! assert_eq!(alpha.len(), 5);
//! assert_eq!(alpha.as_str(), Some("alpha"));
//!
//! let stats = pool.stats();
//! assert_eq!(stats.hits, 1);
//! assert_eq!(stats.misses, 1);
//! ```
//!
//! ## Architecture
//!
//! | Module | Role |
//! |--------|------|
//! | `pool` | Public facade: intern, lookup, reseed, stats |
//! | `table` | Weak slot table with coalesced collision chains |
//! | `hash` | Rolling and keyed hash strategies |
//! | `ring` | Strong pins for recently interned handles |
//! | `payload` | Owned content and the [`Istr`] handle |
//! | `config` | Tuning parameters and validation |
//! | `error` | Error taxonomy |
//! | `stats` | Counter snapshots |
//!
//! ## Threading
//!
//! A pool is single-threaded. Handles are reference-counted without
//! atomics, so neither [`Pool`] nor [`Istr`] implements `Send` or
//! `Sync`; the compiler rejects cross-thread use. Run one pool per
//! thread where concurrent interning is needed.

pub mod config;
pub mod error;
pub mod hash;
pub mod stats;

mod payload;
mod pool;
mod ring;
mod table;

pub use config::PoolConfig;
pub use error::{PoolError, Result};
pub use hash::HashStrategy;
pub use payload::Istr;
pub use pool::Pool;
pub use stats::PoolStats;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
