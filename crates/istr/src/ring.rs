//! Pinning Ring Module - Recency Pins for Hot Payloads
//!
//! The slot table holds its payloads weakly, so a payload with no
//! outside handle is reclaimed as soon as its last reference drops. The
//! ring counteracts that for hot values: every intern call pins the
//! returned handle in a fixed-size circular buffer, keeping the most
//! recently touched payloads strongly referenced even when the caller
//! discards its handle immediately.
//!
//! Each pin overwrites the oldest one, so a payload stays pinned for
//! exactly `capacity` subsequent intern calls (fewer if it is interned
//! again, which re-pins it in a fresh slot).

use crate::payload::Istr;

/// Circular buffer of strong references to recent handles
pub(crate) struct PinRing {
    pins: Vec<Option<Istr>>,
    cursor: usize,
    mask: usize,
}

impl PinRing {
    /// Create a ring with the given capacity
    ///
    /// Capacity must be a non-zero power of two; the owning pool
    /// validates this before construction.
    pub(crate) fn new(capacity: usize) -> Self {
        PinRing {
            pins: vec![None; capacity],
            cursor: 0,
            mask: capacity - 1,
        }
    }

    /// Pin a handle, evicting the oldest pin in its place
    pub(crate) fn pin(&mut self, handle: &Istr) {
        self.pins[self.cursor] = Some(handle.clone());
        self.cursor = (self.cursor + 1) & self.mask;
    }

    #[cfg(test)]
    fn pinned(&self, handle: &Istr) -> bool {
        self.pins
            .iter()
            .flatten()
            .any(|pinned| pinned.ptr_eq(handle))
    }
}
