//! Slot Table Module - Weak Open-Addressed Table with Coalesced Chaining
//!
//! The table maps content hashes to weakly-held payloads. Collisions are
//! resolved by coalesced chaining: every slot carries an optional link to
//! the next slot in its chain, and overflow entries live in ordinary
//! table slots claimed from a free cursor that scans downward from the
//! top. The home slot of a payload (its hash masked by capacity) is
//! always the anchor of that payload's chain.
//!
//! Three facts keep the structure consistent without a deletion routine:
//!
//! - **Home anchoring.** An entry whose home is slot `h` is reachable by
//!   walking the chain that starts at `h`. If a freshly claimed occupant
//!   would break this (a foreign entry sitting in someone else's home
//!   slot), the foreigner is moved out and its chain repaired first.
//! - **Live tombstones.** When a payload dies, its weak reference reads
//!   as dead but the slot keeps its entry and chain link. Lookups skip
//!   it; chains through it stay walkable. Tombstones are only dropped
//!   wholesale when the table is rebuilt.
//! - **Monotonic occupancy.** `count` tracks slots that have ever held an
//!   entry since the last rebuild. Growth triggers before occupancy can
//!   reach capacity, so a free slot always exists when one is claimed.

use std::rc::{Rc, Weak};

use crate::config::MIN_TABLE_CAPACITY;
use crate::hash::HashStrategy;
use crate::payload::Payload;
use crate::stats::TableStats;

/// Occupied-slot contents
///
/// The length is stored alongside the weak reference so lookups can
/// reject mismatched candidates without upgrading, and so a dead entry
/// still reports how long its payload was.
struct SlotEntry {
    payload: Weak<Payload>,
    len: usize,
}

/// One table slot: optional entry plus optional chain link
///
/// `next` outlives the entry's payload: a dead entry keeps its link so
/// chains that pass through the slot remain walkable.
#[derive(Default)]
struct Slot {
    entry: Option<SlotEntry>,
    next: Option<usize>,
}

/// Weak slot table with coalesced collision chains
pub(crate) struct SlotTable {
    slots: Vec<Slot>,
    /// Slots that have held an entry since the last rebuild
    count: usize,
    /// Highest index at which a free slot may still exist
    free_cursor: usize,
    hash: HashStrategy,
    stats: TableStats,
}

impl SlotTable {
    /// Create a table with the given capacity
    ///
    /// Capacity must be a non-zero power of two; the owning pool
    /// validates this before construction.
    pub(crate) fn new(capacity: usize, hash: HashStrategy) -> Self {
        let mut slots = Vec::new();
        slots.resize_with(capacity, Slot::default);
        SlotTable {
            slots,
            count: 0,
            free_cursor: capacity - 1,
            hash,
            stats: TableStats::default(),
        }
    }

    /// Home slot index for a byte buffer
    fn home_index(&self, bytes: &[u8]) -> usize {
        (self.hash.hash(bytes) as usize) & (self.slots.len() - 1)
    }

    /// Walk the chain anchored at the home slot of `bytes`
    ///
    /// Returns the matching live payload, if any, and the number of
    /// chain hops taken past the home slot.
    fn walk(&self, bytes: &[u8]) -> (Option<Rc<Payload>>, u64) {
        let mut hops = 0;
        let mut cursor = Some(self.home_index(bytes));
        while let Some(i) = cursor {
            let slot = &self.slots[i];
            if let Some(entry) = &slot.entry {
                if entry.len == bytes.len() {
                    if let Some(payload) = entry.payload.upgrade() {
                        if payload.logical() == bytes {
                            return (Some(payload), hops);
                        }
                    }
                }
            }
            cursor = slot.next;
            if cursor.is_some() {
                hops += 1;
            }
        }
        (None, hops)
    }

    /// Find the live payload for `bytes`, counting chain hops
    pub(crate) fn lookup(&mut self, bytes: &[u8]) -> Option<Rc<Payload>> {
        let (found, hops) = self.walk(bytes);
        self.stats.collisions += hops;
        found
    }

    /// Find the live payload for `bytes` without touching counters
    pub(crate) fn probe(&self, bytes: &[u8]) -> Option<Rc<Payload>> {
        self.walk(bytes).0
    }

    /// Insert a payload that lookup has just failed to find
    ///
    /// Grows the table first if occupancy would reach capacity, so the
    /// placement below always finds a free slot when it needs one.
    pub(crate) fn insert(&mut self, payload: &Rc<Payload>) {
        if self.count + 1 >= self.slots.len() {
            self.rehash();
        }
        self.insert_at_home(payload);
    }

    /// Place a payload so its home slot anchors its chain
    ///
    /// Mirrors the three occupancy cases of the home slot:
    ///
    /// 1. Empty or dead: the entry is written in place. A dead entry's
    ///    chain link is preserved, so chains through the slot survive.
    /// 2. Live occupant anchored here: the new entry goes to a free slot
    ///    and is spliced into the chain right behind the home slot.
    /// 3. Live foreign occupant: the occupant is moved to a free slot,
    ///    its own chain's predecessor is repointed at the new position,
    ///    and the new entry takes the home slot as a fresh anchor.
    fn insert_at_home(&mut self, payload: &Rc<Payload>) {
        let home = self.home_index(payload.logical());
        let new_entry = SlotEntry {
            payload: Rc::downgrade(payload),
            len: payload.len(),
        };

        let occupant = self
            .slots[home]
            .entry
            .as_ref()
            .and_then(|e| e.payload.upgrade());

        match occupant {
            None => {
                let was_empty = self.slots[home].entry.is_none();
                self.slots[home].entry = Some(new_entry);
                if was_empty {
                    self.count += 1;
                }
            }
            Some(occ) => {
                let free = self.claim_free_slot();
                let occ_home = self.home_index(occ.logical());
                if occ_home == home {
                    self.slots[free].entry = Some(new_entry);
                    self.slots[free].next = self.slots[home].next;
                    self.slots[home].next = Some(free);
                } else {
                    let pred = self.chain_predecessor(occ_home, home);
                    let moved_entry = self.slots[home].entry.take();
                    let moved_next = self.slots[home].next.take();
                    self.slots[free].entry = moved_entry;
                    self.slots[free].next = moved_next;
                    self.slots[pred].next = Some(free);
                    self.slots[home].entry = Some(new_entry);
                    self.stats.relocations += 1;
                    log::trace!(
                        "relocated foreign occupant from slot {} to slot {}",
                        home,
                        free
                    );
                }
                self.count += 1;
            }
        }
    }

    /// Claim a slot with no entry, scanning downward from the cursor
    ///
    /// Every slot above the cursor is occupied, and entries never leave
    /// their slot between rebuilds, so the scan finds a free slot iff
    /// one exists. The growth check in [`SlotTable::insert`] guarantees
    /// one does.
    fn claim_free_slot(&mut self) -> usize {
        let mut i = self.free_cursor;
        while self.slots[i].entry.is_some() {
            assert!(i > 0, "slot table has no free slot below the cursor");
            i -= 1;
        }
        self.free_cursor = i;
        i
    }

    /// Index of the chain node whose link points at `target`
    ///
    /// Walks the chain anchored at `start`. The caller only asks this
    /// for a slot known to sit in that chain, so a missing link means
    /// the table's invariants are broken.
    fn chain_predecessor(&self, start: usize, target: usize) -> usize {
        let mut i = start;
        loop {
            match self.slots[i].next {
                Some(n) if n == target => return i,
                Some(n) => i = n,
                None => panic!("slot chain linkage is corrupt"),
            }
        }
    }

    /// Rebuild the table, dropping dead entries
    ///
    /// The new capacity is twice the number of surviving payloads,
    /// rounded up to a power of two, never below the minimum. Survivors
    /// are held strongly for the duration of the rebuild so none can
    /// die mid-flight.
    fn rehash(&mut self) {
        let survivors: Vec<Rc<Payload>> = self
            .slots
            .iter()
            .filter_map(|s| s.entry.as_ref()?.payload.upgrade())
            .collect();
        let new_cap = (survivors.len() * 2)
            .max(MIN_TABLE_CAPACITY)
            .next_power_of_two();
        log::debug!(
            "rehashing: {} live of {} occupied, capacity {} -> {}",
            survivors.len(),
            self.count,
            self.slots.len(),
            new_cap
        );
        self.slots.clear();
        self.slots.resize_with(new_cap, Slot::default);
        self.count = 0;
        self.free_cursor = new_cap - 1;
        self.stats.rehashes += 1;
        for payload in &survivors {
            self.insert_at_home(payload);
        }
    }

    /// Replace the hash key and rebuild
    ///
    /// Every live entry moves to its new home; handles held by callers
    /// are unaffected.
    pub(crate) fn reseed(&mut self) {
        self.hash.reseed();
        self.stats.reseeds += 1;
        log::debug!("reseeding hash key and rebuilding table");
        self.rehash();
    }

    /// Number of entries whose payload is currently alive
    pub(crate) fn live_count(&self) -> usize {
        self.slots
            .iter()
            .filter_map(|s| s.entry.as_ref())
            .filter(|e| e.payload.strong_count() > 0)
            .count()
    }

    /// Current slot capacity
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn stats(&self) -> TableStats {
        self.stats
    }
}
