//! The region: one contiguous address range with a monotone bump cursor.
//!
//! Bump allocation fits the region's write-once life cycle: objects are
//! promoted in and never reclaimed in place, so placement is a cursor
//! advance under a lock and nothing more. Membership tests read the bounds
//! without the lock.

use atomic::{Atomic, Ordering};
use std::sync::Mutex;

use crate::backing::BackingStore;
use crate::error::TierSpaceError;
use crate::util::Address;

/// Where a region is in its lifetime.
///
/// `Exhausted` is observational: the reserve contract stays arithmetic, so a
/// smaller request can still succeed after a larger one has failed. There is
/// no transition back to `Uninitialized`; a region lives until its owning
/// instance is dropped.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RegionState {
    /// No backing range yet. Every reservation fails; every membership test
    /// is false.
    Uninitialized,
    /// Backed and accepting reservations.
    Active,
    /// At least one reservation has been refused for lack of space.
    Exhausted,
}

/// The fields reserve/create mutate together, guarded by one lock.
struct RegionSync {
    /// The next free address. Equals `start` right after creation; never
    /// decreases; never exceeds `stop`.
    cursor: Address,
    state: RegionState,
}

/// Address-space bookkeeping for the region.
///
/// Locking discipline: `reserve` and `create` serialize on the internal
/// mutex. `contains` and the bounds accessors are lock-free; the bounds are
/// written once, inside `create`, and only read afterwards. Until then both
/// bounds are zero, which keeps every range test false.
pub struct RegionResource {
    start: Atomic<Address>,
    stop: Atomic<Address>,
    sync: Mutex<RegionSync>,
}

impl RegionResource {
    pub fn new() -> Self {
        RegionResource {
            start: Atomic::new(Address::ZERO),
            stop: Atomic::new(Address::ZERO),
            sync: Mutex::new(RegionSync {
                cursor: Address::ZERO,
                state: RegionState::Uninitialized,
            }),
        }
    }

    /// Obtain `extent` bytes from `backing` and publish the region bounds,
    /// with the cursor at the start of the range.
    ///
    /// Fails with [`TierSpaceError::RegionAlreadyExists`] if this resource
    /// already has a region; re-creation is rejected, never treated as a
    /// reset. A refusal from the backing store itself is fatal: the caller
    /// asked for a range the environment cannot provide, and there is no
    /// meaningful way to continue without one.
    pub(crate) fn create(
        &self,
        backing: &dyn BackingStore,
        extent: usize,
    ) -> Result<(), TierSpaceError> {
        let mut sync = self.sync.lock().unwrap();
        if sync.state != RegionState::Uninitialized {
            return Err(TierSpaceError::RegionAlreadyExists);
        }
        let start = match backing.reserve(extent) {
            Ok(start) => start,
            Err(e) => panic!("failed to reserve {} bytes of region backing: {}", extent, e),
        };
        self.start.store(start, Ordering::SeqCst);
        self.stop.store(start + extent, Ordering::SeqCst);
        sync.cursor = start;
        sync.state = RegionState::Active;
        debug!(
            "region created: [{}, {}) ({} bytes)",
            start,
            start + extent,
            extent
        );
        Ok(())
    }

    /// Bump-allocate `bytes` bytes. Returns the old cursor and advances the
    /// cursor by exactly `bytes`; a refused reservation leaves the cursor
    /// untouched. An uncreated region has zero capacity, so every
    /// reservation on it fails.
    pub fn reserve(&self, bytes: usize) -> Result<Address, TierSpaceError> {
        let mut sync = self.sync.lock().unwrap();
        if sync.state == RegionState::Uninitialized {
            return Err(TierSpaceError::OutOfRegionSpace);
        }
        let stop = self.stop.load(Ordering::Relaxed);
        match sync.cursor.checked_add(bytes) {
            Some(new_cursor) if new_cursor <= stop => {
                let result = sync.cursor;
                sync.cursor = new_cursor;
                Ok(result)
            }
            _ => {
                if sync.state == RegionState::Active {
                    sync.state = RegionState::Exhausted;
                    debug!(
                        "region exhausted: {} bytes requested, {} bytes left",
                        bytes,
                        stop - sync.cursor
                    );
                }
                Err(TierSpaceError::OutOfRegionSpace)
            }
        }
    }

    /// Is `addr` inside the region? `start <= addr < stop`, lock-free.
    pub fn contains(&self, addr: Address) -> bool {
        addr >= self.start.load(Ordering::Relaxed) && addr < self.stop.load(Ordering::Relaxed)
    }

    /// The next free address.
    pub fn cursor(&self) -> Address {
        self.sync.lock().unwrap().cursor
    }

    pub fn state(&self) -> RegionState {
        self.sync.lock().unwrap().state
    }

    pub fn is_created(&self) -> bool {
        self.state() != RegionState::Uninitialized
    }

    /// The first address of the region (zero if uncreated).
    pub fn start(&self) -> Address {
        self.start.load(Ordering::Relaxed)
    }

    /// The first address past the region (zero if uncreated).
    pub fn stop(&self) -> Address {
        self.stop.load(Ordering::Relaxed)
    }

    /// The region size in bytes.
    pub fn extent(&self) -> usize {
        self.stop() - self.start()
    }

    /// Bytes not yet reserved.
    pub fn free_bytes(&self) -> usize {
        let sync = self.sync.lock().unwrap();
        self.stop.load(Ordering::Relaxed) - sync.cursor
    }
}

impl Default for RegionResource {
    fn default() -> Self {
        Self::new()
    }
}
