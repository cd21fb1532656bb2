use std::sync::atomic::{AtomicUsize, Ordering};

/// Monotone counters describing what a [`crate::TierSpace`] instance has
/// done. Components update the fields directly; embedders read them through
/// the accessors, typically for an end-of-run report alongside the
/// collector's own GC statistics.
///
/// All counters use relaxed ordering: they are observational and never
/// synchronize anything.
#[derive(Default)]
pub struct GlobalState {
    /// Number of objects successfully promoted into the region.
    pub(crate) objects_promoted: AtomicUsize,
    /// Number of bytes successfully promoted into the region.
    pub(crate) bytes_promoted: AtomicUsize,
    /// Number of reservations refused because the region was too full
    /// (or not created yet).
    pub(crate) failed_reservations: AtomicUsize,
    /// Number of roots pushed onto the root stack.
    pub(crate) roots_pushed: AtomicUsize,
    /// Number of roots handed back to the tracer.
    pub(crate) roots_popped: AtomicUsize,
}

impl GlobalState {
    pub fn get_objects_promoted(&self) -> usize {
        self.objects_promoted.load(Ordering::Relaxed)
    }

    pub fn get_bytes_promoted(&self) -> usize {
        self.bytes_promoted.load(Ordering::Relaxed)
    }

    pub fn get_failed_reservations(&self) -> usize {
        self.failed_reservations.load(Ordering::Relaxed)
    }

    pub fn get_roots_pushed(&self) -> usize {
        self.roots_pushed.load(Ordering::Relaxed)
    }

    pub fn get_roots_popped(&self) -> usize {
        self.roots_popped.load(Ordering::Relaxed)
    }

    /// Record one successful promotion of `bytes` bytes.
    pub(crate) fn record_promotion(&self, bytes: usize) {
        self.objects_promoted.fetch_add(1, Ordering::Relaxed);
        self.bytes_promoted.fetch_add(bytes, Ordering::Relaxed);
    }
}
