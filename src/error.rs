//! Failure kinds surfaced to the collector.

use std::fmt;

/// The errors this crate reports to its caller. All of them are synchronous
/// local returns: nothing is retried internally, and no error is degraded
/// into a default value. The collector is the only party with enough context
/// to decide recovery (fall back to primary-heap placement, trigger a fuller
/// collection, or treat the condition as fatal).
///
/// The enum is fieldless and `Copy` so it can cross an FFI boundary as a
/// plain value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TierSpaceError {
    /// `create_region` was called on an instance that already has a region.
    /// Re-creation is rejected rather than treated as a reset: a reset would
    /// silently discard promoted objects the collector still references.
    RegionAlreadyExists,
    /// A reservation or promotion would run past the region's end. The
    /// cursor is left unchanged.
    OutOfRegionSpace,
    /// `pop_root` was called with no roots queued.
    EmptyRootStack,
}

impl fmt::Display for TierSpaceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TierSpaceError::RegionAlreadyExists => {
                write!(f, "the region has already been created")
            }
            TierSpaceError::OutOfRegionSpace => {
                write!(f, "the region does not have enough space left")
            }
            TierSpaceError::EmptyRootStack => write!(f, "the root stack is empty"),
        }
    }
}

impl std::error::Error for TierSpaceError {}
