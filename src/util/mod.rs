//! Utilities used by other modules, and by bindings embedding the crate.

/// The address and object reference value types.
pub mod address;
/// Constants for sizes and alignments.
pub mod constants;
/// Conversions between units and alignments.
pub mod conversions;
/// The logger for the crate.
pub(crate) mod logger;
/// Thin wrappers over the OS memory interface.
pub mod memory;
/// Per-instance options.
pub mod options;
/// Utilities for tests.
pub mod test_util;

pub use self::address::Address;
pub use self::address::ObjectReference;
