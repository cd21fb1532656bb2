//! TierSpace is a second-tier memory region manager for tracing garbage
//! collectors. It lets a collector relocate selected live objects out of the
//! normally managed heap into a separately bounded address range (the
//! *region*), backed by a larger or slower store such as a file on fast
//! storage, while preserving the collector's ability to find and re-trace
//! those objects as roots.
//!
//! Logically, this crate includes these major parts:
//! * The [region](region/struct.RegionResource.html): one contiguous address
//!   range with a bump cursor. Promotion reserves space here; membership
//!   tests compare against its bounds.
//! * The [root stack](roots/struct.RootStack.html): a synchronized LIFO of
//!   references the tracer uses to re-seed reachability for objects that now
//!   live outside the ordinary root set.
//! * [Backing stores](backing/trait.BackingStore.html): providers of the
//!   region's raw address range (anonymous memory, a file mapping, or a
//!   range the embedder already owns).
//! * The [TierSpace instance](tierspace/struct.TierSpace.html): an explicitly
//!   constructed context owning all of the above. There is no process-wide
//!   state; independent instances coexist freely.
//!
//! This crate is laid out as a library for a VM binding to embed: the binding
//! implements the [`vm::VMBinding`] trait (in particular its object model,
//! which tells us how big an object is and how to reproduce its
//! representation elsewhere), and drives the crate through the safe functions
//! in [`memory_manager`]. Deciding *which* objects to promote and *when* to
//! drain the root stack stays with the collector.

#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

mod tierspace;
pub use crate::tierspace::TierSpace;
pub use crate::tierspace::TierSpaceBuilder;

mod error;
pub use crate::error::TierSpaceError;

pub mod backing;
pub mod build_info;
pub mod global_state;
pub mod memory_manager;
pub mod region;
pub mod roots;
pub mod util;
pub mod vm;

#[cfg(test)]
mod tests;
