//! Providers of the region's raw address range.
//!
//! The region manager never calls `mmap` directly: it asks a [`BackingStore`]
//! for a contiguous range and hands the range back when the instance is
//! dropped. This keeps the placement decision (DRAM, a file on fast storage,
//! or a range the embedder already owns) out of the allocation path.

use crate::util::constants::BYTES_IN_PAGE;
use crate::util::conversions;
use crate::util::memory;
use crate::util::options::BackingSelector;
use crate::util::Address;
use std::fs::OpenOptions;
use std::io::Result;
use std::path::PathBuf;

/// A source of contiguous, stable address ranges. The returned range must
/// not be used for any other purpose until it is released.
pub trait BackingStore: Send + Sync {
    /// Reserve a range of `bytes` bytes and return its start address.
    fn reserve(&self, bytes: usize) -> Result<Address>;

    /// Release a range previously returned by [`BackingStore::reserve`].
    /// Called at most once per reservation, on instance teardown. Failures
    /// are logged, not propagated: teardown has no caller to report to.
    fn release(&self, start: Address, bytes: usize);
}

/// A backing store built on private anonymous memory or a shared file
/// mapping. The file form is the configuration this crate exists for: the
/// region lives on an NVMe-class device and extends effective heap capacity
/// past primary memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MmapBackingStore {
    /// Demand-zero anonymous memory.
    Anonymous,
    /// A file at the given path, created if absent, sized to the reservation
    /// and mapped shared. The file persists after release; the embedder owns
    /// the path.
    File(PathBuf),
}

impl MmapBackingStore {
    pub fn anonymous() -> Self {
        MmapBackingStore::Anonymous
    }

    pub fn file<P: Into<PathBuf>>(path: P) -> Self {
        MmapBackingStore::File(path.into())
    }

    pub fn from_selector(selector: &BackingSelector) -> Self {
        match selector {
            BackingSelector::Anonymous => MmapBackingStore::Anonymous,
            BackingSelector::File(path) => MmapBackingStore::File(path.clone()),
        }
    }
}

impl BackingStore for MmapBackingStore {
    fn reserve(&self, bytes: usize) -> Result<Address> {
        let start = match self {
            MmapBackingStore::Anonymous => {
                if bytes as u64 > memory::get_system_total_memory() {
                    warn!(
                        "region of {} bytes exceeds physical memory; a File backing would page to storage instead of swap",
                        bytes
                    );
                }
                memory::mmap_anonymous(bytes)?
            }
            MmapBackingStore::File(path) => {
                let file = OpenOptions::new()
                    .read(true)
                    .write(true)
                    .create(true)
                    .truncate(false)
                    .open(path)?;
                // Size the file to whole pages: touching a shared mapping
                // past EOF raises SIGBUS.
                file.set_len(conversions::raw_align_up(bytes, BYTES_IN_PAGE) as u64)?;
                // The mapping outlives the descriptor; the file handle can
                // be dropped here.
                memory::mmap_file(&file, bytes)?
            }
        };
        debug_assert!(conversions::is_page_aligned(start));
        Ok(start)
    }

    fn release(&self, start: Address, bytes: usize) {
        if let Err(e) = memory::munmap(start, bytes) {
            error!(
                "failed to unmap region backing [{}, {}): {}",
                start,
                start + bytes,
                e
            );
        }
    }
}

/// A range the embedder already owns and manages. Reservation hands the
/// range out; release is a no-op. Nothing is ever mapped or unmapped by this
/// store, so it is also the vehicle for bounds-exact tests that never touch
/// the memory behind the addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExternalRange {
    start: Address,
    bytes: usize,
}

impl ExternalRange {
    pub fn new(start: Address, bytes: usize) -> Self {
        ExternalRange { start, bytes }
    }
}

impl BackingStore for ExternalRange {
    fn reserve(&self, bytes: usize) -> Result<Address> {
        if bytes <= self.bytes {
            Ok(self.start)
        } else {
            Err(std::io::Error::new(
                std::io::ErrorKind::OutOfMemory,
                format!(
                    "external range holds {} bytes, reservation asked for {}",
                    self.bytes, bytes
                ),
            ))
        }
    }

    fn release(&self, _start: Address, _bytes: usize) {}
}
