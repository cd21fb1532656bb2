use crate::util::Address;
use std::fs::File;
use std::io::Result;
use std::os::unix::io::AsRawFd;

/// Mmap a private anonymous range of the given size at a kernel-chosen
/// address and return its start. The mapping is demand-zero and carries
/// `MAP_NORESERVE`, so physical pages are only committed when touched.
pub fn mmap_anonymous(size: usize) -> Result<Address> {
    let prot = libc::PROT_READ | libc::PROT_WRITE;
    let flags = libc::MAP_ANON | libc::MAP_PRIVATE | libc::MAP_NORESERVE;
    mmap(size, prot, flags, -1)
}

/// Mmap the first `size` bytes of `file` as a shared read-write mapping at a
/// kernel-chosen address and return its start. The file must already be at
/// least `size` bytes long.
pub fn mmap_file(file: &File, size: usize) -> Result<Address> {
    let prot = libc::PROT_READ | libc::PROT_WRITE;
    let flags = libc::MAP_SHARED;
    mmap(size, prot, flags, file.as_raw_fd())
}

fn mmap(size: usize, prot: libc::c_int, flags: libc::c_int, fd: libc::c_int) -> Result<Address> {
    let result = unsafe { libc::mmap(std::ptr::null_mut(), size, prot, flags, fd, 0) };
    if result == libc::MAP_FAILED {
        Err(std::io::Error::last_os_error())
    } else {
        Ok(Address::from_mut_ptr(result))
    }
}

/// Unmap the given range. The caller must own the mapping.
pub fn munmap(start: Address, size: usize) -> Result<()> {
    wrap_libc_call(&|| unsafe { libc::munmap(start.to_mut_ptr(), size) }, 0)
}

/// Zero the given range, which must be mapped and writable.
pub fn zero(start: Address, len: usize) {
    let ptr = start.to_mut_ptr();
    let result = wrap_libc_call(&|| unsafe { libc::memset(ptr, 0, len) }, ptr);
    debug_assert!(result.is_ok());
}

fn wrap_libc_call<T: PartialEq>(f: &dyn Fn() -> T, expect: T) -> Result<()> {
    let ret = f();
    if ret == expect {
        Ok(())
    } else {
        Err(std::io::Error::last_os_error())
    }
}

/// Get the total physical memory of the system in bytes.
pub fn get_system_total_memory() -> u64 {
    use sysinfo::MemoryRefreshKind;
    use sysinfo::{RefreshKind, System};

    // sysinfo recommends sharing one `System`, but we only query it once at
    // region creation, and loading just the RAM component keeps this under a
    // millisecond.
    let sys = System::new_with_specifics(
        RefreshKind::nothing().with_memory(MemoryRefreshKind::nothing().with_ram()),
    );
    sys.total_memory()
}
