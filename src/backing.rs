//! Backing-store acquirer: obtains raw memory from the kernel, either by
//! extending the program break or by mapping an anonymous private region.

use std::ptr::NonNull;
use std::sync::OnceLock;

use libc::{c_void, intptr_t, sbrk};
use tracing::{debug, warn};

/// Allocate-path break/map threshold: requests below this size are served
/// from the break region, at or above it they go straight to `mmap`.
pub const BREAK_MAP_THRESHOLD: usize = 131_072;

static PAGE_SIZE: OnceLock<usize> = OnceLock::new();

/// The system page size, queried once via `sysconf(_SC_PAGESIZE)` and
/// cached for the lifetime of the process.
pub fn page_size() -> usize {
  *PAGE_SIZE.get_or_init(|| unsafe { libc::sysconf(libc::_SC_PAGESIZE) as usize })
}

/// Extends the program break by `size` bytes and returns the start of the
/// newly acquired region, or `None` if the kernel refuses.
pub fn extend_break(size: usize) -> Option<NonNull<u8>> {
  let raw = unsafe { sbrk(size as intptr_t) };
  if raw as isize == -1 {
    warn!(size, "sbrk refused to extend the program break");
    return None;
  }
  debug!(size, addr = ?raw, "extended program break");
  NonNull::new(raw as *mut u8)
}

/// Requests a private, anonymous, read+write mapping of exactly `size`
/// bytes, or `None` if the kernel refuses.
pub fn map_anonymous(size: usize) -> Option<NonNull<u8>> {
  let raw = unsafe {
    libc::mmap(
      std::ptr::null_mut(),
      size,
      libc::PROT_READ | libc::PROT_WRITE,
      libc::MAP_PRIVATE | libc::MAP_ANONYMOUS,
      -1,
      0,
    )
  };
  if raw == libc::MAP_FAILED {
    warn!(size, "mmap refused to map an anonymous region");
    return None;
  }
  debug!(size, addr = ?raw, "mapped anonymous region");
  NonNull::new(raw as *mut u8)
}

/// Unmaps a region previously obtained from [`map_anonymous`].
///
/// # Safety
/// `ptr`/`size` must exactly match a prior, not-yet-unmapped
/// [`map_anonymous`] call.
pub unsafe fn unmap(ptr: NonNull<u8>, size: usize) {
  let result = unsafe { libc::munmap(ptr.as_ptr() as *mut c_void, size) };
  debug_assert_eq!(result, 0, "munmap of a region we mapped ourselves should not fail");
  debug!(addr = ?ptr.as_ptr(), size, "unmapped anonymous region");
}
