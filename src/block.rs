//! Block header: the in-band metadata record placed immediately before
//! every user pointer this allocator returns.

use std::mem;
use std::ptr::NonNull;

use static_assertions::const_assert;

use crate::align;

/// Ownership state of a [`Header`].
///
/// `Free` and `Alloc` blocks live on the break-region list; `Mapped` blocks
/// are standalone and never threaded onto it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
  Free,
  Alloc,
  Mapped,
}

/// The metadata record preceding every block's user bytes.
///
/// `size` is the *total* size of the block (header included) and is always
/// a multiple of [`align::ALIGNMENT`]. `next` threads break-region blocks
/// together; it is meaningless (and never read) on a `Mapped` block.
#[repr(C)]
pub struct Header {
  pub size: usize,
  pub status: Status,
  pub next: *mut Header,
}

/// `ALIGN(sizeof(Header))`: the fixed distance from a block's start to its
/// user pointer.
pub const HEADER_SIZE: usize = align!(mem::size_of::<Header>());

/// The smallest block that can legally exist on the free list (header plus
/// one machine word of usable content), per spec invariant (1).
pub const MIN_BLOCK_SIZE: usize = HEADER_SIZE + align::ALIGNMENT;

const_assert!(HEADER_SIZE % align::ALIGNMENT == 0);
const_assert!(HEADER_SIZE >= mem::size_of::<Header>());

impl Header {
  /// Aligned total block size for a request carrying `user_size` payload
  /// bytes. This is the quantity spec.md calls "aligned".
  pub fn aligned_size(user_size: usize) -> usize {
    HEADER_SIZE + align!(user_size)
  }

  /// Initializes `*at` as a fresh header with the given `size`/`status` and
  /// a null `next`, returning the header pointer.
  ///
  /// # Safety
  /// `at` must point to at least `size` writable, non-aliased bytes.
  pub unsafe fn init(at: *mut u8, size: usize, status: Status) -> *mut Header {
    unsafe {
      let header = at as *mut Header;
      header.write(Header { size, status, next: std::ptr::null_mut() });
      header
    }
  }

  /// Like [`Header::init`], but returns the user pointer instead of the
  /// header pointer. Convenience for the allocation paths that hand the
  /// block straight to the caller.
  ///
  /// # Safety
  /// Same requirements as [`Header::init`].
  pub unsafe fn write_new(at: *mut u8, size: usize, status: Status) -> NonNull<u8> {
    unsafe { Self::user_ptr(Self::init(at, size, status)) }
  }

  /// The user pointer for the block whose header starts at `header`.
  ///
  /// # Safety
  /// `header` must point to a valid, initialized `Header`.
  pub unsafe fn user_ptr(header: *mut Header) -> NonNull<u8> {
    unsafe { NonNull::new_unchecked((header as *mut u8).add(HEADER_SIZE)) }
  }

  /// Recovers the block header for a user pointer previously returned by
  /// [`Header::user_ptr`].
  ///
  /// # Safety
  /// `user` must have been returned by this allocator and not yet freed.
  pub unsafe fn from_user_ptr(user: NonNull<u8>) -> *mut Header {
    unsafe { user.as_ptr().sub(HEADER_SIZE) as *mut Header }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn header_size_is_aligned_and_nonzero() {
    assert!(HEADER_SIZE > 0);
    assert_eq!(HEADER_SIZE % align::ALIGNMENT, 0);
  }

  #[test]
  fn user_ptr_roundtrips_through_from_user_ptr() {
    let mut backing = vec![0u8; MIN_BLOCK_SIZE];
    unsafe {
      let user = Header::write_new(backing.as_mut_ptr(), MIN_BLOCK_SIZE, Status::Alloc);
      let header = Header::from_user_ptr(user);
      assert_eq!(header as *mut u8, backing.as_mut_ptr());
      assert_eq!((*header).size, MIN_BLOCK_SIZE);
      assert_eq!((*header).status, Status::Alloc);
    }
  }
}
