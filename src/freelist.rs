//! Free-list engine: the singly-linked list of break-region blocks and the
//! three operations entry points compose it with: coalescing, best-fit
//! search, and splitting.
//!
//! `Mapped` blocks are never threaded onto this list; every function here
//! assumes it only ever sees `Free`/`Alloc` blocks.

use tracing::trace;

use crate::block::{Header, MIN_BLOCK_SIZE, Status};

/// Walks the list once, merging every run of consecutive `Free` blocks into
/// its first member. Returns the list tail (the last block reached).
///
/// # Safety
/// `head` must be null or point to the first node of a well-formed list.
pub unsafe fn coalesce(head: *mut Header) -> *mut Header {
  let mut current = head;
  let mut tail = head;

  while !current.is_null() {
    unsafe {
      tail = current;

      if (*current).status == Status::Free {
        while !(*current).next.is_null() && (*(*current).next).status == Status::Free {
          let successor = (*current).next;
          (*current).size += (*successor).size;
          (*current).next = (*successor).next;
          trace!(merged_into = ?current, absorbed = ?successor, "coalesced adjacent free blocks");
        }
      }

      current = (*current).next;
    }
  }

  tail
}

/// Finds the smallest `Free` block whose size is at least `size`, breaking
/// ties by first occurrence. Assumes `head` has just been coalesced.
///
/// # Safety
/// `head` must be null or point to the first node of a well-formed list.
pub unsafe fn best_fit(head: *mut Header, size: usize) -> Option<*mut Header> {
  let mut current = head;
  let mut best: Option<*mut Header> = None;

  while !current.is_null() {
    unsafe {
      if (*current).status == Status::Free && (*current).size >= size {
        let is_better = match best {
          None => true,
          Some(candidate) => (*current).size < (*candidate).size,
        };
        if is_better {
          best = Some(current);
        }
      }
      current = (*current).next;
    }
  }

  if let Some(block) = best {
    trace!(block = ?block, size = unsafe { (*block).size }, requested = size, "best-fit hit");
  }
  best
}

/// Splits `block` into a `request`-sized prefix and a `Free` suffix, but
/// only when the suffix would itself be a legal minimum-size block. Leaves
/// `block` untouched otherwise.
///
/// # Safety
/// `block` must point to a valid header of size at least `request`.
pub unsafe fn split_if_profitable(block: *mut Header, request: usize) {
  unsafe {
    let total = (*block).size;
    if total < request + MIN_BLOCK_SIZE {
      return;
    }

    let suffix = (block as *mut u8).add(request) as *mut Header;
    suffix.write(Header { size: total - request, status: Status::Free, next: (*block).next });

    (*block).size = request;
    (*block).next = suffix;

    trace!(block = ?block, suffix = ?suffix, suffix_size = total - request, "split block");
  }
}

/// Absorbs consecutive `Free` successors of `block` until its size reaches
/// `target_size` or a non-`Free` successor (or the list end) is hit.
/// Returns whether `target_size` was reached. Unlike [`coalesce`], this
/// merges into `block` regardless of `block`'s own status (it is used by
/// realloc's grow-in-place path on a still-`Alloc` block).
///
/// # Safety
/// `block` must point to a valid header that is part of a well-formed list.
pub unsafe fn expand_into_free_successors(block: *mut Header, target_size: usize) -> bool {
  unsafe {
    while (*block).size < target_size {
      let successor = (*block).next;
      if successor.is_null() || (*successor).status != Status::Free {
        return false;
      }
      (*block).size += (*successor).size;
      (*block).next = (*successor).next;
      trace!(block = ?block, absorbed = ?successor, "absorbed free successor during grow");
    }
    true
  }
}
