//! # bfalloc - A Best-Fit Memory Allocator Over `sbrk` and Anonymous `mmap`
//!
//! This crate provides a single-threaded, general-purpose dynamic memory
//! allocator exposing the four classic operations (`allocate`, `free`,
//! `reallocate`, and `zeroed_allocate`) on top of two kernel primitives:
//! program-break extension (`sbrk`) and anonymous private memory mapping
//! (`mmap`/`munmap`).
//!
//! ## Placement policy
//!
//! Small requests (below [`backing::BREAK_MAP_THRESHOLD`]) are served from a
//! contiguous break region managed as a singly-linked list of blocks, using
//! **best fit** with splitting and adjacent-block coalescing. Large requests
//! bypass the list entirely and go straight to an anonymous mapping that is
//! returned to the kernel on `free`.
//!
//! ```text
//!   Break region (a linked list of blocks):
//!
//!   heap_base ──►┌─────────┬─────────┬─────────┬─────────────────┐
//!                │ Alloc   │ Free    │ Alloc   │ Free (tail)     │
//!                └─────────┴─────────┴─────────┴─────────────────┘
//!
//!   Large requests instead get their own standalone mapping:
//!
//!                ┌─────────────────────────────┐
//!                │   Mapped (not on the list)   │
//!                └─────────────────────────────┘
//! ```
//!
//! Every block carries a [`block::Header`] immediately before its user
//! bytes, recording its total size (header included), its [`block::Status`]
//! (`Free`/`Alloc`/`Mapped`), and, for break-region blocks, the next
//! block in the list.
//!
//! ## Crate structure
//!
//! ```text
//!   bfalloc
//!   ├── align      - ALIGNMENT constant and the align! macro
//!   ├── block      - Header/Status and header <-> user pointer conversions
//!   ├── backing    - sbrk / mmap / munmap / page size
//!   ├── freelist   - coalescing, best-fit search, splitting, grow-in-place
//!   ├── allocator  - BestFitAllocator: the four entry points
//!   └── global     - GlobalAllocatorBridge for #[global_allocator] use
//! ```
//!
//! ## Quick start
//!
//! ```rust
//! use bfalloc::BestFitAllocator;
//!
//! let mut allocator = BestFitAllocator::new();
//!
//! let ptr = allocator.allocate(64).expect("allocation should succeed");
//! unsafe {
//!     ptr.as_ptr().write_bytes(0x42, 64);
//! }
//! allocator.free(Some(ptr));
//! ```
//!
//! To use it as the process's global allocator instead:
//!
//! ```rust,ignore
//! use bfalloc::GlobalAllocatorBridge;
//!
//! #[global_allocator]
//! static ALLOCATOR: GlobalAllocatorBridge = GlobalAllocatorBridge::new();
//! ```
//!
//! ## Limitations
//!
//! - **Single-threaded only**: no internal synchronization; see
//!   [`global::GlobalAllocatorBridge`]'s documentation before using it from
//!   more than one thread.
//! - **No defragmentation beyond adjacent coalescing**: freed blocks are
//!   merged with free neighbors, nothing more sophisticated.
//! - **Break memory is never returned to the kernel**: only `Mapped`
//!   (large) allocations are `munmap`ped on free.
//!
//! ## Safety
//!
//! This crate is inherently unsafe as it deals with raw memory management
//! and two kernel syscalls. All header reads/writes and pointer arithmetic
//! are localized to [`block`] and [`backing`]; [`freelist`] and
//! [`allocator`] compose those primitives without touching raw memory
//! themselves.

#[macro_use]
pub mod align;
pub mod allocator;
pub mod backing;
pub mod block;
pub mod freelist;
pub mod global;

pub use allocator::BestFitAllocator;
pub use global::GlobalAllocatorBridge;

/// `sbrk` is process-global state, so any two tests that each spin up their
/// own [`BestFitAllocator`] and run concurrently (the default under `cargo
/// test`) would otherwise race on the same break. This lock gives every
/// test in this binary that touches `sbrk` a turn by itself; it has no role
/// outside tests.
#[cfg(test)]
pub(crate) fn lock_sbrk_for_test() -> std::sync::MutexGuard<'static, ()> {
  static LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
  LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
