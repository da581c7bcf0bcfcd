//! Interactive walk-through of the allocator: allocate, write, free, reuse,
//! and grow, printing the program break at each step so the effect is
//! visible under `pmap`/`htop`/`gdb`.
//!
//! This is the external diagnostic harness spec.md scopes out of the core
//! allocator; it only ever calls the four public entry points.

use std::io::Read;

use bfalloc::BestFitAllocator;

fn block_until_enter_pressed() {
  println!("\n>>> Press ENTER to continue...");
  let _ = std::io::stdin().bytes().next();
}

fn print_program_break(label: &str) {
  println!(
    "[{}] PID = {}, program break (sbrk(0)) = {:?}",
    label,
    std::process::id(),
    unsafe { libc::sbrk(0) },
  );
}

fn main() {
  let mut allocator = BestFitAllocator::new();

  print_program_break("start");
  block_until_enter_pressed();

  // 1) Allocate 4 bytes and write a pattern.
  println!("\n[1] Allocate 4 bytes");
  let first = allocator.allocate(4).expect("allocation should succeed");
  unsafe {
    (first.as_ptr() as *mut u32).write(0xDEADBEEF);
    println!("[1] Value written = 0x{:X}", (first.as_ptr() as *mut u32).read());
  }
  block_until_enter_pressed();

  // 2) Allocate 12 bytes, showing odd-sized handling.
  println!("\n[2] Allocate 12 bytes");
  let second = allocator.allocate(12).expect("allocation should succeed");
  unsafe {
    second.as_ptr().write_bytes(0xAB, 12);
  }
  println!("[2] Initialized second block with 0xAB");
  block_until_enter_pressed();

  // 3) Free the first block, then allocate a small block and observe reuse.
  allocator.free(Some(first));
  println!("\n[3] Freed first block at {:?}", first.as_ptr());
  let third = allocator.allocate(2).expect("allocation should succeed");
  println!(
    "[3] third == first? {}",
    if third == first { "Yes, reused the freed block" } else { "No, placed elsewhere" }
  );
  block_until_enter_pressed();

  // 4) Allocate something past the break/map threshold to force mmap.
  print_program_break("before large alloc");
  let big = allocator.zeroed_allocate(1, 256 * 1024).expect("mapped allocation should succeed");
  println!("\n[4] Allocated 256 KiB mapped block at {:?}", big.as_ptr());
  print_program_break("after large alloc");
  allocator.free(Some(big));

  println!("\n[5] End of demo. Remaining break memory is reclaimed by the OS at exit.");
}
