//! # simalloc - A First-Fit Memory Allocator Simulator
//!
//! This crate simulates a **first-fit dynamic allocator** over an abstract
//! linear address space of a fixed size. It models `malloc`/`free` on two
//! lists of block descriptors — free and allocated — without touching real
//! memory, for exercising allocation strategy and fragmentation behavior.
//!
//! ## Overview
//!
//! ```text
//!   Simulated Address Space (max_size = 100):
//!
//!   ┌────────────┬──────────┬────────────┬───────────────────────────┐
//!   │  A (0,20)  │ F (20,10)│  A (30,25) │         F (55,45)         │
//!   └────────────┴──────────┴────────────┴───────────────────────────┘
//!    A = allocated block      F = free block      (base, length)
//!
//!    free list:      [(20, 10), (55, 45)]
//!    allocated list: [(0, 20), (30, 25)]
//!
//!   allocate(8) scans the free list front to back, takes the FIRST block
//!   with length >= 8, and splits it:
//!
//!    free list:      [(28, 2), (55, 45)]
//!    allocated list: [(0, 20), (30, 25), (20, 8)]
//! ```
//!
//! Blocks are plain `(base_address, length)` descriptors. No bytes exist
//! behind them; the returned "allocation" is an opaque integer address.
//!
//! ## Crate Structure
//!
//! ```text
//!   simalloc
//!   ├── block      - MemoryBlock descriptor
//!   ├── list       - BlockList ordered container
//!   └── first_fit  - FirstFitAllocator implementation
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use simalloc::FirstFitAllocator;
//!
//! let mut space = FirstFitAllocator::new(100).unwrap();
//!
//! // Allocate two blocks and free the first.
//! let a = space.allocate(30).unwrap().unwrap();
//! let b = space.allocate(30).unwrap().unwrap();
//! space.release(a).unwrap();
//!
//! // Freed blocks are not merged until compact() is called.
//! assert_eq!(space.allocate(50).unwrap(), None);
//! space.release(b).unwrap();
//! space.compact();
//! assert_eq!(space.allocate(50).unwrap(), Some(0));
//! ```
//!
//! ## How It Works
//!
//! - `allocate(length)` — first-fit scan of the free list. An exact fit
//!   moves the whole block; a longer block is split, shrinking the free
//!   remainder in place. Returns `Ok(None)` when nothing fits: running
//!   out of space is a routine outcome, not an error.
//! - `release(address)` — moves the matching descriptor from the
//!   allocated list to the back of the free list, unmodified.
//! - `compact()` — merges address-contiguous free blocks to a fixed
//!   point. Never invoked implicitly; callers decide when to pay for it.
//!
//! ## Limitations
//!
//! - **Simulation only**: no real memory is reserved or addressed.
//! - **Single-threaded**: one `&mut` owner; wrap the whole allocator in a
//!   lock if shared, the operations are not safe to interleave.
//! - **First-fit only**: no best-fit, buddy, or slab strategies.

mod block;
mod first_fit;
mod list;

pub use block::MemoryBlock;
pub use first_fit::{AllocError, FirstFitAllocator};
pub use list::{BlockId, BlockList, ListError};
