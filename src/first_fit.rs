use log::debug;
use thiserror::Error;

use crate::block::MemoryBlock;
use crate::list::{BlockList, ListError};

/// Errors reported by [`FirstFitAllocator`].
///
/// Running out of space is not in here: a full address space is a normal
/// outcome, reported as `Ok(None)` by [`FirstFitAllocator::allocate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AllocError {
  #[error("memory space size must be positive")]
  InvalidSize,
  #[error("allocation length must be positive")]
  InvalidLength,
  #[error("no allocated block at address {0}")]
  UnknownAddress(usize),
  /// A list operation failed where the allocator's invariants say it
  /// cannot. Indicates corrupted allocator state, never retried.
  #[error("internal consistency fault: {0}")]
  Inconsistent(#[from] ListError),
}

/// A simulated first-fit allocator over the address space `[0, max_size)`.
///
/// Keeps two lists of [`MemoryBlock`] descriptors: the free list and the
/// allocated list. `allocate` scans the free list front to back and takes
/// the first block long enough, splitting it when it is longer than the
/// request. `release` moves a block back to the free list without merging,
/// so fragmentation accumulates until [`compact`](Self::compact) is called
/// explicitly. Allocation never compacts on its own.
///
/// Callers hold plain `usize` addresses, never references into the lists.
#[derive(Debug)]
pub struct FirstFitAllocator {
  free: BlockList,
  allocated: BlockList,
  max_size: usize,
}

impl FirstFitAllocator {
  /// Creates an allocator whose free list holds the single block
  /// `(0, max_size)`.
  pub fn new(
    max_size: usize,
  ) -> Result<Self, AllocError> {
    if max_size == 0 {
      return Err(AllocError::InvalidSize);
    }

    let mut free = BlockList::new();
    free.push_back(MemoryBlock::new(0, max_size));

    Ok(Self {
      free,
      allocated: BlockList::new(),
      max_size,
    })
  }

  pub fn max_size(&self) -> usize {
    self.max_size
  }

  /// Read-only view of the free list, front to back.
  pub fn free_blocks(&self) -> impl Iterator<Item = &MemoryBlock> {
    self.free.iter()
  }

  /// Read-only view of the allocated list, in allocation order.
  pub fn allocated_blocks(&self) -> impl Iterator<Item = &MemoryBlock> {
    self.allocated.iter()
  }

  /// Allocates a block of the given length and returns its base address,
  /// or `Ok(None)` when no free block is long enough.
  ///
  /// First fit: the scan takes the frontmost free block with
  /// `length >= requested`. An exact fit consumes the free block; a
  /// longer block is split, with the remainder shrunk in place so it
  /// keeps its position in the free list. The new block is appended to
  /// the back of the allocated list, preserving allocation order.
  ///
  /// A failed call leaves both lists untouched. No compaction is
  /// triggered; callers wanting a second chance call
  /// [`compact`](Self::compact) and retry.
  pub fn allocate(
    &mut self,
    length: usize,
  ) -> Result<Option<usize>, AllocError> {
    if length == 0 {
      return Err(AllocError::InvalidLength);
    }

    let Some(index) = self.free.iter().position(|block| block.length >= length) else {
      debug!("allocate({length}): no free block is long enough");
      return Ok(None);
    };

    let candidate = *self.free.get(index)?;
    let grant = MemoryBlock::new(candidate.base_address, length);

    if candidate.length == length {
      self.free.remove_at(index)?;
      debug!("allocate({length}): exact fit, consumed {candidate}");
    } else {
      let remainder = self.free.get_mut(index)?;
      remainder.base_address += length;
      remainder.length -= length;
      debug!("allocate({length}): split {candidate}, remainder {remainder}");
    }

    self.allocated.push_back(grant);
    Ok(Some(grant.base_address))
  }

  /// Returns the block with the given base address to the free list.
  ///
  /// The descriptor moves unmodified to the back of the free list; no
  /// merging happens here. Releasing an address that is not currently
  /// allocated is an error, never a silent no-op.
  pub fn release(
    &mut self,
    address: usize,
  ) -> Result<(), AllocError> {
    let Some(index) = self
      .allocated
      .iter()
      .position(|block| block.base_address == address)
    else {
      return Err(AllocError::UnknownAddress(address));
    };

    let id = self.allocated.id_at(index)?;
    let block = self.allocated.remove_by_id(id)?;
    self.free.push_back(block);
    debug!("release({address}): freed {block}");
    Ok(())
  }

  /// Merges address-contiguous free blocks until none remain.
  ///
  /// The free list is not address-ordered, so this is a fixed-point loop:
  /// every merge restarts the pairwise scan. The merged block keeps the
  /// lower base address. The allocated list is never touched, and calling
  /// this twice in a row changes nothing the second time.
  pub fn compact(&mut self) {
    loop {
      let Some((keep, consume)) = self.adjacent_free_pair() else {
        return;
      };

      let consumed = self
        .free
        .remove_at(consume)
        .expect("merge scan produced a stale free-list index");
      let keep = if consume < keep { keep - 1 } else { keep };
      let kept = self
        .free
        .get_mut(keep)
        .expect("merge scan produced a stale free-list index");

      kept.length += consumed.length;
      debug!("compact: merged {consumed} into {kept}");
    }
  }

  /// Finds one address-contiguous pair of free blocks, returned as
  /// `(keep, consume)` indices where `keep` is the lower block.
  fn adjacent_free_pair(&self) -> Option<(usize, usize)> {
    for (i, a) in self.free.iter().enumerate() {
      for (j, b) in self.free.iter().enumerate().skip(i + 1) {
        if a.end() == b.base_address {
          return Some((i, j));
        }
        if b.end() == a.base_address {
          return Some((j, i));
        }
      }
    }
    None
  }

  /// A textual dump of both lists, free list first.
  ///
  /// Deterministic: the same allocator state always renders the same
  /// string, so it is safe to assert against in tests.
  pub fn describe(&self) -> String {
    format!("free: {}\nallocated: {}", self.free, self.allocated)
  }
}

impl std::fmt::Display for FirstFitAllocator {
  fn fmt(
    &self,
    f: &mut std::fmt::Formatter<'_>,
  ) -> std::fmt::Result {
    write!(f, "{}", self.describe())
  }
}
