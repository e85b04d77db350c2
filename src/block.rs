use std::fmt;

/// A descriptor for the contiguous address range
/// `[base_address, base_address + length)`.
///
/// Blocks carry no storage; they only describe where a region of the
/// simulated address space starts and how long it is. Both fields are
/// rewritten in place when a block is split or merged, so a shrink or
/// grow never creates a new descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryBlock {
  pub base_address: usize,
  pub length: usize,
}

impl MemoryBlock {
  pub fn new(
    base_address: usize,
    length: usize,
  ) -> Self {
    Self { base_address, length }
  }

  /// The first address past the end of this block.
  pub fn end(&self) -> usize {
    self.base_address + self.length
  }
}

impl fmt::Display for MemoryBlock {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    write!(f, "({}, {})", self.base_address, self.length)
  }
}
