use std::collections::VecDeque;
use std::fmt;

use thiserror::Error;

use crate::block::MemoryBlock;

/// Errors reported by [`BlockList`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ListError {
  #[error("index {index} is out of bounds for a list of {len} blocks")]
  OutOfBounds { index: usize, len: usize },
  #[error("block is not in the list")]
  NotFound,
}

/// A stable identity token for one element of a [`BlockList`].
///
/// Ids are minted by the list on insertion and never reused, so an id
/// keeps naming the same element across later insertions and removals,
/// even when another element is equal by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockId(u64);

#[derive(Debug, Clone)]
struct Entry {
  id: BlockId,
  block: MemoryBlock,
}

/// An ordered sequence of [`MemoryBlock`] descriptors.
///
/// Pure container: it knows nothing about allocation. Order is
/// significant (first-fit scans front to back) and the list enforces no
/// uniqueness, duplicates are the caller's problem. Backed by a deque,
/// so front and back insertion are O(1) and interior insertion is O(n).
///
/// All indexed operations use the strict convention `0 <= index < len`
/// (`0 <= index <= len` for insertion).
#[derive(Debug, Clone, Default)]
pub struct BlockList {
  entries: VecDeque<Entry>,
  next_id: u64,
}

impl BlockList {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  fn mint_id(&mut self) -> BlockId {
    self.next_id += 1;
    BlockId(self.next_id)
  }

  fn check_index(
    &self,
    index: usize,
  ) -> Result<(), ListError> {
    if index >= self.len() {
      return Err(ListError::OutOfBounds { index, len: self.len() });
    }
    Ok(())
  }

  /// The block at `index`.
  pub fn get(
    &self,
    index: usize,
  ) -> Result<&MemoryBlock, ListError> {
    self.check_index(index)?;
    Ok(&self.entries[index].block)
  }

  /// Mutable access to the block at `index`.
  pub fn get_mut(
    &mut self,
    index: usize,
  ) -> Result<&mut MemoryBlock, ListError> {
    self.check_index(index)?;
    Ok(&mut self.entries[index].block)
  }

  /// The identity token of the element at `index`.
  pub fn id_at(
    &self,
    index: usize,
  ) -> Result<BlockId, ListError> {
    self.check_index(index)?;
    Ok(self.entries[index].id)
  }

  /// Inserts `block` so that it becomes element `index`.
  /// Valid positions are `0..=len`; front and back insertion are O(1).
  pub fn insert(
    &mut self,
    index: usize,
    block: MemoryBlock,
  ) -> Result<BlockId, ListError> {
    if index > self.len() {
      return Err(ListError::OutOfBounds { index, len: self.len() });
    }
    let id = self.mint_id();
    self.entries.insert(index, Entry { id, block });
    Ok(id)
  }

  /// Inserts `block` at the front of the list.
  pub fn push_front(
    &mut self,
    block: MemoryBlock,
  ) -> BlockId {
    let id = self.mint_id();
    self.entries.push_front(Entry { id, block });
    id
  }

  /// Inserts `block` at the back of the list.
  pub fn push_back(
    &mut self,
    block: MemoryBlock,
  ) -> BlockId {
    let id = self.mint_id();
    self.entries.push_back(Entry { id, block });
    id
  }

  /// Position of the first element equal to `block` by value.
  pub fn index_of(
    &self,
    block: &MemoryBlock,
  ) -> Option<usize> {
    self.entries.iter().position(|entry| entry.block == *block)
  }

  /// Removes and returns the element at `index`.
  pub fn remove_at(
    &mut self,
    index: usize,
  ) -> Result<MemoryBlock, ListError> {
    self.check_index(index)?;
    // index was just bounds-checked
    match self.entries.remove(index) {
      Some(entry) => Ok(entry.block),
      None => Err(ListError::OutOfBounds { index, len: self.len() }),
    }
  }

  /// Removes and returns the element carrying `id`, regardless of how
  /// many other elements are equal to it by value.
  pub fn remove_by_id(
    &mut self,
    id: BlockId,
  ) -> Result<MemoryBlock, ListError> {
    let index = self
      .entries
      .iter()
      .position(|entry| entry.id == id)
      .ok_or(ListError::NotFound)?;
    self.remove_at(index)
  }

  /// Removes and returns the first element equal to `block` by value.
  pub fn remove_by_value(
    &mut self,
    block: &MemoryBlock,
  ) -> Result<MemoryBlock, ListError> {
    let index = self.index_of(block).ok_or(ListError::NotFound)?;
    self.remove_at(index)
  }

  pub fn first(&self) -> Option<&MemoryBlock> {
    self.entries.front().map(|entry| &entry.block)
  }

  pub fn last(&self) -> Option<&MemoryBlock> {
    self.entries.back().map(|entry| &entry.block)
  }

  /// Iterates over the blocks, front to back.
  pub fn iter(&self) -> impl Iterator<Item = &MemoryBlock> {
    self.entries.iter().map(|entry| &entry.block)
  }

  /// Iterates over `(id, block)` pairs, front to back.
  pub fn entries(&self) -> impl Iterator<Item = (BlockId, &MemoryBlock)> {
    self.entries.iter().map(|entry| (entry.id, &entry.block))
  }
}

impl fmt::Display for BlockList {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    write!(f, "[")?;
    for (i, block) in self.iter().enumerate() {
      if i > 0 {
        write!(f, ", ")?;
      }
      write!(f, "{block}")?;
    }
    write!(f, "]")
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn blocks(list: &BlockList) -> Vec<MemoryBlock> {
    list.iter().copied().collect()
  }

  #[test]
  fn test_insert_positions() {
    let mut list = BlockList::new();

    list.insert(0, MemoryBlock::new(10, 5)).unwrap();
    list.push_front(MemoryBlock::new(0, 5));
    list.push_back(MemoryBlock::new(20, 5));
    list.insert(1, MemoryBlock::new(5, 5)).unwrap();

    assert_eq!(
      blocks(&list),
      vec![
        MemoryBlock::new(0, 5),
        MemoryBlock::new(5, 5),
        MemoryBlock::new(10, 5),
        MemoryBlock::new(20, 5),
      ]
    );
    assert_eq!(list.len(), 4);
    assert_eq!(list.first(), Some(&MemoryBlock::new(0, 5)));
    assert_eq!(list.last(), Some(&MemoryBlock::new(20, 5)));
  }

  #[test]
  fn test_insert_out_of_bounds() {
    let mut list = BlockList::new();
    list.push_back(MemoryBlock::new(0, 1));

    assert_eq!(
      list.insert(2, MemoryBlock::new(1, 1)),
      Err(ListError::OutOfBounds { index: 2, len: 1 })
    );
  }

  #[test]
  fn test_get_strict_bounds() {
    let mut list = BlockList::new();
    list.push_back(MemoryBlock::new(0, 1));

    assert!(list.get(0).is_ok());
    // index == len is invalid, not a one-past-the-end alias
    assert_eq!(
      list.get(1),
      Err(ListError::OutOfBounds { index: 1, len: 1 })
    );
    assert_eq!(
      list.remove_at(1).unwrap_err(),
      ListError::OutOfBounds { index: 1, len: 1 }
    );
  }

  #[test]
  fn test_remove_at() {
    let mut list = BlockList::new();
    list.push_back(MemoryBlock::new(0, 1));
    list.push_back(MemoryBlock::new(1, 2));
    list.push_back(MemoryBlock::new(3, 4));

    assert_eq!(list.remove_at(1), Ok(MemoryBlock::new(1, 2)));
    assert_eq!(
      blocks(&list),
      vec![MemoryBlock::new(0, 1), MemoryBlock::new(3, 4)]
    );
  }

  #[test]
  fn test_index_of_and_remove_by_value() {
    let mut list = BlockList::new();
    list.push_back(MemoryBlock::new(0, 1));
    list.push_back(MemoryBlock::new(5, 2));

    assert_eq!(list.index_of(&MemoryBlock::new(5, 2)), Some(1));
    assert_eq!(list.index_of(&MemoryBlock::new(9, 9)), None);

    assert_eq!(
      list.remove_by_value(&MemoryBlock::new(5, 2)),
      Ok(MemoryBlock::new(5, 2))
    );
    assert_eq!(
      list.remove_by_value(&MemoryBlock::new(5, 2)),
      Err(ListError::NotFound)
    );
  }

  #[test]
  fn test_remove_by_id_with_duplicate_values() {
    let mut list = BlockList::new();
    list.push_back(MemoryBlock::new(0, 1));
    let second = list.push_back(MemoryBlock::new(0, 1));
    list.push_back(MemoryBlock::new(0, 1));

    // identity removal takes the tagged element, not the first equal one
    assert_eq!(list.remove_by_id(second), Ok(MemoryBlock::new(0, 1)));
    assert_eq!(list.len(), 2);
    assert_eq!(list.remove_by_id(second), Err(ListError::NotFound));
  }

  #[test]
  fn test_ids_survive_structural_changes() {
    let mut list = BlockList::new();
    let first = list.push_back(MemoryBlock::new(0, 1));
    list.push_back(MemoryBlock::new(1, 1));
    list.push_front(MemoryBlock::new(10, 1));
    list.remove_at(2).unwrap();

    assert_eq!(list.remove_by_id(first), Ok(MemoryBlock::new(0, 1)));
  }

  #[test]
  fn test_display() {
    let mut list = BlockList::new();
    assert_eq!(list.to_string(), "[]");

    list.push_back(MemoryBlock::new(0, 10));
    list.push_back(MemoryBlock::new(20, 5));
    assert_eq!(list.to_string(), "[(0, 10), (20, 5)]");
  }
}
