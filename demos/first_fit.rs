use simalloc::FirstFitAllocator;

/// Walks through a fragmentation scenario step by step. Run with
/// `RUST_LOG=debug` to see the allocator's own trace of every split,
/// release, and merge.
fn main() {
  env_logger::init();

  let mut space = FirstFitAllocator::new(100).expect("positive size");
  println!("[0] Fresh space of 100 words\n{space}\n");

  // --------------------------------------------------------------------
  // 1) Carve the space into four allocations.
  // --------------------------------------------------------------------
  let a = space.allocate(20).unwrap().expect("space is empty");
  let b = space.allocate(10).unwrap().expect("70 words remain");
  let c = space.allocate(25).unwrap().expect("60 words remain");
  let d = space.allocate(30).unwrap().expect("35 words remain");
  println!("[1] Allocated 20, 10, 25, 30 at {a}, {b}, {c}, {d}\n{space}\n");

  // --------------------------------------------------------------------
  // 2) Free two non-adjacent blocks. The holes go to the back of the
  //    free list as-is; nothing is merged yet.
  // --------------------------------------------------------------------
  space.release(b).unwrap();
  space.release(d).unwrap();
  println!("[2] Released blocks at {b} and {d}\n{space}\n");

  // --------------------------------------------------------------------
  // 3) Ask for more than any single hole. 55 words are free in total
  //    (15 + 10 + 30), but the largest hole is 30, so this fails.
  // --------------------------------------------------------------------
  let result = space.allocate(35).unwrap();
  println!("[3] allocate(35) -> {result:?} (fragmented: 55 free, largest hole 30)\n");

  // --------------------------------------------------------------------
  // 4) Free the block separating the holes, then compact. The three
  //    contiguous holes collapse into one.
  // --------------------------------------------------------------------
  space.release(c).unwrap();
  space.compact();
  println!("[4] Released block at {c}, compacted\n{space}\n");

  // --------------------------------------------------------------------
  // 5) Retry the allocation that failed in step 3.
  // --------------------------------------------------------------------
  let retry = space.allocate(35).unwrap();
  println!("[5] allocate(35) -> {retry:?} after compaction\n{space}");
}
