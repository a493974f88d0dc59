//! Bounded-parallelism worker pool
//!
//! Blocks are embarrassingly parallel: each worker reads a disjoint,
//! immutable slice of the input and owns its output buffer exclusively.
//! The pool runs items in batches of at most `workers` concurrent threads,
//! joins each batch before starting the next, and preserves item order on
//! the way out. A failing worker still gets joined (never detached); the
//! first error encountered, in item order, is what the caller sees.

use crate::Result;
use std::sync::atomic::AtomicU64;

/// Per-codec selection counters, updated with plain atomic increments —
/// the only state shared across workers besides the immutable input.
#[derive(Default)]
pub struct CodecCounts {
    pub lzw_selected: AtomicU64,
    pub huffman_selected: AtomicU64,
}

/// Run `f` over every item in `items`, at most `workers` at a time, handing
/// each batch's results (in item order) to `on_batch` as soon as that batch
/// joins and before the next batch starts. On the first error, outstanding
/// workers in that batch are still joined before the error propagates; no
/// partial batch is handed to `on_batch` and no further batches are started.
pub fn run_batched<T, R, F, OnBatch>(
    items: &[T],
    workers: usize,
    f: F,
    mut on_batch: OnBatch,
) -> Result<()>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> Result<R> + Sync,
    OnBatch: FnMut(&[R]) -> Result<()>,
{
    let batch_size = workers.max(1);

    for batch in items.chunks(batch_size) {
        let batch_results: Vec<Result<R>> = std::thread::scope(|scope| {
            let handles: Vec<_> = batch.iter().map(|item| scope.spawn(|| f(item))).collect();
            handles
                .into_iter()
                .map(|h| h.join().expect("block worker panicked"))
                .collect()
        });
        let mut batch_out = Vec::with_capacity(batch_results.len());
        for r in batch_results {
            batch_out.push(r?);
        }
        on_batch(&batch_out)?;
    }

    Ok(())
}
