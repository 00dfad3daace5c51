//! Parallelism budget for the transforms, and the loop partition primitive
//! they are built on.
//!
//! Without the `multithreaded` feature the partitions below still produce the
//! same chunks, they are just visited one after the other on the caller's
//! thread.

use maybe_rayon::prelude::*;

/// How many workers a single transform call may occupy.
///
/// The default is the number of threads in the rayon pool when the
/// `multithreaded` feature is enabled, and `1` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parallelism {
    max_workers: usize,
}

impl Parallelism {
    /// Creates a budget of `max_workers` workers.
    ///
    /// A budget of zero is treated as one.
    pub const fn new(max_workers: usize) -> Self {
        let max_workers = if max_workers == 0 { 1 } else { max_workers };
        Self { max_workers }
    }

    /// Everything runs on the caller's thread.
    pub const fn single_threaded() -> Self {
        Self::new(1)
    }

    pub const fn max_workers(&self) -> usize {
        self.max_workers
    }

    /// The number of recursion levels that may fork a sibling task.
    ///
    /// Forking at the first `log2(next_power_of_two(max_workers))` levels
    /// yields at least as many concurrent branches as there are workers.
    /// Budgets above the largest power of two in `usize` fork at every level.
    pub const fn max_splits(&self) -> usize {
        if self.max_workers <= 1 {
            return 0;
        }
        match self.max_workers.checked_next_power_of_two() {
            Some(rounded) => rounded.trailing_zeros() as usize,
            None => usize::BITS as usize,
        }
    }
}

impl Default for Parallelism {
    fn default() -> Self {
        Self::new(maybe_rayon::current_num_threads())
    }
}

/// The parallelism decisions for one top-level transform call.
///
/// This is derived once from a [`Parallelism`] and then copied down the
/// recursion unchanged.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SplitPlan {
    max_splits: usize,
    max_workers: usize,
}

impl SplitPlan {
    pub(crate) const fn new(parallelism: &Parallelism) -> Self {
        Self {
            max_splits: parallelism.max_splits(),
            max_workers: parallelism.max_workers(),
        }
    }

    /// Whether the recursion at `stage` runs its two halves concurrently.
    pub(crate) const fn forks_at(&self, stage: usize) -> bool {
        stage < self.max_splits
    }

    /// Workers still available to a single branch at `stage`.
    ///
    /// Every level above has already split the budget in two.
    pub(crate) fn workers_at(&self, stage: usize) -> usize {
        let shift = u32::try_from(stage).unwrap_or(u32::MAX);
        self.max_workers.checked_shr(shift).unwrap_or(0).max(1)
    }
}

/// Number of elements each worker receives when `len` elements are spread over
/// at most `max_workers` contiguous chunks.
const fn chunk_size(len: usize, max_workers: usize) -> usize {
    let max_workers = if max_workers == 0 { 1 } else { max_workers };
    let size = len.div_ceil(max_workers);
    if size == 0 {
        1
    } else {
        size
    }
}

/// Splits `values` into at most `max_workers` contiguous chunks and calls
/// `worker(start, chunk)` on each, where `start` is the index of the chunk's
/// first element in `values`.
///
/// Returns once every chunk has been processed.
pub(crate) fn execute<T, F>(values: &mut [T], max_workers: usize, worker: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Send + Sync,
{
    let size = chunk_size(values.len(), max_workers);
    values
        .maybe_par_chunks_mut(size)
        .enumerate()
        .for_each(|(chunk_idx, chunk)| worker(chunk_idx * size, chunk));
}

/// Like [`execute`], but walks two equally long slices in lockstep.
///
/// The chunk handed to `worker` for `lo` and for `hi` cover the same index
/// range `start..start + chunk.len()`.
pub(crate) fn execute_paired<T, F>(lo: &mut [T], hi: &mut [T], max_workers: usize, worker: F)
where
    T: Send,
    F: Fn(usize, &mut [T], &mut [T]) + Send + Sync,
{
    assert_eq!(lo.len(), hi.len(), "paired slices must have the same length");

    let size = chunk_size(lo.len(), max_workers);
    lo.maybe_par_chunks_mut(size)
        .zip(hi.maybe_par_chunks_mut(size))
        .enumerate()
        .for_each(|(chunk_idx, (lo, hi))| worker(chunk_idx * size, lo, hi));
}
