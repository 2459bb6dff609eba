use rayon::prelude::*;

/// Number of pixels from which [`ExecutionStrategy::Auto`] switches to parallel rows.
pub const AUTO_PARALLEL_MIN_PIXELS: usize = 100_000;

/// Controls how row-wise operations are executed.
///
/// Every output sample depends only on the frozen input, so all strategies
/// produce bit-identical results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Run sequentially on the current thread.
    Serial,

    /// Process rows on the global Rayon thread pool.
    Parallel,

    /// Parallel for images with at least [`AUTO_PARALLEL_MIN_PIXELS`] pixels, serial otherwise.
    #[default]
    Auto,
}

impl ExecutionStrategy {
    /// Whether the strategy runs in parallel for an image with `num_pixels` pixels.
    pub fn is_parallel(&self, num_pixels: usize) -> bool {
        match self {
            ExecutionStrategy::Serial => false,
            ExecutionStrategy::Parallel => true,
            ExecutionStrategy::Auto => num_pixels >= AUTO_PARALLEL_MIN_PIXELS,
        }
    }
}

/// Apply `f(row_index, row)` to every row of length `row_len` in `dst`.
pub(crate) fn for_each_row<T, F>(
    dst: &mut [T],
    row_len: usize,
    num_pixels: usize,
    strategy: ExecutionStrategy,
    f: F,
) where
    T: Send,
    F: Fn(usize, &mut [T]) + Send + Sync,
{
    if row_len == 0 {
        return;
    }

    if strategy.is_parallel(num_pixels) {
        dst.par_chunks_mut(row_len)
            .enumerate()
            .for_each(|(r, row)| f(r, row));
    } else {
        dst.chunks_mut(row_len)
            .enumerate()
            .for_each(|(r, row)| f(r, row));
    }
}
