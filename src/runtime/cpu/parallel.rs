//! Thread-pool configuration for evaluating many batches at once

#[cfg(feature = "rayon")]
use std::sync::Arc;

/// Default minimum number of batches handed to one rayon task.
///
/// A single batch is a few hundred flops; smaller tasks are dominated by
/// scheduling overhead.
pub const DEFAULT_MIN_BATCHES_PER_TASK: usize = 16;

/// Parallelism settings for [`BoysEvaluator::evaluate_batches`].
///
/// Has no effect without the `rayon` feature.
///
/// [`BoysEvaluator::evaluate_batches`]: super::BoysEvaluator::evaluate_batches
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParallelismConfig {
    num_threads: Option<usize>,
    min_batches_per_task: Option<usize>,
}

impl ParallelismConfig {
    /// Create a configuration.
    ///
    /// - `num_threads`: size of a dedicated pool; `None` uses rayon's global pool
    /// - `min_batches_per_task`: lower bound on batches per task; `None` uses
    ///   [`DEFAULT_MIN_BATCHES_PER_TASK`]
    pub fn new(num_threads: Option<usize>, min_batches_per_task: Option<usize>) -> Self {
        Self {
            num_threads,
            min_batches_per_task,
        }
    }

    /// Requested thread count, if any
    #[inline]
    pub fn num_threads(&self) -> Option<usize> {
        self.num_threads
    }

    /// Effective minimum batches per task (at least 1)
    #[inline]
    pub fn min_batches_per_task(&self) -> usize {
        self.min_batches_per_task
            .unwrap_or(DEFAULT_MIN_BATCHES_PER_TASK)
            .max(1)
    }
}

/// Build a dedicated pool when a thread count is requested.
///
/// Falls back to the global pool (returns `None`) if the pool cannot be built.
#[cfg(feature = "rayon")]
pub(crate) fn build_pool(config: &ParallelismConfig) -> Option<Arc<rayon::ThreadPool>> {
    let num_threads = config.num_threads()?;
    match rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .thread_name(|i| format!("boys-worker-{i}"))
        .build()
    {
        Ok(pool) => Some(Arc::new(pool)),
        Err(err) => {
            log::warn!("failed to build {num_threads}-thread pool, using global pool: {err}");
            None
        }
    }
}

/// Run `op` inside `pool`, or on the current (global) pool.
#[cfg(feature = "rayon")]
pub(crate) fn install<OP, R>(pool: Option<&rayon::ThreadPool>, op: OP) -> R
where
    OP: FnOnce() -> R + Send,
    R: Send,
{
    match pool {
        Some(pool) => pool.install(op),
        None => op(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ParallelismConfig::default();
        assert_eq!(config.num_threads(), None);
        assert_eq!(config.min_batches_per_task(), DEFAULT_MIN_BATCHES_PER_TASK);
    }

    #[test]
    fn test_min_batches_clamped() {
        let config = ParallelismConfig::new(Some(2), Some(0));
        assert_eq!(config.num_threads(), Some(2));
        assert_eq!(config.min_batches_per_task(), 1);
    }

    #[cfg(feature = "rayon")]
    #[test]
    fn test_build_pool() {
        assert!(build_pool(&ParallelismConfig::default()).is_none());
        let pool = build_pool(&ParallelismConfig::new(Some(2), None)).unwrap();
        assert_eq!(pool.current_num_threads(), 2);
        assert_eq!(install(Some(&pool), rayon::current_num_threads), 2);
    }
}
