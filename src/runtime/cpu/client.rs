//! CPU Boys function evaluator

#[cfg(feature = "rayon")]
use std::sync::Arc;

use super::kernels::boys_batch;
use super::parallel::ParallelismConfig;
use crate::algorithm::boys::{BoysFunction, BoysTable, MAX_ORDER, validate_boys_args};
use crate::error::{Error, Result};
use crate::tensor::BoysTensor;

/// Batched Boys function evaluator backed by the grid table
///
/// Cheap to clone and safe to share between threads: the only state is a
/// reference to the immutable table and the parallelism settings.
///
/// # Example
///
/// ```
/// use boys::prelude::*;
///
/// let evaluator = BoysEvaluator::new();
/// let x = [1.2, 3.4, 5.6, 7.8, 41.1, 42.2, 43.3, 44.4];
/// let f = evaluator.evaluate(6, &x)?;
/// assert_eq!(f.shape(), [7, BATCH_SIZE]);
/// # Ok::<(), boys::error::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct BoysEvaluator<'a> {
    table: &'a BoysTable,
    parallelism: ParallelismConfig,
    #[cfg(feature = "rayon")]
    pool: Option<Arc<rayon::ThreadPool>>,
}

impl BoysEvaluator<'static> {
    /// Create an evaluator using the process-wide table
    pub fn new() -> Self {
        Self::with_table(BoysTable::global())
    }
}

impl Default for BoysEvaluator<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> BoysEvaluator<'a> {
    /// Create an evaluator over a specific table
    pub fn with_table(table: &'a BoysTable) -> Self {
        Self {
            table,
            parallelism: ParallelismConfig::default(),
            #[cfg(feature = "rayon")]
            pool: None,
        }
    }

    /// Attach parallelism settings for [`Self::evaluate_batches`]
    pub fn with_parallelism(mut self, config: ParallelismConfig) -> Self {
        #[cfg(feature = "rayon")]
        {
            self.pool = super::parallel::build_pool(&config);
        }
        self.parallelism = config;
        self
    }

    /// The table this evaluator interpolates from
    #[inline]
    pub fn table(&self) -> &'a BoysTable {
        self.table
    }

    /// Current parallelism settings
    #[inline]
    pub fn parallelism(&self) -> ParallelismConfig {
        self.parallelism
    }

    /// Compute `F_0 .. F_order` for a fixed-width batch.
    ///
    /// # Errors
    /// [`Error::Domain`] if `order > MAX_ORDER` or any `x[i]` is NaN or outside
    /// `[0, MAX_ARGUMENT]`.
    pub fn evaluate<const B: usize>(&self, order: usize, x: &[f64; B]) -> Result<BoysTensor> {
        self.evaluate_slice(order, x)
    }

    /// Compute `F_0 .. F_order` for a batch of any width.
    pub fn evaluate_slice(&self, order: usize, x: &[f64]) -> Result<BoysTensor> {
        validate_boys_args(order, MAX_ORDER, x)?;
        Ok(self.compute(order, x))
    }

    /// Compute into a caller-owned tensor of shape `[order+1, x.len()]`.
    ///
    /// `out` is left untouched on error.
    pub fn evaluate_into(&self, order: usize, x: &[f64], out: &mut BoysTensor) -> Result<()> {
        validate_boys_args(order, MAX_ORDER, x)?;
        let expected = [order + 1, x.len()];
        if out.shape() != expected {
            return Err(Error::shape_mismatch(&expected, &out.shape()));
        }
        boys_batch(self.table, order, x, out.as_mut_slice());
        Ok(())
    }

    /// Evaluate many independent batches.
    ///
    /// Results are in input order and identical to calling
    /// [`Self::evaluate`] on each batch. With the `rayon` feature the batches
    /// are spread over the configured pool. Every batch is validated before
    /// any is evaluated; an invalid-argument index refers to the flattened
    /// input.
    pub fn evaluate_batches<const B: usize>(
        &self,
        order: usize,
        batches: &[[f64; B]],
    ) -> Result<Vec<BoysTensor>> {
        validate_boys_args(order, MAX_ORDER, batches.as_flattened())?;

        #[cfg(feature = "rayon")]
        {
            if batches.len() > 1 {
                return Ok(self.evaluate_batches_parallel(order, batches));
            }
        }

        Ok(batches
            .iter()
            .map(|batch| self.compute(order, batch))
            .collect())
    }

    #[cfg(feature = "rayon")]
    fn evaluate_batches_parallel<const B: usize>(
        &self,
        order: usize,
        batches: &[[f64; B]],
    ) -> Vec<BoysTensor> {
        use rayon::prelude::*;

        let min_len = self.parallelism.min_batches_per_task();
        log::debug!(
            "evaluating {} batches of width {B} up to order {order} (min {min_len} per task)",
            batches.len()
        );
        super::parallel::install(self.pool.as_deref(), || {
            batches
                .par_iter()
                .with_min_len(min_len)
                .map(|batch| self.compute(order, batch))
                .collect()
        })
    }

    fn compute(&self, order: usize, x: &[f64]) -> BoysTensor {
        let mut out = BoysTensor::zeros(order, x.len());
        boys_batch(self.table, order, x, out.as_mut_slice());
        out
    }
}

impl BoysFunction for BoysEvaluator<'_> {
    fn max_order(&self) -> usize {
        MAX_ORDER
    }

    fn boys(&self, order: usize, x: &[f64]) -> Result<BoysTensor> {
        self.evaluate_slice(order, x)
    }
}
