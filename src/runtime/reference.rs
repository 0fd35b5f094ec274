//! Series-expansion reference evaluator
//!
//! Independent of the grid table, slower, and accurate to ~1e-13 relative.
//! Used as the trusted oracle in tests and to regenerate the table.

use crate::algorithm::boys::{BoysFunction, REFERENCE_MAX_ORDER, boys_reference, validate_boys_args};
use crate::error::Result;
use crate::tensor::BoysTensor;

/// Reference Boys function implementation (series + downward recurrence)
#[derive(Clone, Copy, Debug, Default)]
pub struct ReferenceBoys;

impl BoysFunction for ReferenceBoys {
    fn max_order(&self) -> usize {
        REFERENCE_MAX_ORDER
    }

    fn boys(&self, order: usize, x: &[f64]) -> Result<BoysTensor> {
        validate_boys_args(order, REFERENCE_MAX_ORDER, x)?;

        let mut out = BoysTensor::zeros(order, x.len());
        for (i, &xi) in x.iter().enumerate() {
            for (j, f) in boys_reference(order, xi).into_iter().enumerate() {
                out.row_mut(j)[i] = f;
            }
        }
        Ok(out)
    }
}
