//! Core result tensor type

use crate::error::{Error, Result};
use std::fmt;
use std::ops::Index;

/// Dense `(order+1) × width` table of Boys function values
///
/// Row `j` holds `F_j(x[i])` for every batch element `i`; rows are stored
/// contiguously, so a consumer interested in a single order can stream one
/// row at a time.
///
/// # Example
///
/// ```
/// use boys::prelude::*;
///
/// let evaluator = BoysEvaluator::new();
/// let f = evaluator.evaluate(2, &[0.0, 1.0])?;
/// assert_eq!(f.shape(), [3, 2]);
/// assert_eq!(f[(0, 0)], 1.0);
/// # Ok::<(), boys::error::Error>(())
/// ```
#[derive(Clone, PartialEq)]
pub struct BoysTensor {
    order: usize,
    width: usize,
    data: Vec<f64>,
}

impl BoysTensor {
    /// Create a zero-filled tensor for orders `0..=order` and `width` abscissas
    pub fn zeros(order: usize, width: usize) -> Self {
        Self {
            order,
            width,
            data: vec![0.0; (order + 1) * width],
        }
    }

    /// Wrap row-major data of length `(order+1) * width`
    ///
    /// Useful for comparing results read back from another implementation.
    pub fn from_vec(order: usize, width: usize, data: Vec<f64>) -> Result<Self> {
        if data.len() != (order + 1) * width {
            return Err(Error::shape_mismatch(&[order + 1, width], &[data.len()]));
        }
        Ok(Self { order, width, data })
    }

    /// Highest order stored
    #[inline]
    pub fn order(&self) -> usize {
        self.order
    }

    /// Number of abscissas per row
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// `[order + 1, width]`
    #[inline]
    pub fn shape(&self) -> [usize; 2] {
        [self.order + 1, self.width]
    }

    /// Total number of values
    #[inline]
    pub fn numel(&self) -> usize {
        self.data.len()
    }

    /// Values of `F_order` for the whole batch.
    ///
    /// # Panics
    ///
    /// Panics if `order > self.order()`.
    #[inline]
    pub fn row(&self, order: usize) -> &[f64] {
        assert!(order <= self.order, "row {order} out of range 0..={}", self.order);
        &self.data[order * self.width..(order + 1) * self.width]
    }

    /// Mutable access to the values of `F_order`.
    ///
    /// # Panics
    ///
    /// Panics if `order > self.order()`.
    #[inline]
    pub fn row_mut(&mut self, order: usize) -> &mut [f64] {
        assert!(order <= self.order, "row {order} out of range 0..={}", self.order);
        &mut self.data[order * self.width..(order + 1) * self.width]
    }

    /// Iterate over rows in increasing order.
    ///
    /// A tensor of width zero yields no rows.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[f64]> + '_ {
        self.data.chunks_exact(self.width.max(1))
    }

    /// `F_order(x[index])`, or `None` when out of range
    #[inline]
    pub fn get(&self, order: usize, index: usize) -> Option<f64> {
        if order > self.order || index >= self.width {
            return None;
        }
        Some(self.data[order * self.width + index])
    }

    /// All orders `F_0 .. F_order` for one batch element.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.width()`.
    pub fn column(&self, index: usize) -> Vec<f64> {
        assert!(index < self.width, "column {index} out of range 0..{}", self.width);
        self.data
            .iter()
            .skip(index)
            .step_by(self.width)
            .copied()
            .collect()
    }

    /// Row-major view of all values
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    #[inline]
    pub(crate) fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Consume the tensor, returning the row-major values
    #[inline]
    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }
}

impl Index<(usize, usize)> for BoysTensor {
    type Output = f64;

    /// `tensor[(order, index)]`
    fn index(&self, (order, index): (usize, usize)) -> &f64 {
        &self.row(order)[index]
    }
}

impl fmt::Debug for BoysTensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoysTensor")
            .field("shape", &self.shape())
            .field("data", &self.data)
            .finish()
    }
}
