//! Boys function F_n(x) for Gaussian-basis integral evaluation
//!
//! ```text
//! F_n(x) = ∫₀¹ t^(2n) exp(-x t²) dt
//! ```
//!
//! # Algorithms
//!
//! - **Short grid** (`x < X_MAX`): Taylor expansion around the nearest node of
//!   a precomputed grid. Since `d/dx F_n = -F_{n+1}`, the node values of the
//!   next seven orders are the derivative coefficients.
//! - **Long range** (`x >= X_MAX`): asymptotic closed form
//!   `F_n(x) = Γ(n+½) / (2 x^(n+½))`.
//! - **Downward recurrence** (`order >= SMALL_ORDER_THRESHOLD`): only the top
//!   order is computed directly, lower orders follow from
//!   `F_n = (2x F_{n+1} + e^(-x)) / (2n+1)`.
//! - **Reference** ([`boys_reference`]): convergent series for the top order
//!   plus the same recurrence, independent of the grid table.

mod scalar;
mod table;

pub use scalar::*;
pub use table::*;

use crate::error::{Error, Result};
use crate::tensor::BoysTensor;

// ============================================================================
// Grid and dispatch constants
// ============================================================================

/// Boundary between the short-grid and long-range branches.
///
/// The comparison is strict: `x == X_MAX` takes the long-range branch.
pub const X_MAX: f64 = 40.0;

/// Distance between adjacent grid nodes
pub const GRID_SPACING: f64 = 0.1;

/// Reciprocal of [`GRID_SPACING`], used to quantize an abscissa
pub const LOOKUP_SCALE: f64 = 10.0;

/// Half a grid step; added before truncation so the nearest node is selected
pub const LOOKUP_BIAS: f64 = 0.05;

/// Number of Taylor terms stored per (node, order): value + 7 derivatives
pub const TAYLOR_TERMS: usize = 8;

/// Highest order the grid table can interpolate
pub const MAX_ORDER: usize = 12;

/// Highest order stored at each grid node
pub const GRID_MAX_N: usize = MAX_ORDER + TAYLOR_TERMS - 1;

/// Number of values stored per grid node
pub const GRID_STRIDE: usize = GRID_MAX_N + 1;

/// Number of grid nodes, covering `[0, X_MAX]` inclusive
pub const GRID_NODES: usize = 401;

/// Orders below this are computed directly; from here on the evaluator
/// computes only the top order and recurs downward
pub const SMALL_ORDER_THRESHOLD: usize = 4;

/// Reference batch width
pub const BATCH_SIZE: usize = 8;

/// Reciprocal factorials `1/k!` for the Taylor terms
pub const INV_FACTORIAL: [f64; TAYLOR_TERMS] = [
    1.0,
    1.0,
    1.0 / 2.0,
    1.0 / 6.0,
    1.0 / 24.0,
    1.0 / 120.0,
    1.0 / 720.0,
    1.0 / 5040.0,
];

/// Long-range scale factors `Γ(n+½) / 2` for `n = 0..=MAX_ORDER`
pub const LONG_RANGE_SCALE: [f64; MAX_ORDER + 1] = [
    0.886226925452758,
    0.443113462726379,
    0.6646701940895685,
    1.6616754852239213,
    5.815864198283724,
    26.17138889227676,
    143.94263890752217,
    935.6271528988942,
    7017.2036467417065,
    59646.230997304505,
    566639.1944743928,
    5949711.541981124,
    68421682.73278293,
];

/// Above this abscissa the reference evaluator switches to the asymptotic
/// form; the neglected term is below `exp(-600)`
pub const REFERENCE_ASYMPTOTIC_X: f64 = 600.0;

/// Highest order the reference evaluator accepts
pub const REFERENCE_MAX_ORDER: usize = 64;

/// Largest accepted abscissa; the recurrence needs `2x` to stay finite
pub const MAX_ARGUMENT: f64 = f64::MAX / 2.0;

// ============================================================================
// Boys Function Trait
// ============================================================================

/// Batched Boys function evaluation.
///
/// Implemented by the grid evaluator and by the series reference so that the
/// two can be swapped or compared against each other.
///
/// # Properties
/// - `F_n(0) = 1/(2n+1)`
/// - `F_n(x) > 0` and decreasing in `x` for every `n`
/// - `(2n+1) F_n(x) = 2x F_{n+1}(x) + e^(-x)`
pub trait BoysFunction {
    /// Highest order this implementation accepts.
    fn max_order(&self) -> usize;

    /// Compute `F_0 .. F_order` for every abscissa.
    ///
    /// Returns an `(order+1) × x.len()` tensor, row `j` holding `F_j` for the
    /// whole batch.
    ///
    /// # Errors
    /// [`Error::Domain`] if `order > self.max_order()` or any `x[i]` is
    /// NaN or outside `[0, MAX_ARGUMENT]`. No output is produced in that case.
    fn boys(&self, order: usize, x: &[f64]) -> Result<BoysTensor>;

    /// Compute `F_0(x) .. F_order(x)` for a single abscissa.
    fn boys_scalar(&self, order: usize, x: f64) -> Result<Vec<f64>> {
        Ok(self.boys(order, &[x])?.into_vec())
    }
}

/// Validate the preconditions shared by every [`BoysFunction`] implementation.
///
/// The reported index is the position of the first offending element.
pub fn validate_boys_args(order: usize, max_order: usize, x: &[f64]) -> Result<()> {
    if order > max_order {
        return Err(Error::order_out_of_range(order, max_order));
    }
    if let Some((index, &value)) = x
        .iter()
        .enumerate()
        .find(|&(_, v)| !(0.0..=MAX_ARGUMENT).contains(v))
    {
        return Err(Error::invalid_argument(index, value));
    }
    Ok(())
}
