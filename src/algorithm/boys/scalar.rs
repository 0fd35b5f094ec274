//! Per-abscissa Boys function kernels
//!
//! The batched evaluator is built from these. The formulas are kept exactly
//! as the device kernels compute them so the host result can serve as a
//! bit-reproducible oracle.

use super::{
    BoysTable, GRID_SPACING, INV_FACTORIAL, LOOKUP_BIAS, LOOKUP_SCALE, REFERENCE_ASYMPTOTIC_X,
    TAYLOR_TERMS,
};

/// √π
const SQRT_PI: f64 = 1.772_453_850_905_516;

/// Upper bound on series terms; x < 600 converges in well under 1000.
const SERIES_MAX_TERMS: usize = 2000;

// ============================================================================
// Short grid
// ============================================================================

/// Index of the grid node nearest to `x`.
#[inline]
pub fn grid_index(x: f64) -> usize {
    (LOOKUP_SCALE * (x + LOOKUP_BIAS)) as usize
}

/// Expansion offset `x_grid - x` (grid minus input).
#[inline]
pub fn grid_offset(x: f64, index: usize) -> f64 {
    let x_grid = index as f64 * GRID_SPACING;
    x_grid - x
}

/// Degree-7 Taylor polynomial in `dx` by Horner's method.
///
/// `c` holds `F_j .. F_{j+7}` at the node; with `dx = x_grid - x` the
/// alternating signs of the derivatives cancel.
#[inline]
pub fn taylor_interpolate(c: &[f64; TAYLOR_TERMS], dx: f64) -> f64 {
    c[0] + dx
        * (c[1]
            + dx * (INV_FACTORIAL[2] * c[2]
                + dx * (INV_FACTORIAL[3] * c[3]
                    + dx * (INV_FACTORIAL[4] * c[4]
                        + dx * (INV_FACTORIAL[5] * c[5]
                            + dx * (INV_FACTORIAL[6] * c[6] + dx * (INV_FACTORIAL[7] * c[7])))))))
}

/// F_order(x) by grid interpolation. Requires `x < X_MAX`.
#[inline]
pub fn boys_short_grid(table: &BoysTable, order: usize, x: f64) -> f64 {
    let index = grid_index(x);
    let dx = grid_offset(x, index);
    taylor_interpolate(table.coefficients(index, order), dx)
}

// ============================================================================
// Long range
// ============================================================================

/// F_order(x) by the asymptotic closed form, computed as
/// `scale * sqrt(x^-(2 order + 1))`. Requires `x >= X_MAX`.
///
/// This is the top-order formula of the recurrence path and is deliberately
/// not the same expression as [`boys_long_range_into`].
#[inline]
pub fn boys_long_range_single(table: &BoysTable, order: usize, x: f64) -> f64 {
    let p = -((2 * order + 1) as f64);
    let x2 = x.powf(p);
    table.long_range_scale(order) * x2.sqrt()
}

/// F_0(x) .. F_{out.len()-1}(x) by the asymptotic closed form using
/// repeated multiplication by `1/x`. Requires `x >= X_MAX`.
#[inline]
pub fn boys_long_range_into(table: &BoysTable, x: f64, out: &mut [f64]) {
    let x1 = 1.0 / x;
    let mut x2 = x1.sqrt();
    for (j, f) in out.iter_mut().enumerate() {
        *f = table.long_range_scale(j) * x2;
        x2 *= x1;
    }
}

// ============================================================================
// Reference series
// ============================================================================

/// Compute F_0(x) .. F_order(x) independently of the grid table.
///
/// The top order comes from the series
/// `F_N(x) = e^(-x) Σ_k (2x)^k / ((2N+1)(2N+3)…(2N+2k+1))`, whose terms are
/// all positive, then the downward recurrence fills the rest. Beyond
/// [`REFERENCE_ASYMPTOTIC_X`] the asymptotic form is exact to f64 for
/// orders up to `REFERENCE_MAX_ORDER`.
///
/// Accuracy: ~1e-14 relative up to and across the asymptotic switch.
pub fn boys_reference(order: usize, x: f64) -> Vec<f64> {
    let mut f = vec![0.0; order + 1];

    if x == 0.0 {
        for (n, v) in f.iter_mut().enumerate() {
            *v = 1.0 / (2 * n + 1) as f64;
        }
        return f;
    }

    if x >= REFERENCE_ASYMPTOTIC_X {
        // Γ(n+½)/2 · x^-(n+½), Γ built up from Γ(½) = √π
        let x1 = 1.0 / x;
        let mut xp = x1.sqrt();
        let mut gamma = SQRT_PI;
        for (n, v) in f.iter_mut().enumerate() {
            *v = 0.5 * gamma * xp;
            gamma *= n as f64 + 0.5;
            xp *= x1;
        }
        return f;
    }

    boys_reference_series(order, x)
}

/// Series top order plus downward recurrence, without the asymptotic switch.
pub(crate) fn boys_reference_series(order: usize, x: f64) -> Vec<f64> {
    let mut f = vec![0.0; order + 1];
    let exp_neg_x = (-x).exp();
    let two_x = 2.0 * x;
    f[order] = boys_series(order, two_x, exp_neg_x);
    for n in (0..order).rev() {
        f[n] = (two_x * f[n + 1] + exp_neg_x) / (2 * n + 1) as f64;
    }
    f
}

fn boys_series(order: usize, two_x: f64, exp_neg_x: f64) -> f64 {
    let mut denom = (2 * order + 1) as f64;
    let mut term = exp_neg_x / denom;
    let mut sum = term;
    for _ in 0..SERIES_MAX_TERMS {
        denom += 2.0;
        term *= two_x / denom;
        sum += term;
        // Terms shrink once 2x < denominator; stop when they no longer count.
        if two_x < denom && term <= sum * f64::EPSILON {
            break;
        }
    }
    sum
}
