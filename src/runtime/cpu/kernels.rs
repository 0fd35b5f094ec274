//! Batched Boys function kernels
//!
//! Both kernels write a row-major `(order+1) × x.len()` buffer. Arguments are
//! validated by the caller; the kernels themselves cannot fail.

use crate::algorithm::boys::{
    BoysTable, SMALL_ORDER_THRESHOLD, X_MAX, boys_long_range_into, boys_long_range_single,
    boys_short_grid, grid_index, grid_offset, taylor_interpolate,
};

/// Fill `out` with `F_0 .. F_order` for every element of `x`.
#[inline]
pub(crate) fn boys_batch(table: &BoysTable, order: usize, x: &[f64], out: &mut [f64]) {
    debug_assert_eq!(out.len(), (order + 1) * x.len());
    if order < SMALL_ORDER_THRESHOLD {
        boys_small_order(table, order, x, out);
    } else {
        boys_large_order(table, order, x, out);
    }
}

/// Every order computed directly, per element.
fn boys_small_order(table: &BoysTable, order: usize, x: &[f64], out: &mut [f64]) {
    let width = x.len();
    let mut column = [0.0; SMALL_ORDER_THRESHOLD];
    let column = &mut column[..=order];

    for (i, &xi) in x.iter().enumerate() {
        if xi < X_MAX {
            let index = grid_index(xi);
            let dx = grid_offset(xi, index);
            for (j, f) in column.iter_mut().enumerate() {
                *f = taylor_interpolate(table.coefficients(index, j), dx);
            }
        } else {
            boys_long_range_into(table, xi, column);
        }

        for (j, &f) in column.iter().enumerate() {
            out[j * width + i] = f;
        }
    }
}

/// Top order computed directly, the rest by downward recurrence.
fn boys_large_order(table: &BoysTable, order: usize, x: &[f64], out: &mut [f64]) {
    let width = x.len();

    {
        let top = &mut out[order * width..];
        for (f, &xi) in top.iter_mut().zip(x) {
            *f = if xi < X_MAX {
                boys_short_grid(table, order, xi)
            } else {
                boys_long_range_single(table, order, xi)
            };
        }
    }

    let two_x: Vec<f64> = x.iter().map(|&xi| 2.0 * xi).collect();
    let exp_neg_x: Vec<f64> = x.iter().map(|&xi| (-xi).exp()).collect();

    // F_n = (2x F_{n+1} + e^-x) / (2n+1); must run with n decreasing.
    for n in (0..order).rev() {
        let den = 1.0 / (2.0 * n as f64 + 1.0);
        let (lower, upper) = out.split_at_mut((n + 1) * width);
        let row = &mut lower[n * width..];
        let next = &upper[..width];

        for (((f, &f_next), &tx), &ex) in row.iter_mut().zip(next).zip(&two_x).zip(&exp_neg_x) {
            *f = den * (tx * f_next + ex);
        }
    }
}
