//! Common test utilities
#![allow(dead_code)]

use boys::prelude::*;

/// Batch used by the accelerator host drivers: four short-grid and four
/// long-range abscissas
pub const SAMPLE_BATCH: [f64; BATCH_SIZE] = [1.2, 3.4, 5.6, 7.8, 41.1, 42.2, 43.3, 44.4];

/// Create an evaluator over the process-wide table
pub fn create_evaluator() -> BoysEvaluator<'static> {
    BoysEvaluator::new()
}

/// Assert two f64 slices are close within tolerance
///
/// Uses the formula: |a - b| <= atol + rtol * |b|
pub fn assert_allclose_f64(a: &[f64], b: &[f64], rtol: f64, atol: f64, msg: &str) {
    assert_eq!(a.len(), b.len(), "{}: length mismatch", msg);
    for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
        let diff = (x - y).abs();
        let tol = atol + rtol * y.abs();
        assert!(
            diff <= tol,
            "{}: element {} differs: {} vs {} (diff={}, tol={})",
            msg,
            i,
            x,
            y,
            diff,
            tol
        );
    }
}

/// Abscissas from 0 to `max` in steps of `step`
pub fn linspace_step(max: f64, step: f64) -> Vec<f64> {
    (0..)
        .map(|i| i as f64 * step)
        .take_while(|&x| x <= max)
        .collect()
}
