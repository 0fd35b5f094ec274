//! Comparison of Boys function results against the host oracle
//!
//! Accelerator kernels are checked by reading their output back into a
//! [`BoysTensor`] and comparing it element-wise with [`BoysEvaluator`].
//! An element fails when `|candidate - reference| / |reference|` exceeds the
//! tolerance, or when the difference is NaN.

use std::fmt;

use crate::algorithm::boys::BoysFunction;
use crate::error::{Error, Result};
use crate::runtime::cpu::BoysEvaluator;
use crate::tensor::BoysTensor;

/// Relative tolerance used by device result checks
pub const DEFAULT_RTOL: f64 = 1e-6;

/// One element that failed the comparison
#[derive(Clone, Debug, PartialEq)]
pub struct Mismatch {
    /// Order (row) of the element
    pub order: usize,
    /// Batch position (column) of the element
    pub index: usize,
    /// Host oracle value
    pub reference: f64,
    /// Value under test
    pub candidate: f64,
    /// Relative difference (infinite or NaN when undefined)
    pub rel_diff: f64,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "order {}, x[{}]: ref res = {:e}, dev res = {:e}, rel diff = {:e}",
            self.order, self.index, self.reference, self.candidate, self.rel_diff
        )
    }
}

/// Outcome of comparing two result tensors
///
/// `{}` prints the failing elements and a summary line; `{:#}` prints every
/// element, with the relative difference appended to the failing ones.
#[derive(Clone, Debug, PartialEq)]
pub struct Comparison {
    rtol: f64,
    checked: usize,
    max_rel_diff: f64,
    mismatches: Vec<Mismatch>,
    width: usize,
    reference: Vec<f64>,
    candidate: Vec<f64>,
}

impl Comparison {
    /// True when no element exceeded the tolerance
    #[inline]
    pub fn passed(&self) -> bool {
        self.mismatches.is_empty()
    }

    /// Tolerance the comparison was run with
    #[inline]
    pub fn rtol(&self) -> f64 {
        self.rtol
    }

    /// Number of elements compared
    #[inline]
    pub fn checked(&self) -> usize {
        self.checked
    }

    /// Largest relative difference seen (`inf` if any was NaN)
    #[inline]
    pub fn max_rel_diff(&self) -> f64 {
        self.max_rel_diff
    }

    /// Failing elements, in row-major order
    #[inline]
    pub fn mismatches(&self) -> &[Mismatch] {
        &self.mismatches
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            for (k, (&r, &c)) in self.reference.iter().zip(&self.candidate).enumerate() {
                write!(
                    f,
                    "order {}, x[{}]: ref res = {:e}, dev res = {:e}",
                    k / self.width,
                    k % self.width,
                    r,
                    c
                )?;
                let rel_diff = relative_difference(r, c);
                if exceeds(rel_diff, self.rtol) {
                    writeln!(f, ", rel diff = {rel_diff:e}")?;
                } else {
                    writeln!(f)?;
                }
            }
        } else {
            for mismatch in &self.mismatches {
                writeln!(f, "{mismatch}")?;
            }
        }
        if self.passed() {
            write!(f, "Check passed")
        } else {
            write!(
                f,
                "Check failed: {} of {} elements exceed rtol {:e}",
                self.mismatches.len(),
                self.checked,
                self.rtol
            )
        }
    }
}

/// Compare `candidate` against `reference` element-wise.
///
/// # Errors
/// [`Error::ShapeMismatch`] if the tensors differ in shape.
pub fn compare(reference: &BoysTensor, candidate: &BoysTensor, rtol: f64) -> Result<Comparison> {
    if reference.shape() != candidate.shape() {
        return Err(Error::shape_mismatch(&reference.shape(), &candidate.shape()));
    }

    let width = reference.width();
    let mut max_rel_diff = 0.0_f64;
    let mut mismatches = Vec::new();

    for (k, (&r, &c)) in reference
        .as_slice()
        .iter()
        .zip(candidate.as_slice())
        .enumerate()
    {
        let rel_diff = relative_difference(r, c);
        if exceeds(rel_diff, rtol) {
            mismatches.push(Mismatch {
                order: k / width,
                index: k % width,
                reference: r,
                candidate: c,
                rel_diff,
            });
        }
        max_rel_diff = if rel_diff.is_nan() {
            f64::INFINITY
        } else {
            max_rel_diff.max(rel_diff)
        };
    }

    let comparison = Comparison {
        rtol,
        checked: reference.numel(),
        max_rel_diff,
        mismatches,
        width,
        reference: reference.as_slice().to_vec(),
        candidate: candidate.as_slice().to_vec(),
    };
    if comparison.passed() {
        log::debug!(
            "comparison passed: {} elements, max rel diff {:e}",
            comparison.checked,
            comparison.max_rel_diff
        );
    } else {
        log::warn!(
            "comparison failed: {} of {} elements exceed rtol {:e}",
            comparison.mismatches.len(),
            comparison.checked,
            rtol
        );
    }
    Ok(comparison)
}

/// Evaluate `candidate` and the host oracle on the same batch and compare.
///
/// # Errors
/// Domain errors from either evaluation (the oracle is checked first), or a
/// shape mismatch if the candidate returns a tensor of the wrong shape.
pub fn verify<F>(candidate: &F, order: usize, x: &[f64], rtol: f64) -> Result<Comparison>
where
    F: BoysFunction + ?Sized,
{
    let reference = BoysEvaluator::new().evaluate_slice(order, x)?;
    let result = candidate.boys(order, x)?;
    compare(&reference, &result, rtol)
}

fn exceeds(rel_diff: f64, rtol: f64) -> bool {
    rel_diff.is_nan() || rel_diff > rtol
}

fn relative_difference(reference: f64, candidate: f64) -> f64 {
    if reference == candidate {
        return 0.0;
    }
    (candidate - reference).abs() / reference.abs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::reference::ReferenceBoys;

    const X: [f64; 8] = [1.2, 3.4, 5.6, 7.8, 41.1, 42.2, 43.3, 44.4];

    #[test]
    fn test_identical_tensors_pass() {
        let f = BoysEvaluator::new().evaluate(3, &X).unwrap();
        let comparison = compare(&f, &f, DEFAULT_RTOL).unwrap();
        assert!(comparison.passed());
        assert_eq!(comparison.checked(), 32);
        assert_eq!(comparison.max_rel_diff(), 0.0);
        assert_eq!(comparison.to_string(), "Check passed");
    }

    #[test]
    fn test_reports_each_mismatch() {
        let reference = BoysEvaluator::new().evaluate(6, &X).unwrap();
        let mut candidate = reference.clone();
        candidate.row_mut(2)[5] *= 1.0 + 1e-4;
        candidate.row_mut(6)[0] = f64::NAN;

        let comparison = compare(&reference, &candidate, DEFAULT_RTOL).unwrap();
        assert!(!comparison.passed());
        assert_eq!(comparison.mismatches().len(), 2);

        let first = &comparison.mismatches()[0];
        assert_eq!((first.order, first.index), (2, 5));
        assert!((first.rel_diff - 1e-4).abs() < 1e-10);

        let second = &comparison.mismatches()[1];
        assert_eq!((second.order, second.index), (6, 0));
        assert!(second.rel_diff.is_nan());
        assert_eq!(comparison.max_rel_diff(), f64::INFINITY);
        assert!(comparison.to_string().ends_with("Check failed: 2 of 56 elements exceed rtol 1e-6"));
    }

    #[test]
    fn test_alternate_report_lists_every_element() {
        let reference = BoysTensor::from_vec(1, 2, vec![1.0, 0.5, 0.25, 0.125]).unwrap();
        let mut candidate = reference.clone();
        candidate.row_mut(1)[0] = 0.5;

        let comparison = compare(&reference, &candidate, DEFAULT_RTOL).unwrap();
        let full = format!("{comparison:#}");
        let lines: Vec<&str> = full.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "order 0, x[0]: ref res = 1e0, dev res = 1e0");
        assert_eq!(
            lines[2],
            "order 1, x[0]: ref res = 2.5e-1, dev res = 5e-1, rel diff = 1e0"
        );
        assert_eq!(lines[4], "Check failed: 1 of 4 elements exceed rtol 1e-6");

        // The plain form lists only the failure
        assert_eq!(comparison.to_string().lines().count(), 2);
    }

    #[test]
    fn test_zero_reference() {
        let reference = BoysTensor::from_vec(0, 2, vec![0.0, 0.0]).unwrap();
        let candidate = BoysTensor::from_vec(0, 2, vec![0.0, 1e-300]).unwrap();
        let comparison = compare(&reference, &candidate, DEFAULT_RTOL).unwrap();
        assert_eq!(comparison.mismatches().len(), 1);
        assert_eq!(comparison.mismatches()[0].rel_diff, f64::INFINITY);
    }

    #[test]
    fn test_shape_mismatch() {
        let a = BoysTensor::zeros(3, 8);
        let b = BoysTensor::zeros(4, 8);
        assert_eq!(
            compare(&a, &b, DEFAULT_RTOL).unwrap_err(),
            Error::shape_mismatch(&[4, 8], &[5, 8])
        );
    }

    #[test]
    fn test_verify_reference_implementation() {
        for order in [3, 6] {
            let comparison = verify(&ReferenceBoys, order, &X, DEFAULT_RTOL).unwrap();
            assert!(comparison.passed(), "{comparison}");
            assert!(comparison.max_rel_diff() < 1e-10);
        }
    }
}
