//! # boys
//!
//! **Batched Boys function evaluation for Gaussian-basis integral codes.**
//!
//! ```text
//! F_n(x) = ∫₀¹ t^(2n) exp(-x t²) dt
//! ```
//!
//! boys computes `F_0(x) .. F_order(x)` for a batch of abscissas and serves as
//! the bit-reproducible host reference that accelerator kernels are checked
//! against.
//!
//! ## Algorithms
//!
//! - **Short grid** (`x < 40`): 8-term Taylor expansion around the nearest
//!   node of a precomputed table (spacing 0.1)
//! - **Long range** (`x >= 40`): asymptotic closed form `Γ(n+½) / (2 x^(n+½))`
//! - **Downward recurrence** (order >= 4): only the top order is computed
//!   directly, the rest follow from `F_n = (2x F_{n+1} + e^(-x)) / (2n+1)`
//!
//! ## Quick Start
//!
//! ```rust
//! use boys::prelude::*;
//!
//! let evaluator = BoysEvaluator::new();
//! let x = [1.2, 3.4, 5.6, 7.8, 41.1, 42.2, 43.3, 44.4];
//! let f = evaluator.evaluate(3, &x)?;
//!
//! // Row j holds F_j for the whole batch
//! assert_eq!(f.row(0).len(), 8);
//! # Ok::<(), boys::error::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `rayon` (default): Multi-threaded evaluation of many batches

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod algorithm;
pub mod error;
pub mod ops;
pub mod runtime;
pub mod tensor;
pub mod verify;

use crate::error::Result;
use crate::tensor::BoysTensor;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::algorithm::boys::{BATCH_SIZE, BoysFunction, BoysTable, MAX_ORDER, X_MAX};
    pub use crate::error::{DomainError, Error, Result};
    pub use crate::runtime::cpu::{BoysEvaluator, ParallelismConfig};
    pub use crate::runtime::reference::ReferenceBoys;
    pub use crate::tensor::BoysTensor;
    pub use crate::verify::{Comparison, DEFAULT_RTOL, compare, verify};
}

/// Compute `F_0 .. F_order` for a batch using the process-wide table.
///
/// Shorthand for `BoysEvaluator::new().evaluate(order, x)`.
pub fn boys_function<const B: usize>(order: usize, x: &[f64; B]) -> Result<BoysTensor> {
    runtime::cpu::BoysEvaluator::new().evaluate(order, x)
}
