//! Boys function evaluation
//!
//! This module re-exports the `BoysFunction` trait from the algorithm module.
//!
//! # Usage
//!
//! ```
//! # use boys::prelude::*;
//! # use boys::ops::BoysFunction;
//! let evaluator = BoysEvaluator::new();
//! let f = evaluator.boys(3, &[0.5, 2.0, 50.0])?;
//! assert_eq!(f.shape(), [4, 3]);
//! # Ok::<(), boys::error::Error>(())
//! ```

// Re-export from algorithm module - single source of truth
pub use crate::algorithm::boys::BoysFunction;
