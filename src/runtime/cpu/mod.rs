//! CPU Boys function evaluator
//!
//! Evaluates batches against the embedded grid table. Within a batch the work
//! is per element and sequential; across batches it is spread over a rayon
//! pool when the `rayon` feature is enabled.
//!
//! # Module Structure
//!
//! - `algorithm::boys` - Tables and per-abscissa kernels
//! - `kernels` - Batched small-order and large-order kernels
//! - `parallel` - Thread-pool configuration

mod client;
pub(crate) mod kernels;
mod parallel;


pub use client::BoysEvaluator;
pub use parallel::{DEFAULT_MIN_BATCHES_PER_TASK, ParallelismConfig};
