//! Numerical algorithms
//!
//! Backend-independent math: lookup tables, scalar kernels and the
//! [`BoysFunction`](boys::BoysFunction) trait that backends implement.

pub mod boys;
