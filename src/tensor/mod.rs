//! Result tensor types
//!
//! Evaluations return a [`BoysTensor`], an owned row-major
//! `(order+1) × width` buffer.

mod core;

pub use core::BoysTensor;
