//! Boys function backends
//!
//! - [`cpu::BoysEvaluator`]: grid interpolation / asymptotic / recurrence,
//!   the bit-reproducible host oracle
//! - [`reference::ReferenceBoys`]: table-free series evaluation
//!
//! Both implement [`BoysFunction`](crate::algorithm::boys::BoysFunction).

pub mod cpu;
pub mod reference;
