//! Operation traits

mod boys;

pub use boys::BoysFunction;
