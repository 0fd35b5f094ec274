//! Error types for boys

use thiserror::Error;

/// Result type alias using boys' Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in boys operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Input outside the domain the evaluator supports
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Buffer or tensor shape does not match the requested evaluation
    #[error("Shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        /// Expected shape
        expected: Vec<usize>,
        /// Actual shape
        got: Vec<usize>,
    },
}

/// Precondition violations of a Boys function evaluation.
///
/// These are caller defects, never transient conditions: nothing is written
/// to the output when one is raised.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Requested order exceeds what the lookup table can interpolate
    #[error("order {order} exceeds maximum supported order {max_order}")]
    OrderOutOfRange {
        /// The requested order
        order: usize,
        /// Highest order supported
        max_order: usize,
    },

    /// Abscissa is NaN or outside `[0, MAX_ARGUMENT]`
    #[error("argument x[{index}] = {value} is NaN or outside [0, f64::MAX / 2]")]
    InvalidArgument {
        /// Position of the offending element in the batch
        index: usize,
        /// The offending value
        value: f64,
    },
}

impl Error {
    /// Create an order-out-of-range domain error
    pub fn order_out_of_range(order: usize, max_order: usize) -> Self {
        Self::Domain(DomainError::OrderOutOfRange { order, max_order })
    }

    /// Create an invalid-argument domain error
    pub fn invalid_argument(index: usize, value: f64) -> Self {
        Self::Domain(DomainError::InvalidArgument { index, value })
    }

    /// Create a shape mismatch error
    pub fn shape_mismatch(expected: &[usize], got: &[usize]) -> Self {
        Self::ShapeMismatch {
            expected: expected.to_vec(),
            got: got.to_vec(),
        }
    }

    /// Whether this error is a domain (precondition) violation
    pub fn is_domain_error(&self) -> bool {
        matches!(self, Self::Domain(_))
    }
}
