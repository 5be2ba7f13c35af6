//! Error types for estimation.
//!
//! Every estimator surfaces one of two failure modes:
//! - `InvalidArgument`: a sample count, chunk limit or pool size that cannot
//!   produce an estimate
//! - `ExecutionFailure`: a chunk task could not be scheduled or did not finish

use thiserror::Error;

/// Errors raised by the chunk estimator and the chunked aggregator.
///
/// Both variants propagate directly to the caller. There is no retry and no
/// partial result.
///
/// # Examples
/// ```
/// use pi_core::EstimateError;
///
/// let err = EstimateError::invalid("n", "sample count must be at least 1");
/// assert_eq!(
///     format!("{}", err),
///     "Invalid argument 'n': sample count must be at least 1"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EstimateError {
    /// A parameter outside its valid domain.
    #[error("Invalid argument '{name}': {reason}")]
    InvalidArgument {
        /// Parameter name.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// A dispatched chunk could not be scheduled or crashed.
    #[error("Execution failure: {0}")]
    ExecutionFailure(String),
}

impl EstimateError {
    /// Shorthand for [`EstimateError::InvalidArgument`].
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }

    /// Returns `true` for argument validation failures.
    #[inline]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    /// Returns `true` for scheduling or task failures.
    #[inline]
    pub fn is_execution_failure(&self) -> bool {
        matches!(self, Self::ExecutionFailure(_))
    }
}
