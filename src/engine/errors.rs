// ============================================================================
// Computation Errors
// Failures of a complete pi computation
// ============================================================================

use crate::interfaces::StoreError;
use crate::numeric::NumericError;
use std::fmt;

/// Errors surfaced by [`PiEngine`](crate::engine::PiEngine).
///
/// All of them are fatal for the run; nothing is retried.
#[derive(Debug)]
pub enum ComputeError {
    /// The configuration failed validation
    InvalidConfig(String),
    /// The derived term count does not fit a 32-bit leaf index
    LimitExceeded {
        /// Terms the digit count would need
        terms: u64,
        /// Largest supported term count
        max: u64,
    },
    /// Arithmetic or multiplication backend failure
    Numeric(NumericError),
    /// Persisting the digits failed
    Io(StoreError),
}

impl ComputeError {
    /// Whether the failure was detected before any series evaluation ran.
    pub fn is_eager(&self) -> bool {
        match self {
            ComputeError::InvalidConfig(_) | ComputeError::LimitExceeded { .. } => true,
            ComputeError::Numeric(NumericError::CapacityExceeded { .. }) => true,
            ComputeError::Numeric(_) | ComputeError::Io(_) => false,
        }
    }
}

impl fmt::Display for ComputeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComputeError::InvalidConfig(reason) => write!(f, "invalid configuration: {}", reason),
            ComputeError::LimitExceeded { terms, max } => write!(
                f,
                "limit exceeded: {} series terms needed, at most {} supported",
                terms, max
            ),
            ComputeError::Numeric(err) => write!(f, "{}", err),
            ComputeError::Io(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ComputeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ComputeError::Numeric(err) => Some(err),
            ComputeError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<NumericError> for ComputeError {
    fn from(err: NumericError) -> Self {
        ComputeError::Numeric(err)
    }
}

impl From<StoreError> for ComputeError {
    fn from(err: StoreError) -> Self {
        ComputeError::Io(err)
    }
}

/// Result type alias for complete computations
pub type ComputeResult<T> = Result<T, ComputeError>;
