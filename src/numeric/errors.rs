// ============================================================================
// Numeric Errors
// Error types for arbitrary-precision arithmetic and multiplication backends
// ============================================================================

use std::fmt;

/// Errors that can occur in the arithmetic engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericError {
    /// Attempted division by zero
    DivisionByZero,
    /// Inverse square root of a zero or negative value
    NonPositiveOperand,
    /// A transform of the requested order is beyond the configured tables
    CapacityExceeded {
        /// Transform order (log2 of the length) that was requested
        requested_order: u32,
        /// Largest order the active strategy supports
        max_order: u32,
    },
    /// Floating transform round-off was too large to recover exact limbs
    PrecisionLoss,
    /// A series range `[start, end)` with no terms in it
    EmptyRange {
        start: u32,
        end: u32,
    },
}

impl NumericError {
    /// Whether this error is an invalid-operand failure (as opposed to a
    /// capacity failure of the multiplication backend).
    pub fn is_arithmetic(&self) -> bool {
        matches!(
            self,
            NumericError::DivisionByZero
                | NumericError::NonPositiveOperand
                | NumericError::EmptyRange { .. }
        )
    }
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::DivisionByZero => write!(f, "division by zero"),
            NumericError::NonPositiveOperand => {
                write!(f, "inverse square root of a non-positive value")
            },
            NumericError::CapacityExceeded {
                requested_order,
                max_order,
            } => write!(
                f,
                "capacity exceeded: transform order {} requested, maximum is {}",
                requested_order, max_order
            ),
            NumericError::PrecisionLoss => write!(
                f,
                "precision loss: transform round-off exceeded the safe bound"
            ),
            NumericError::EmptyRange { start, end } => {
                write!(f, "empty series range [{}, {})", start, end)
            },
        }
    }
}

impl std::error::Error for NumericError {}

/// Result type alias for numeric operations
pub type NumericResult<T> = Result<T, NumericError>;
