// ============================================================================
// Numeric Module
// Arbitrary-precision fixed-point arithmetic for the series evaluation
// ============================================================================
//
// This module provides:
// - BigFloat: signed radix-10^9 value with a limb exponent
// - Newton solvers: reciprocal, division and inverse square root
// - Decimal rendering with truncation at the last requested digit
// - NumericError: Error types for arithmetic operations
//
// Design principles:
// - Precision is a parameter of each operation, never stored in the value
// - Truncation instead of rounding everywhere
// - Large products delegate to a pluggable Multiplier strategy
// - Fallible operations return Result (no panics)

mod big_float;
mod errors;
mod newton;
mod render;

pub use big_float::{BigFloat, Limbs};
pub use errors::{NumericError, NumericResult};

/// Radix of one limb.
pub const LIMB_BASE: u32 = 1_000_000_000;

/// Decimal digits held by one limb.
pub const LIMB_DIGITS: usize = 9;

/// Extra limbs kept beyond the requested precision by every truncating
/// operation.
pub const GUARD_LIMBS: usize = 2;
