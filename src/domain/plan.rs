// ============================================================================
// Computation Plan
// Working precision and series term count for a digit target
// ============================================================================

use crate::engine::ComputeError;
use crate::numeric::{GUARD_LIMBS, LIMB_DIGITS};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Series terms needed per limb of precision.
///
/// Each term adds log10(640320^3 / 1728) ≈ 14.18 digits and one limb holds
/// nine, so a limb needs 9 / 14.18 ≈ 0.6346 terms.
fn terms_per_limb() -> Decimal {
    Decimal::from_i128_with_scale(6_346_230_241_342_037_371_474_889_163, 28)
}

/// Largest supported term count (leaf indices are `u32`).
pub const MAX_TERMS: u64 = u32::MAX as u64;

/// Sizes derived from the requested digit count, fixed before any work starts.
///
/// Only [`derive`](Self::derive) and [`with_precision`](Self::with_precision)
/// build plans, so every plan has at least one limb and one term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ComputationPlan {
    digits: u64,
    precision: usize,
    terms: u32,
}

impl ComputationPlan {
    /// Plan for `digits` decimal places at `ceil(digits / 9)` limbs.
    ///
    /// # Errors
    /// `LimitExceeded` if the term count does not fit a `u32`.
    pub fn derive(digits: u64) -> Result<Self, ComputeError> {
        let limbs = digits.div_ceil(LIMB_DIGITS as u64);
        let precision = usize::try_from(limbs).map_err(|_| ComputeError::LimitExceeded {
            terms: u64::MAX,
            max: MAX_TERMS,
        })?;
        Self::with_precision(digits, precision)
    }

    /// Plan for `digits` decimal places at an explicit working precision.
    ///
    /// # Errors
    /// `InvalidConfig` for a zero precision, `LimitExceeded` if the term
    /// count does not fit a `u32`.
    pub fn with_precision(digits: u64, precision: usize) -> Result<Self, ComputeError> {
        if precision == 0 {
            return Err(ComputeError::InvalidConfig(
                "Working precision must be at least one limb".to_string(),
            ));
        }

        let needed = Decimal::from(precision as u64)
            .checked_mul(terms_per_limb())
            .and_then(|terms| terms.floor().to_u64())
            .and_then(|terms| terms.checked_add(1))
            .unwrap_or(u64::MAX);

        let terms = u32::try_from(needed).map_err(|_| ComputeError::LimitExceeded {
            terms: needed,
            max: MAX_TERMS,
        })?;

        Ok(Self {
            digits,
            precision,
            terms,
        })
    }

    /// Decimal digits after the point.
    #[inline]
    pub fn digits(&self) -> u64 {
        self.digits
    }

    /// Working precision in limbs.
    #[inline]
    pub fn precision(&self) -> usize {
        self.precision
    }

    /// Series terms summed over `[0, terms)`.
    #[inline]
    pub fn terms(&self) -> u32 {
        self.terms
    }

    /// Internal combine steps of the binary-splitting tree.
    #[inline]
    pub fn combine_steps(&self) -> u64 {
        u64::from(self.terms).saturating_sub(1)
    }

    /// Longest product (in limbs) of two operands at working precision.
    #[inline]
    pub fn product_limbs(&self) -> usize {
        2 * (self.precision + GUARD_LIMBS)
    }
}
