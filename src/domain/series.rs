// ============================================================================
// Chudnovsky Series Terms
// Leaf terms and the (P, Q, R) combination of binary splitting
// ============================================================================
//
//   1/pi = 12 Σ (-1)^k (6k)! (A + B k) / ((3k)! (k!)^3 C^(3k + 3/2))
//
// with A = 13591409, B = 545140134, C = 640320. Binary splitting over [a, b)
// yields P, Q with
//
//   pi = 426880 · sqrt(10005) · Q / (A · Q + P)
// ============================================================================

use crate::numeric::{BigFloat, NumericResult};
use crate::transform::Multiplier;

/// Constant term `A` of the series numerator.
pub const SERIES_A: u64 = 13_591_409;

/// Linear coefficient `B` of the series numerator.
pub const SERIES_B: u64 = 545_140_134;

/// `C^3 / 24` with `C = 640320`.
pub const C3_OVER_24: u64 = 10_939_058_860_032_000;

/// `426880 · 10005`, the factor applied to `Q` in the final quotient.
pub const QUOTIENT_FACTOR: u64 = 4_270_934_400;

/// Radicand of the final square root.
pub const SQRT_RADICAND: u32 = 10_005;

/// Binary-splitting accumulators for one index range `[a, b)`.
///
/// Each recursion node owns its triple until it moves it to its parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Triple {
    pub p: BigFloat,
    pub q: BigFloat,
    pub r: BigFloat,
}

impl Triple {
    /// Exact triple for the single-term range `[b - 1, b)`.
    ///
    /// ```text
    /// P = (A + B·b)(2b − 1)(6b − 5)(6b − 1)·(−1)^b
    /// Q = b^3 · C^3 / 24
    /// R = (2b − 1)(6b − 5)(6b − 1)
    /// ```
    pub fn leaf(b: u32) -> Self {
        let b = u64::from(b);
        debug_assert!(b >= 1, "leaf index starts at 1");

        let r = BigFloat::from_u64(2 * b - 1)
            .mul_u64(6 * b - 5)
            .mul_u64(6 * b - 1);
        let q = BigFloat::from_u64(b)
            .mul_u64(b)
            .mul_u64(b)
            .mul_u64(C3_OVER_24);
        let mut p = r.mul_u64(SERIES_A + SERIES_B * b);
        if b % 2 == 1 {
            p.negate();
        }

        Self { p, q, r }
    }

    /// Merge the triples of two adjacent ranges `[a, m)` and `[m, b)`.
    ///
    /// ```text
    /// P = P0·Q1 + P1·R0
    /// Q = Q0·Q1
    /// R = R0·R1
    /// ```
    ///
    /// Every product and the sum are truncated to `precision`; `None` keeps
    /// the result exact. The operation is associative when exact.
    pub fn combine(
        left: Self,
        right: Self,
        precision: Option<usize>,
        multiplier: &dyn Multiplier,
    ) -> NumericResult<Self> {
        let p0q1 = left.p.mul(&right.q, precision, multiplier)?;
        let p1r0 = right.p.mul(&left.r, precision, multiplier)?;
        let p = match precision {
            Some(bound) => p0q1.add_with_precision(&p1r0, bound),
            None => &p0q1 + &p1r0,
        };
        let q = left.q.mul(&right.q, precision, multiplier)?;
        let r = left.r.mul(&right.r, precision, multiplier)?;

        Ok(Self { p, q, r })
    }
}
