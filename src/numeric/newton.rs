// ============================================================================
// Newton Solvers
// Reciprocal, division and inverse square root by doubling-precision iteration
// ============================================================================
//
// Each solver starts from a two-limb seed computed in f64 and runs one Newton
// step per entry of the precision schedule. Every step works at its own
// precision, so the total cost is a small multiple of one full-precision
// multiplication.
// ============================================================================

use super::big_float::{BigFloat, Limbs};
use super::errors::{NumericError, NumericResult};
use super::LIMB_BASE;
use crate::transform::Multiplier;

/// Half of one limb, `0.5 · LIMB_BASE`.
const HALF_LIMB: u32 = LIMB_BASE / 2;

/// Working precisions of the Newton steps for a target `precision`, smallest
/// first. Each entry is about half of the next one; the last is `precision`.
pub(crate) fn newton_schedule(precision: usize) -> Vec<usize> {
    let mut schedule = Vec::new();
    let mut p = precision;
    while p > 0 {
        schedule.push(p);
        p = match p {
            1 => 0,
            2 => 1,
            _ => p / 2 + 1,
        };
    }
    schedule.reverse();
    schedule
}

/// Two-limb seed `value · 10^(9·exponent)`.
fn seed(mut value: f64, mut exponent: i64, negative: bool) -> BigFloat {
    debug_assert!(value.is_finite() && value > 0.0);
    let base = f64::from(LIMB_BASE);
    while value < base {
        value *= base;
        exponent -= 1;
    }
    while value >= base * base {
        value /= base;
        exponent += 1;
    }

    let whole = value as u64;
    let limbs = Limbs::from_slice(&[
        (whole % u64::from(LIMB_BASE)) as u32,
        (whole / u64::from(LIMB_BASE)) as u32,
    ]);
    BigFloat::from_parts(negative, exponent, limbs)
}

impl BigFloat {
    /// `1 / self` accurate to `precision` limbs.
    ///
    /// # Errors
    /// - `DivisionByZero` if `self` is zero
    /// - Multiplier failures (`CapacityExceeded`, `PrecisionLoss`)
    pub fn reciprocal(
        &self,
        precision: usize,
        multiplier: &dyn Multiplier,
    ) -> NumericResult<Self> {
        if self.is_zero() {
            return Err(NumericError::DivisionByZero);
        }

        let one = Self::one();
        let (mantissa, exponent) = self.to_f64_parts();
        let mut r = seed(1.0 / mantissa, -exponent, self.is_negative());

        // r <- r - (x r - 1) r
        for p in newton_schedule(precision) {
            let correction = self
                .mul(&r, Some(p), multiplier)?
                .sub_with_precision(&one, p)
                .mul(&r, Some(p), multiplier)?;
            r = r.sub_with_precision(&correction, p);
        }

        Ok(r)
    }

    /// `self / denominator` accurate to `precision` limbs.
    ///
    /// # Errors
    /// - `DivisionByZero` if `denominator` is zero
    /// - Multiplier failures (`CapacityExceeded`, `PrecisionLoss`)
    pub fn divide(
        &self,
        denominator: &Self,
        precision: usize,
        multiplier: &dyn Multiplier,
    ) -> NumericResult<Self> {
        let inverse = denominator.reciprocal(precision, multiplier)?;
        self.mul(&inverse, Some(precision), multiplier)
    }

    /// `1 / sqrt(self)` accurate to `precision` limbs.
    ///
    /// # Errors
    /// - `NonPositiveOperand` if `self` is zero or negative
    /// - Multiplier failures (`CapacityExceeded`, `PrecisionLoss`)
    pub fn inv_sqrt(&self, precision: usize, multiplier: &dyn Multiplier) -> NumericResult<Self> {
        if self.is_zero() || self.is_negative() {
            return Err(NumericError::NonPositiveOperand);
        }

        let one = Self::one();
        let (mut mantissa, mut exponent) = self.to_f64_parts();
        // Even limb exponent so that the square root halves it exactly
        if exponent.rem_euclid(2) == 1 {
            mantissa *= f64::from(LIMB_BASE);
            exponent -= 1;
        }
        let mut r = seed(1.0 / mantissa.sqrt(), -exponent / 2, false);

        // r <- r - ((r^2 x - 1) / 2) r
        for p in newton_schedule(precision) {
            let residual = r
                .mul(&r, Some(p), multiplier)?
                .mul(self, Some(p), multiplier)?
                .sub_with_precision(&one, p);
            let half = residual.mul_small(HALF_LIMB).shift_limbs(-1);
            let correction = half.mul(&r, Some(p), multiplier)?;
            r = r.sub_with_precision(&correction, p);
        }

        Ok(r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::{BasecaseMultiplier, ModularTransformMultiplier, NTT_MAX_ORDER};
    use proptest::prelude::*;

    #[test]
    fn test_schedule() {
        assert!(newton_schedule(0).is_empty());
        assert_eq!(newton_schedule(1), vec![1]);
        assert_eq!(newton_schedule(2), vec![1, 2]);
        assert_eq!(newton_schedule(10), vec![1, 2, 3, 4, 6, 10]);
        assert_eq!(
            newton_schedule(1112),
            vec![1, 2, 3, 4, 6, 10, 19, 36, 71, 140, 279, 557, 1112]
        );
    }

    #[test]
    fn test_seed_is_close() {
        let x = BigFloat::from_u32(7);
        let (mantissa, exponent) = x.to_f64_parts();
        let r = seed(1.0 / mantissa, -exponent, false);
        assert_eq!(r.exponent(), -2);
        assert_eq!(r.to_decimal_string(12), "0.142857142857");
    }

    #[test]
    fn test_reciprocal_error_bound() {
        let multiplier = BasecaseMultiplier::new();
        let seven = BigFloat::from_u32(7);
        for p in [1, 2, 3, 5, 8, 20, 111] {
            let r = seven.reciprocal(p, &multiplier).unwrap();
            let error = &r.mul_small(7) - &BigFloat::one();
            assert!(error.is_zero() || error.magnitude() <= -(p as i64), "p = {}", p);
        }
    }

    #[test]
    fn test_reciprocal_of_negative_and_multi_limb() {
        let multiplier = BasecaseMultiplier::new();
        let minus_two = -BigFloat::from_u32(2);
        let r = minus_two.reciprocal(4, &multiplier).unwrap();
        assert_eq!(r.to_decimal_string(10), "-0.5000000000");

        let x = BigFloat::from_parts(false, 0, Limbs::from_slice(&[123_456_789, 987_654_321, 5]));
        let r = x.reciprocal(6, &multiplier).unwrap();
        let error = &x.mul(&r, None, &multiplier).unwrap() - &BigFloat::one();
        assert!(error.is_zero() || error.magnitude() <= -6);
    }

    #[test]
    fn test_divide() {
        let multiplier = BasecaseMultiplier::new();
        let q = BigFloat::from_u32(22)
            .divide(&BigFloat::from_u32(7), 5, &multiplier)
            .unwrap();
        assert_eq!(q.to_decimal_string(40), "3.142857142857142857142857142857142857142");
    }

    #[test]
    fn test_division_by_zero() {
        let multiplier = BasecaseMultiplier::new();
        assert_eq!(
            BigFloat::one().divide(&BigFloat::zero(), 3, &multiplier),
            Err(NumericError::DivisionByZero)
        );
    }

    #[test]
    fn test_inv_sqrt_exact_values() {
        let multiplier = BasecaseMultiplier::new();
        let r = BigFloat::from_u32(4).inv_sqrt(3, &multiplier).unwrap();
        assert_eq!(r.to_decimal_string(20), "0.50000000000000000000");

        // 0.25 has an odd limb exponent
        let quarter = BigFloat::from_parts(false, -1, Limbs::from_slice(&[250_000_000]));
        let r = quarter.inv_sqrt(3, &multiplier).unwrap();
        assert_eq!(r.to_decimal_string(20), "2.0000000000000000000");
    }

    #[test]
    fn test_inv_sqrt_convergence() {
        let multiplier = ModularTransformMultiplier::new(NTT_MAX_ORDER, 8);
        let x = BigFloat::from_u32(10_005);
        for p in [1, 2, 3, 5, 8, 20, 111, 400] {
            let s = x.inv_sqrt(p, &multiplier).unwrap();
            let squared = s.mul(&s, None, &multiplier).unwrap().mul_small(10_005);
            let error = &squared - &BigFloat::one();
            assert!(error.is_zero() || error.magnitude() <= -(p as i64), "p = {}", p);
        }
    }

    #[test]
    fn test_inv_sqrt_rejects_non_positive() {
        let multiplier = BasecaseMultiplier::new();
        assert_eq!(
            BigFloat::zero().inv_sqrt(2, &multiplier),
            Err(NumericError::NonPositiveOperand)
        );
        assert_eq!(
            (-BigFloat::from_u32(3)).inv_sqrt(2, &multiplier),
            Err(NumericError::NonPositiveOperand)
        );
    }

    proptest! {
        #[test]
        fn prop_reciprocal_converges(value in 1u64..u64::MAX, p in 1usize..12) {
            let multiplier = BasecaseMultiplier::new();
            let x = BigFloat::from_u64(value);
            let r = x.reciprocal(p, &multiplier).unwrap();
            let error = &x.mul(&r, None, &multiplier).unwrap() - &BigFloat::one();
            prop_assert!(error.is_zero() || error.magnitude() <= -(p as i64));
        }
    }
}
