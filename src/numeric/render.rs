// ============================================================================
// Decimal Rendering
// Radix-10^9 limbs to positional decimal text
// ============================================================================

use super::big_float::BigFloat;
use super::LIMB_DIGITS;

fn push_limb(out: &mut String, mut limb: u32, width: usize) {
    let mut buf = [b'0'; LIMB_DIGITS];
    for slot in buf.iter_mut().rev() {
        *slot = b'0' + (limb % 10) as u8;
        limb /= 10;
    }
    out.extend(buf[LIMB_DIGITS - width..].iter().map(|&b| char::from(b)));
}

fn push_zeros(out: &mut String, count: usize) {
    out.extend(std::iter::repeat('0').take(count));
}

impl BigFloat {
    /// Render with exactly `significant` significant digits.
    ///
    /// Digits past the last stored limb are zero-filled; digits past
    /// `significant` are dropped without rounding. Zero renders as `"0"`.
    ///
    /// # Example
    /// ```
    /// use chudnovsky_pi::numeric::BigFloat;
    ///
    /// let value = BigFloat::from_u64(31_415_926_535);
    /// assert_eq!(value.to_decimal_string(4), "31410000000");
    /// assert_eq!(value.to_decimal_string(13), "31415926535.00");
    /// ```
    pub fn to_decimal_string(&self, significant: usize) -> String {
        let Some((&top, rest)) = self.limbs().split_last() else {
            return "0".to_string();
        };
        let significant = significant.max(1);

        let mut digits = String::with_capacity(self.limbs().len() * LIMB_DIGITS);
        let top_width = top.checked_ilog10().map_or(1, |d| d as usize + 1);
        push_limb(&mut digits, top, top_width);
        for &limb in rest.iter().rev() {
            push_limb(&mut digits, limb, LIMB_DIGITS);
        }

        // Value is digits · 10^scale, with int_len digits before the point
        let mut scale = LIMB_DIGITS as i64 * self.exponent();
        let int_len = digits.len() as i64 + scale;
        if digits.len() < significant {
            let missing = significant - digits.len();
            scale -= missing as i64;
            push_zeros(&mut digits, missing);
        } else {
            scale += (digits.len() - significant) as i64;
            digits.truncate(significant);
        }

        let mut out = String::with_capacity(significant + 3 + int_len.unsigned_abs() as usize);
        if self.is_negative() {
            out.push('-');
        }

        if int_len <= 0 {
            out.push_str("0.");
            push_zeros(&mut out, int_len.unsigned_abs() as usize);
            out.push_str(&digits);
        } else if scale >= 0 {
            out.push_str(&digits);
            push_zeros(&mut out, scale as usize);
        } else {
            let (integer, fraction) = digits.split_at(int_len as usize);
            out.push_str(integer);
            out.push('.');
            out.push_str(fraction);
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::Limbs;

    fn value(negative: bool, exponent: i64, limbs: &[u32]) -> BigFloat {
        BigFloat::from_parts(negative, exponent, Limbs::from_slice(limbs))
    }

    #[test]
    fn test_zero() {
        assert_eq!(BigFloat::zero().to_decimal_string(5), "0");
    }

    #[test]
    fn test_truncates_never_rounds() {
        // 3.141592653
        let pi = value(false, -1, &[141_592_653, 3]);
        assert_eq!(pi.to_decimal_string(5), "3.1415");
        assert_eq!(pi.to_decimal_string(9), "3.14159265");
        assert_eq!(pi.to_decimal_string(1), "3");

        let nines = value(false, -1, &[999_999_999]);
        assert_eq!(nines.to_decimal_string(3), "0.999");
    }

    #[test]
    fn test_zero_fills_missing_digits() {
        let pi = value(false, -1, &[141_592_653, 3]);
        assert_eq!(pi.to_decimal_string(12), "3.14159265300");
    }

    #[test]
    fn test_zero_fill_across_the_point() {
        // 7 · 10^9 padded past the integer part
        let big = value(false, 1, &[7]);
        assert_eq!(big.to_decimal_string(12), "7000000000.00");
        // 10^-9 padded in the fraction
        let small = value(false, -1, &[1]);
        assert_eq!(small.to_decimal_string(3), "0.00000000100");
    }

    #[test]
    fn test_leading_fractional_zeros() {
        // 10^-10
        let tiny = value(false, -2, &[100_000_000]);
        assert_eq!(tiny.to_decimal_string(2), "0.00000000010");
    }

    #[test]
    fn test_large_integers() {
        let big = BigFloat::from_u64(1_234_567_890_123);
        assert_eq!(big.to_decimal_string(4), "1234000000000");
        assert_eq!(big.to_decimal_string(13), "1234567890123");
        assert_eq!(value(false, 2, &[7]).to_decimal_string(1), "7000000000000000000");
    }

    #[test]
    fn test_negative() {
        let half = value(true, -1, &[500_000_000]);
        assert_eq!(half.to_decimal_string(3), "-0.500");
        assert_eq!(half.to_string(), "-0.5");
    }

    #[test]
    fn test_interior_zero_limbs_keep_width() {
        // 5.000000000000000001
        let number = value(false, -2, &[1, 0, 5]);
        assert_eq!(number.to_decimal_string(19), "5.000000000000000001");
    }
}
