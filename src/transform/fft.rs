// ============================================================================
// Floating Transform Multiplication
// Complex FFT convolution over base-1000 digits
// ============================================================================
//
// Each radix-10^9 limb is split into three base-1000 digits so that every
// convolution coefficient stays far below 2^53. Both operands are packed into
// a single complex sequence (a in the real parts, b in the imaginary parts),
// transformed once, separated in the frequency domain, multiplied pointwise
// and transformed back.
//
// Round-off is measured over the whole output spectrum on every product: a
// coefficient further than MAX_ROUNDOFF from an integer fails the
// multiplication instead of silently producing wrong limbs.
// ============================================================================

use super::basecase::schoolbook;
use super::cache::TwiddleCache;
use super::layout::{bit_reverse_permute, transform_order};
use super::traits::Multiplier;
use crate::numeric::{NumericError, NumericResult};
use std::f64::consts::PI;
use std::ops::{Add, Mul, Sub};
use std::sync::Arc;

/// Highest order at which base-1000 coefficients still round reliably.
pub const FLOAT_SAFE_ORDER: u32 = 22;

/// How limbs are cut into transform digits (`base^per_limb = 10^9`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DigitSplit {
    per_limb: usize,
    base: u32,
}

const BASE_1000: DigitSplit = DigitSplit {
    per_limb: 3,
    base: 1000,
};

/// Largest tolerated distance between a coefficient and its nearest integer.
const MAX_ROUNDOFF: f64 = 0.25;

// ============================================================================
// Complex Numbers
// ============================================================================

/// Minimal double-precision complex number for the transform.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    #[inline]
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    #[inline]
    pub fn conj(self) -> Self {
        Self::new(self.re, -self.im)
    }

    #[inline]
    fn scale(self, factor: f64) -> Self {
        Self::new(self.re * factor, self.im * factor)
    }

    /// Multiply by `-i`.
    #[inline]
    fn mul_neg_i(self) -> Self {
        Self::new(self.im, -self.re)
    }
}

impl Add for Complex {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.re + rhs.re, self.im + rhs.im)
    }
}

impl Sub for Complex {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.re - rhs.re, self.im - rhs.im)
    }
}

impl Mul for Complex {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        Self::new(
            self.re * rhs.re - self.im * rhs.im,
            self.re * rhs.im + self.im * rhs.re,
        )
    }
}

// ============================================================================
// Transform
// ============================================================================

/// Twiddles `e^(-2πij/n)` for `j < n/2`, computed directly for accuracy.
fn build_table(order: u32) -> Vec<Complex> {
    let n = 1usize << order;
    (0..n / 2)
        .map(|j| {
            let angle = -2.0 * PI * j as f64 / n as f64;
            Complex::new(angle.cos(), angle.sin())
        })
        .collect()
}

/// In-place forward DFT (iterative radix-2 decimation in time).
fn forward(data: &mut [Complex], table: &[Complex]) {
    bit_reverse_permute(data);

    let n = data.len();
    let mut len = 2;
    while len <= n {
        let half = len / 2;
        let stride = n / len;
        for block in data.chunks_exact_mut(len) {
            let (lo, hi) = block.split_at_mut(half);
            for (j, (x, y)) in lo.iter_mut().zip(hi.iter_mut()).enumerate() {
                let v = *y * table[j * stride];
                let u = *x;
                *x = u + v;
                *y = u - v;
            }
        }
        len <<= 1;
    }
}

fn split_digits(limbs: &[u32], split: DigitSplit) -> impl Iterator<Item = f64> + '_ {
    limbs.iter().flat_map(move |&limb| {
        let mut rest = limb;
        (0..split.per_limb).map(move |_| {
            let digit = rest % split.base;
            rest /= split.base;
            f64::from(digit)
        })
    })
}

fn join_digits(digits: &[u32], split: DigitSplit) -> Vec<u32> {
    digits
        .chunks_exact(split.per_limb)
        .map(|chunk| chunk.iter().rev().fold(0, |limb, &d| limb * split.base + d))
        .collect()
}

// ============================================================================
// Multiplier
// ============================================================================

/// Complex-FFT multiplication strategy.
#[derive(Debug)]
pub struct FloatTransformMultiplier {
    cache: Arc<TwiddleCache<Complex>>,
    basecase_threshold: usize,
}

impl FloatTransformMultiplier {
    /// Create a multiplier whose transforms are limited to `2^max_order` points.
    ///
    /// `max_order` is clamped to [`FLOAT_SAFE_ORDER`].
    pub fn new(max_order: u32, basecase_threshold: usize) -> Self {
        let max_order = max_order.min(FLOAT_SAFE_ORDER);
        Self {
            cache: Arc::new(TwiddleCache::new(max_order, build_table)),
            basecase_threshold,
        }
    }

    /// Largest transform order this multiplier will use.
    #[inline]
    pub fn max_order(&self) -> u32 {
        self.cache.max_order()
    }

    /// Transform order needed for a product of `product_len` limbs.
    #[inline]
    pub fn order_for(product_len: usize) -> u32 {
        transform_order(BASE_1000.per_limb * product_len)
    }

    fn convolve(&self, a: &[u32], b: &[u32], split: DigitSplit) -> NumericResult<Vec<u32>> {
        let product_len = a.len() + b.len();
        let digit_len = split.per_limb * product_len;
        let order = transform_order(digit_len);
        let table = self.cache.table(order)?;
        let n = 1usize << order;

        let mut packed = vec![Complex::default(); n];
        for (slot, digit) in packed.iter_mut().zip(split_digits(a, split)) {
            slot.re = digit;
        }
        for (slot, digit) in packed.iter_mut().zip(split_digits(b, split)) {
            slot.im = digit;
        }
        forward(&mut packed, &table);

        // Separate the two spectra and multiply them: with X = F(a + ib),
        // F(a)_k = (X_k + conj X_-k) / 2 and F(b)_k = (X_k - conj X_-k) / 2i.
        // The product is stored conjugated so that a second forward
        // transform computes the inverse.
        let mask = n - 1;
        let mut spectrum: Vec<Complex> = (0..n)
            .map(|k| {
                let xk = packed[k];
                let xm = packed[(n - k) & mask].conj();
                let fa = (xk + xm).scale(0.5);
                let fb = (xk - xm).mul_neg_i().scale(0.5);
                (fa * fb).conj()
            })
            .collect();
        drop(packed);
        forward(&mut spectrum, &table);

        // Coefficients past digit_len are zero padding and must round to 0
        let inv_n = 1.0 / n as f64;
        let max_error = spectrum.iter().fold(0.0f64, |worst, coefficient| {
            let value = coefficient.re * inv_n;
            worst.max((value - value.round()).abs())
        });
        if max_error > MAX_ROUNDOFF {
            tracing::warn!(order, max_error, "floating transform round-off too large");
            return Err(NumericError::PrecisionLoss);
        }

        let base = u128::from(split.base);
        let mut carry = 0u128;
        let mut digits = Vec::with_capacity(digit_len);
        for coefficient in spectrum.iter().take(digit_len) {
            carry += (coefficient.re * inv_n).round().max(0.0) as u128;
            digits.push((carry % base) as u32);
            carry /= base;
        }
        debug_assert_eq!(carry, 0, "product overflowed its limb count");

        Ok(join_digits(&digits, split))
    }
}

impl Multiplier for FloatTransformMultiplier {
    fn multiply(&self, a: &[u32], b: &[u32]) -> NumericResult<Vec<u32>> {
        if a.len().min(b.len()) <= self.basecase_threshold {
            return Ok(schoolbook(a, b));
        }
        self.convolve(a, b, BASE_1000)
    }

    fn prepare(&self, product_len: usize) -> NumericResult<()> {
        self.cache.ensure(Self::order_for(product_len))
    }

    fn max_product_len(&self) -> usize {
        (1usize << self.max_order()) / BASE_1000.per_limb
    }

    fn name(&self) -> &'static str {
        "FloatTransform"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::LIMB_BASE;
    use proptest::prelude::*;

    fn dft_naive(input: &[Complex]) -> Vec<Complex> {
        let n = input.len();
        (0..n)
            .map(|k| {
                input.iter().enumerate().fold(Complex::default(), |acc, (j, &x)| {
                    let angle = -2.0 * PI * (j * k) as f64 / n as f64;
                    acc + x * Complex::new(angle.cos(), angle.sin())
                })
            })
            .collect()
    }

    #[test]
    fn test_complex_arithmetic() {
        let a = Complex::new(1.0, 2.0);
        let b = Complex::new(3.0, -1.0);
        assert_eq!(a * b, Complex::new(5.0, 5.0));
        assert_eq!(a.conj(), Complex::new(1.0, -2.0));
        assert_eq!(a.mul_neg_i(), Complex::new(2.0, -1.0));
    }

    #[test]
    fn test_forward_matches_naive_dft() {
        let input: Vec<Complex> = (0..16)
            .map(|i| Complex::new(i as f64, (i * i % 7) as f64))
            .collect();
        let mut fast = input.clone();
        forward(&mut fast, &build_table(4));
        let slow = dft_naive(&input);

        for (x, y) in fast.iter().zip(slow.iter()) {
            assert!((x.re - y.re).abs() < 1e-9);
            assert!((x.im - y.im).abs() < 1e-9);
        }
    }

    #[test]
    fn test_small_product_through_transform() {
        let multiplier = FloatTransformMultiplier::new(FLOAT_SAFE_ORDER, 0);
        let product = multiplier.multiply(&[123_456_789], &[987_654_321]).unwrap();
        assert_eq!(product, vec![112_635_269, 121_932_631]);
    }

    #[test]
    fn test_all_max_limbs() {
        let multiplier = FloatTransformMultiplier::new(FLOAT_SAFE_ORDER, 0);
        let a = vec![LIMB_BASE - 1; 300];
        let b = vec![LIMB_BASE - 1; 200];
        assert_eq!(multiplier.multiply(&a, &b).unwrap(), schoolbook(&a, &b));
    }

    #[test]
    fn test_max_order_is_clamped() {
        let multiplier = FloatTransformMultiplier::new(40, 0);
        assert_eq!(multiplier.max_order(), FLOAT_SAFE_ORDER);
    }

    #[test]
    fn test_capacity_exceeded() {
        let multiplier = FloatTransformMultiplier::new(6, 0);
        // 64 points hold 21 limbs
        assert_eq!(multiplier.max_product_len(), 21);
        assert!(multiplier.prepare(21).is_ok());
        assert_eq!(
            multiplier.multiply(&[1; 11], &[1; 11]),
            Err(NumericError::CapacityExceeded {
                requested_order: 7,
                max_order: 6
            })
        );
    }

    #[test]
    fn test_digit_split_round_trip() {
        let limbs = [0, 1, 999, 1_000, 123_456_789, LIMB_BASE - 1];
        let digits: Vec<u32> = split_digits(&limbs, BASE_1000).map(|d| d as u32).collect();
        assert_eq!(&digits[12..15], &[789, 456, 123]);
        assert_eq!(join_digits(&digits, BASE_1000), limbs);

        let whole = DigitSplit {
            per_limb: 1,
            base: LIMB_BASE,
        };
        let digits: Vec<u32> = split_digits(&limbs, whole).map(|d| d as u32).collect();
        assert_eq!(digits, limbs);
    }

    #[test]
    fn test_wide_digits_lose_precision() {
        // Whole limbs as digits: coefficients reach ~4·10^15, just under
        // 2^53, leaving no mantissa bits to absorb the transform round-off
        let multiplier = FloatTransformMultiplier::new(FLOAT_SAFE_ORDER, 0);
        let whole = DigitSplit {
            per_limb: 1,
            base: LIMB_BASE,
        };
        let a: Vec<u32> = (0..256u32).map(|i| 3_999_999 - (i * 7_919) % 400_000).collect();
        let b: Vec<u32> = (0..256u32).map(|i| 3_999_999 - (i * 104_729) % 400_000).collect();

        assert_eq!(multiplier.convolve(&a, &b, whole), Err(NumericError::PrecisionLoss));
        // The same operands split into base-1000 digits are exact
        assert_eq!(multiplier.convolve(&a, &b, BASE_1000).unwrap(), schoolbook(&a, &b));
    }

    proptest! {
        #[test]
        fn prop_matches_schoolbook(
            a in prop::collection::vec(0u32..LIMB_BASE, 1..200),
            b in prop::collection::vec(0u32..LIMB_BASE, 1..200),
        ) {
            let multiplier = FloatTransformMultiplier::new(FLOAT_SAFE_ORDER, 0);
            prop_assert_eq!(multiplier.multiply(&a, &b).unwrap(), schoolbook(&a, &b));
        }
    }
}
