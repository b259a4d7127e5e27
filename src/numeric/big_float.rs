// ============================================================================
// Arbitrary-Precision Fixed-Point Value
// Signed radix-10^9 limbs with a limb exponent
// ============================================================================

use super::errors::NumericResult;
use super::{GUARD_LIMBS, LIMB_BASE, LIMB_DIGITS};
use crate::transform::Multiplier;
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Neg, Sub};

/// Limb storage. Leaf terms of the series fit in four limbs and never
/// allocate.
pub type Limbs = SmallVec<[u32; 4]>;

/// Arbitrary-precision signed value.
///
/// Represents `±Σ limbs[i] · 10^(9·(exponent + i))` with little-endian limbs.
///
/// # Invariants
/// - Every limb is below `LIMB_BASE`
/// - Neither the lowest nor the highest limb is zero
/// - Zero has no limbs, exponent 0 and a positive sign (no negative zero)
///
/// Operations that take a `precision` keep the `precision + GUARD_LIMBS` most
/// significant limbs and drop the rest (truncation, never rounding).
///
/// # Example
/// ```
/// use chudnovsky_pi::numeric::BigFloat;
///
/// let a = BigFloat::from_u64(1_000_000_007);
/// let b = BigFloat::from_u32(5);
/// assert_eq!((&a - &b).to_string(), "1000000002");
/// ```
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct BigFloat {
    negative: bool,
    exponent: i64,
    limbs: Limbs,
}

impl BigFloat {
    /// Zero value
    pub fn zero() -> Self {
        Self::default()
    }

    /// One
    pub fn one() -> Self {
        Self::from_u32(1)
    }

    /// Create from a small unsigned integer.
    pub fn from_u32(value: u32) -> Self {
        Self::from_u64(u64::from(value))
    }

    /// Create from an unsigned 64-bit integer.
    pub fn from_u64(mut value: u64) -> Self {
        let base = u64::from(LIMB_BASE);
        let mut limbs = Limbs::new();
        while value > 0 {
            limbs.push((value % base) as u32);
            value /= base;
        }
        Self::from_parts(false, 0, limbs)
    }

    /// Build a value from raw parts and bring it to canonical form.
    pub(crate) fn from_parts(negative: bool, exponent: i64, limbs: Limbs) -> Self {
        let mut value = Self {
            negative,
            exponent,
            limbs,
        };
        value.normalize();
        value
    }

    fn normalize(&mut self) {
        while self.limbs.last() == Some(&0) {
            self.limbs.pop();
        }

        let low_zeros = self.limbs.iter().take_while(|&&limb| limb == 0).count();
        if low_zeros > 0 {
            self.limbs.drain(..low_zeros);
            self.exponent += low_zeros as i64;
        }

        if self.limbs.is_empty() {
            self.exponent = 0;
            self.negative = false;
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.limbs.is_empty()
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Limb position of the least significant limb.
    #[inline]
    pub fn exponent(&self) -> i64 {
        self.exponent
    }

    /// Number of stored limbs.
    #[inline]
    pub fn precision(&self) -> usize {
        self.limbs.len()
    }

    /// Stored limbs, least significant first.
    #[inline]
    pub fn limbs(&self) -> &[u32] {
        &self.limbs
    }

    /// Limb position just above the most significant limb: the magnitude is
    /// below `10^(9·magnitude())`.
    #[inline]
    pub fn magnitude(&self) -> i64 {
        self.exponent + self.limbs.len() as i64
    }

    /// Number of decimal digits spanned by the stored limbs.
    pub fn digit_count(&self) -> usize {
        match self.limbs.last() {
            None => 0,
            Some(&top) => {
                let top_digits = top.checked_ilog10().map_or(1, |d| d as usize + 1);
                top_digits + LIMB_DIGITS * (self.limbs.len() - 1)
            },
        }
    }

    #[inline]
    fn limb_at(&self, position: i64) -> u32 {
        let index = position - self.exponent;
        if index < 0 {
            return 0;
        }
        self.limbs.get(index as usize).copied().unwrap_or(0)
    }

    // ========================================================================
    // Precision Control
    // ========================================================================

    /// Drop low-order limbs so that at most `precision + GUARD_LIMBS` remain.
    pub fn truncate(&mut self, precision: usize) {
        let keep = precision + GUARD_LIMBS;
        if self.limbs.len() > keep {
            let cut = self.limbs.len() - keep;
            self.limbs.drain(..cut);
            self.exponent += cut as i64;
            self.normalize();
        }
    }

    /// Owned copy truncated to `precision`.
    pub fn truncated(&self, precision: usize) -> Self {
        let mut value = self.clone();
        value.truncate(precision);
        value
    }

    /// The limbs taking part in an operation at `precision`, with the limb
    /// exponent of the first one.
    fn window(&self, precision: Option<usize>) -> (&[u32], i64) {
        match precision {
            Some(p) if self.limbs.len() > p + GUARD_LIMBS => {
                let cut = self.limbs.len() - (p + GUARD_LIMBS);
                (&self.limbs[cut..], self.exponent + cut as i64)
            },
            _ => (&self.limbs, self.exponent),
        }
    }

    /// Multiply by `LIMB_BASE^shift` (exact).
    pub(crate) fn shift_limbs(mut self, shift: i64) -> Self {
        if !self.is_zero() {
            self.exponent += shift;
        }
        self
    }

    // ========================================================================
    // Sign
    // ========================================================================

    /// Flip the sign in place. Zero stays positive.
    pub fn negate(&mut self) {
        if !self.is_zero() {
            self.negative = !self.negative;
        }
    }

    /// Absolute value
    pub fn abs(&self) -> Self {
        Self {
            negative: false,
            ..self.clone()
        }
    }

    // ========================================================================
    // Arithmetic
    // ========================================================================

    /// Exact product with a small factor.
    pub fn mul_small(&self, factor: u32) -> Self {
        self.mul_u64(u64::from(factor))
    }

    /// Exact product with a 64-bit factor.
    pub fn mul_u64(&self, factor: u64) -> Self {
        if factor == 0 || self.is_zero() {
            return Self::zero();
        }

        let base = u128::from(LIMB_BASE);
        let mut limbs = Limbs::with_capacity(self.limbs.len() + 3);
        let mut carry = 0u128;
        for &limb in &self.limbs {
            carry += u128::from(limb) * u128::from(factor);
            limbs.push((carry % base) as u32);
            carry /= base;
        }
        while carry > 0 {
            limbs.push((carry % base) as u32);
            carry /= base;
        }

        Self::from_parts(self.negative, self.exponent, limbs)
    }

    /// Sum bounded to `precision`: both operands are clipped to the top
    /// `precision + GUARD_LIMBS` limbs of the larger one before adding.
    pub fn add_with_precision(&self, rhs: &Self, precision: usize) -> Self {
        self.signed_sum(rhs, rhs.negative, Some(precision))
    }

    /// Difference bounded to `precision`, clipped like
    /// [`add_with_precision`](Self::add_with_precision).
    pub fn sub_with_precision(&self, rhs: &Self, precision: usize) -> Self {
        self.signed_sum(rhs, !rhs.negative, Some(precision))
    }

    /// `self + (±|rhs|)` where the sign of the second term is `rhs_negative`.
    fn signed_sum(&self, rhs: &Self, rhs_negative: bool, precision: Option<usize>) -> Self {
        if rhs.is_zero() {
            return self.bounded(precision);
        }
        if self.is_zero() {
            let mut value = rhs.bounded(precision);
            value.negative = rhs_negative;
            return value;
        }

        let mut sum = if self.negative == rhs_negative {
            Self::magnitude_add(self, rhs, self.negative, precision)
        } else {
            match self.cmp_magnitude(rhs) {
                Ordering::Equal => return Self::zero(),
                Ordering::Greater => Self::magnitude_sub(self, rhs, self.negative, precision),
                Ordering::Less => Self::magnitude_sub(rhs, self, rhs_negative, precision),
            }
        };

        if let Some(p) = precision {
            sum.truncate(p);
        }
        sum
    }

    fn bounded(&self, precision: Option<usize>) -> Self {
        match precision {
            Some(p) => self.truncated(p),
            None => self.clone(),
        }
    }

    /// Limb positions `[low, high)` covered by a sum of `x` and `y`.
    fn sum_bounds(x: &Self, y: &Self, precision: Option<usize>) -> (i64, i64) {
        let high = x.magnitude().max(y.magnitude());
        let mut low = x.exponent.min(y.exponent);
        if let Some(p) = precision {
            low = low.max(high - (p + GUARD_LIMBS) as i64);
        }
        (low, high)
    }

    fn magnitude_add(x: &Self, y: &Self, negative: bool, precision: Option<usize>) -> Self {
        let (low, high) = Self::sum_bounds(x, y, precision);
        let mut limbs = Limbs::with_capacity((high - low) as usize + 1);
        let mut carry = 0u32;
        for position in low..high {
            // 2 (B - 1) + 1 < 2^32
            let t = x.limb_at(position) + y.limb_at(position) + carry;
            carry = u32::from(t >= LIMB_BASE);
            limbs.push(t - carry * LIMB_BASE);
        }
        if carry > 0 {
            limbs.push(carry);
        }
        Self::from_parts(negative, low, limbs)
    }

    /// `|x| - |y|`, requires `|x| >= |y|`.
    fn magnitude_sub(x: &Self, y: &Self, negative: bool, precision: Option<usize>) -> Self {
        let (low, high) = Self::sum_bounds(x, y, precision);
        let mut limbs = Limbs::with_capacity((high - low) as usize);
        let mut borrow = 0u32;
        for position in low..high {
            let subtrahend = y.limb_at(position) + borrow;
            let minuend = x.limb_at(position);
            if minuend >= subtrahend {
                limbs.push(minuend - subtrahend);
                borrow = 0;
            } else {
                limbs.push(minuend + LIMB_BASE - subtrahend);
                borrow = 1;
            }
        }
        debug_assert_eq!(borrow, 0, "magnitude_sub requires |x| >= |y|");
        Self::from_parts(negative, low, limbs)
    }

    /// Product of `self` and `rhs`.
    ///
    /// With `precision = None` the product is exact. Otherwise both operands
    /// are truncated to `precision + GUARD_LIMBS` limbs, multiplied exactly
    /// through `multiplier`, and the product is truncated again.
    ///
    /// # Errors
    /// Propagates `CapacityExceeded`/`PrecisionLoss` from the multiplier.
    pub fn mul(
        &self,
        rhs: &Self,
        precision: Option<usize>,
        multiplier: &dyn Multiplier,
    ) -> NumericResult<Self> {
        if self.is_zero() || rhs.is_zero() {
            return Ok(Self::zero());
        }

        let (a, a_exponent) = self.window(precision);
        let (b, b_exponent) = rhs.window(precision);
        let product = multiplier.multiply(a, b)?;

        let mut value = Self::from_parts(
            self.negative != rhs.negative,
            a_exponent + b_exponent,
            Limbs::from_vec(product),
        );
        if let Some(p) = precision {
            value.truncate(p);
        }
        Ok(value)
    }

    // ========================================================================
    // Comparison
    // ========================================================================

    /// Compare absolute values.
    pub fn cmp_magnitude(&self, other: &Self) -> Ordering {
        match (self.is_zero(), other.is_zero()) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            (false, false) => {},
        }

        let high = self.magnitude();
        match high.cmp(&other.magnitude()) {
            Ordering::Equal => {},
            unequal => return unequal,
        }

        let low = self.exponent.min(other.exponent);
        (low..high)
            .rev()
            .map(|position| self.limb_at(position).cmp(&other.limb_at(position)))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }

    // ========================================================================
    // Floating-Point Approximation
    // ========================================================================

    /// Approximate the value as `mantissa · 10^(9·exponent)` from the top
    /// three limbs. The mantissa carries no sign.
    pub(crate) fn to_f64_parts(&self) -> (f64, i64) {
        let start = self.limbs.len().saturating_sub(3);
        let mantissa = self.limbs[start..]
            .iter()
            .rev()
            .fold(0.0f64, |acc, &limb| acc * f64::from(LIMB_BASE) + f64::from(limb));
        (mantissa, self.exponent + start as i64)
    }
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl From<u32> for BigFloat {
    fn from(value: u32) -> Self {
        Self::from_u32(value)
    }
}

impl From<u64> for BigFloat {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

impl PartialOrd for BigFloat {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BigFloat {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.negative, other.negative) {
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
            (false, false) => self.cmp_magnitude(other),
            (true, true) => other.cmp_magnitude(self),
        }
    }
}

impl Neg for BigFloat {
    type Output = Self;

    fn neg(mut self) -> Self::Output {
        self.negate();
        self
    }
}

impl Neg for &BigFloat {
    type Output = BigFloat;

    fn neg(self) -> Self::Output {
        -self.clone()
    }
}

// Exact sums; use add_with_precision/sub_with_precision for bounded ones
impl Add for &BigFloat {
    type Output = BigFloat;

    fn add(self, rhs: Self) -> Self::Output {
        self.signed_sum(rhs, rhs.negative, None)
    }
}

impl Add for BigFloat {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        &self + &rhs
    }
}

impl Sub for &BigFloat {
    type Output = BigFloat;

    fn sub(self, rhs: Self) -> Self::Output {
        self.signed_sum(rhs, !rhs.negative, None)
    }
}

impl Sub for BigFloat {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        &self - &rhs
    }
}

// ============================================================================
// Display and Debug
// ============================================================================

impl fmt::Display for BigFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self.to_decimal_string(self.digit_count());
        if rendered.contains('.') {
            let trimmed = rendered.trim_end_matches('0').trim_end_matches('.');
            write!(f, "{}", trimmed)
        } else {
            write!(f, "{}", rendered)
        }
    }
}

impl fmt::Debug for BigFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BigFloat({})", self)
    }
}

// ============================================================================
// Tests
// ============================================================================
