// ============================================================================
// Modular Transform Multiplication
// Number-theoretic transforms over three prime fields with CRT recombination
// ============================================================================
//
// Limbs are convolved directly (no digit splitting). Every coefficient is
// below min(len_a, len_b) * (10^9 - 1)^2 < 2^24 * 10^18, and the product of
// the three moduli is about 1.59 * 10^26, so Garner reconstruction recovers
// each coefficient exactly for every supported order.
// ============================================================================

use super::basecase::schoolbook;
use super::cache::TwiddleCache;
use super::layout::{bit_reverse_permute, transform_order};
use super::traits::Multiplier;
use crate::numeric::{NumericResult, LIMB_BASE};

/// NTT-friendly primes `c * 2^k + 1`.
pub const NTT_PRIMES: [u64; 3] = [2_013_265_921, 469_762_049, 167_772_161];

/// Largest order supported by all three fields (167772161 = 5 * 2^25 + 1).
pub const NTT_MAX_ORDER: u32 = 25;

// ============================================================================
// Modular Arithmetic
// ============================================================================

fn pow_mod(mut base: u64, mut exp: u64, modulus: u64) -> u64 {
    let mut result = 1u64;
    base %= modulus;
    while exp > 0 {
        if exp & 1 == 1 {
            result = result * base % modulus;
        }
        base = base * base % modulus;
        exp >>= 1;
    }
    result
}

#[inline]
fn inv_mod(value: u64, modulus: u64) -> u64 {
    pow_mod(value, modulus - 2, modulus)
}

/// Smallest quadratic non-residue modulo `modulus`.
///
/// For `modulus = c * 2^k + 1`, raising a non-residue to `(modulus - 1) / 2^j`
/// yields an element of order exactly `2^j` for every `j <= k`.
fn find_non_residue(modulus: u64) -> u64 {
    let half = (modulus - 1) / 2;
    (2..modulus)
        .find(|&g| pow_mod(g, half, modulus) == modulus - 1)
        .unwrap_or(modulus - 1)
}

// ============================================================================
// Prime Field
// ============================================================================

#[derive(Debug)]
struct PrimeField {
    modulus: u64,
    roots: TwiddleCache<u64>,
}

impl PrimeField {
    fn new(modulus: u64, max_order: u32) -> Self {
        let generator = find_non_residue(modulus);
        let roots = TwiddleCache::new(max_order, move |order| {
            let n = 1usize << order;
            let root = pow_mod(generator, (modulus - 1) >> order, modulus);
            let mut table = Vec::with_capacity(n / 2);
            let mut w = 1u64;
            for _ in 0..n / 2 {
                table.push(w);
                w = w * root % modulus;
            }
            table
        });
        Self { modulus, roots }
    }

    fn forward(&self, data: &mut [u64], table: &[u64]) {
        let m = self.modulus;
        bit_reverse_permute(data);

        let n = data.len();
        let mut len = 2;
        while len <= n {
            let half = len / 2;
            let stride = n / len;
            for block in data.chunks_exact_mut(len) {
                let (lo, hi) = block.split_at_mut(half);
                for (j, (x, y)) in lo.iter_mut().zip(hi.iter_mut()).enumerate() {
                    let v = *y * table[j * stride] % m;
                    let u = *x;
                    *x = (u + v) % m;
                    *y = (u + m - v) % m;
                }
            }
            len <<= 1;
        }
    }

    fn inverse(&self, data: &mut [u64], table: &[u64]) {
        self.forward(data, table);
        data[1..].reverse();
        let scale = inv_mod(data.len() as u64 % self.modulus, self.modulus);
        for x in data.iter_mut() {
            *x = *x * scale % self.modulus;
        }
    }

    /// Cyclic convolution of `a` and `b` modulo this prime at length `2^order`.
    fn convolve(&self, a: &[u32], b: &[u32], order: u32) -> NumericResult<Vec<u64>> {
        let table = self.roots.table(order)?;
        let n = 1usize << order;
        let m = self.modulus;

        let mut fa = vec![0u64; n];
        for (slot, &limb) in fa.iter_mut().zip(a) {
            *slot = u64::from(limb) % m;
        }
        let mut fb = vec![0u64; n];
        for (slot, &limb) in fb.iter_mut().zip(b) {
            *slot = u64::from(limb) % m;
        }

        self.forward(&mut fa, &table);
        self.forward(&mut fb, &table);
        for (x, y) in fa.iter_mut().zip(fb.iter()) {
            *x = *x * y % m;
        }
        self.inverse(&mut fa, &table);

        Ok(fa)
    }
}

// ============================================================================
// Multiplier
// ============================================================================

/// Exact NTT multiplication strategy.
#[derive(Debug)]
pub struct ModularTransformMultiplier {
    fields: [PrimeField; 3],
    /// m1^-1 mod m2
    inv_m1_mod_m2: u64,
    /// (m1 m2)^-1 mod m3
    inv_m12_mod_m3: u64,
    max_order: u32,
    basecase_threshold: usize,
}

impl ModularTransformMultiplier {
    /// Create a multiplier whose transforms are limited to `2^max_order` limbs.
    ///
    /// `max_order` is clamped to [`NTT_MAX_ORDER`].
    pub fn new(max_order: u32, basecase_threshold: usize) -> Self {
        let max_order = max_order.min(NTT_MAX_ORDER);
        let [m1, m2, m3] = NTT_PRIMES;
        Self {
            fields: NTT_PRIMES.map(|modulus| PrimeField::new(modulus, max_order)),
            inv_m1_mod_m2: inv_mod(m1 % m2, m2),
            inv_m12_mod_m3: inv_mod(m1 % m3 * (m2 % m3) % m3, m3),
            max_order,
            basecase_threshold,
        }
    }

    /// Largest transform order this multiplier will use.
    #[inline]
    pub fn max_order(&self) -> u32 {
        self.max_order
    }

    /// Garner reconstruction of one coefficient from its three residues.
    #[inline]
    fn reconstruct(&self, r1: u64, r2: u64, r3: u64) -> u128 {
        let [m1, m2, m3] = NTT_PRIMES;
        let t1 = (r2 + m2 - r1 % m2) % m2 * self.inv_m1_mod_m2 % m2;
        // y < m1 * m2 < 2^63
        let y = r1 + m1 * t1;
        let t2 = (r3 + m3 - y % m3) % m3 * self.inv_m12_mod_m3 % m3;
        u128::from(y) + u128::from(m1 * m2) * u128::from(t2)
    }

    fn convolve(&self, a: &[u32], b: &[u32]) -> NumericResult<Vec<u32>> {
        let product_len = a.len() + b.len();
        let order = transform_order(product_len);

        let residues = self
            .fields
            .iter()
            .map(|field| field.convolve(a, b, order))
            .collect::<NumericResult<Vec<_>>>()?;

        let base = u128::from(LIMB_BASE);
        let mut carry = 0u128;
        let mut out = Vec::with_capacity(product_len);
        for k in 0..product_len {
            carry += self.reconstruct(residues[0][k], residues[1][k], residues[2][k]);
            out.push((carry % base) as u32);
            carry /= base;
        }
        debug_assert_eq!(carry, 0, "product overflowed its limb count");

        Ok(out)
    }
}

impl Multiplier for ModularTransformMultiplier {
    fn multiply(&self, a: &[u32], b: &[u32]) -> NumericResult<Vec<u32>> {
        if a.len().min(b.len()) <= self.basecase_threshold {
            return Ok(schoolbook(a, b));
        }
        self.convolve(a, b)
    }

    fn prepare(&self, product_len: usize) -> NumericResult<()> {
        let order = transform_order(product_len);
        self.fields
            .iter()
            .try_for_each(|field| field.roots.ensure(order))
    }

    fn max_product_len(&self) -> usize {
        1usize << self.max_order
    }

    fn name(&self) -> &'static str {
        "ModularTransform"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::NumericError;
    use proptest::prelude::*;

    fn is_prime(n: u64) -> bool {
        n >= 2 && (2..).take_while(|d| d * d <= n).all(|d| n % d != 0)
    }

    #[test]
    fn test_moduli_are_prime_with_enough_two_adicity() {
        for &p in &NTT_PRIMES {
            assert!(is_prime(p), "{} is not prime", p);
            assert!((p - 1).trailing_zeros() >= NTT_MAX_ORDER);
        }
    }

    #[test]
    fn test_roots_have_exact_order() {
        for &p in &NTT_PRIMES {
            let field = PrimeField::new(p, 10);
            let table = field.roots.table(10).unwrap();
            let root = table[1];
            // root^(2^9) = -1, so root^(2^10) = 1 and no smaller power of two works
            assert_eq!(pow_mod(root, 1 << 9, p), p - 1);
            assert_eq!(pow_mod(root, 1 << 10, p), 1);
        }
    }

    #[test]
    fn test_forward_inverse_round_trip() {
        let field = PrimeField::new(NTT_PRIMES[1], 8);
        let table = field.roots.table(8).unwrap();
        let original: Vec<u64> = (0..256).map(|i| (i * 7919) % NTT_PRIMES[1]).collect();
        let mut data = original.clone();
        field.forward(&mut data, &table);
        assert_ne!(data, original);
        field.inverse(&mut data, &table);
        assert_eq!(data, original);
    }

    #[test]
    fn test_reconstruct_large_coefficient() {
        let multiplier = ModularTransformMultiplier::new(NTT_MAX_ORDER, 0);
        let value: u128 = 12_345_678_901_234_567_890_123_456;
        let [m1, m2, m3] = NTT_PRIMES;
        let r = |m: u64| (value % u128::from(m)) as u64;
        assert_eq!(multiplier.reconstruct(r(m1), r(m2), r(m3)), value);
    }

    #[test]
    fn test_all_max_limbs() {
        let multiplier = ModularTransformMultiplier::new(NTT_MAX_ORDER, 0);
        let a = vec![LIMB_BASE - 1; 700];
        let b = vec![LIMB_BASE - 1; 333];
        assert_eq!(multiplier.multiply(&a, &b).unwrap(), schoolbook(&a, &b));
    }

    #[test]
    fn test_capacity_exceeded() {
        let multiplier = ModularTransformMultiplier::new(4, 0);
        assert_eq!(multiplier.max_product_len(), 16);
        assert!(multiplier.prepare(16).is_ok());
        assert_eq!(
            multiplier.prepare(17),
            Err(NumericError::CapacityExceeded {
                requested_order: 5,
                max_order: 4
            })
        );
    }

    proptest! {
        #[test]
        fn prop_matches_schoolbook(
            a in prop::collection::vec(0u32..LIMB_BASE, 1..200),
            b in prop::collection::vec(0u32..LIMB_BASE, 1..200),
        ) {
            let multiplier = ModularTransformMultiplier::new(NTT_MAX_ORDER, 0);
            prop_assert_eq!(multiplier.multiply(&a, &b).unwrap(), schoolbook(&a, &b));
        }
    }
}
