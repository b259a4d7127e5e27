// ============================================================================
// Adaptive Multiplication
// Floating transform while round-off is safe, modular transform beyond
// ============================================================================

use super::fft::FloatTransformMultiplier;
use super::ntt::ModularTransformMultiplier;
use super::traits::Multiplier;
use crate::numeric::NumericResult;

/// Routes each product to the floating transform when its order fits the
/// float tables and to the exact modular transform otherwise.
#[derive(Debug)]
pub struct AdaptiveMultiplier {
    float: FloatTransformMultiplier,
    modular: ModularTransformMultiplier,
}

impl AdaptiveMultiplier {
    pub fn new(float: FloatTransformMultiplier, modular: ModularTransformMultiplier) -> Self {
        Self { float, modular }
    }

    /// Whether a product of `product_len` limbs goes through the float path.
    #[inline]
    pub fn uses_float(&self, product_len: usize) -> bool {
        product_len <= self.float.max_product_len()
    }
}

impl Multiplier for AdaptiveMultiplier {
    fn multiply(&self, a: &[u32], b: &[u32]) -> NumericResult<Vec<u32>> {
        if self.uses_float(a.len() + b.len()) {
            self.float.multiply(a, b)
        } else {
            self.modular.multiply(a, b)
        }
    }

    fn prepare(&self, product_len: usize) -> NumericResult<()> {
        self.float
            .prepare(product_len.min(self.float.max_product_len()))?;
        if !self.uses_float(product_len) {
            self.modular.prepare(product_len)?;
        }
        Ok(())
    }

    fn max_product_len(&self) -> usize {
        self.float
            .max_product_len()
            .max(self.modular.max_product_len())
    }

    fn name(&self) -> &'static str {
        "Adaptive"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::{NumericError, LIMB_BASE};
    use crate::transform::basecase::schoolbook;

    fn adaptive(float_order: u32, modular_order: u32) -> AdaptiveMultiplier {
        AdaptiveMultiplier::new(
            FloatTransformMultiplier::new(float_order, 0),
            ModularTransformMultiplier::new(modular_order, 0),
        )
    }

    #[test]
    fn test_routing() {
        let multiplier = adaptive(8, 12);
        // 256 points hold 85 limbs
        assert!(multiplier.uses_float(85));
        assert!(!multiplier.uses_float(86));
        assert_eq!(multiplier.max_product_len(), 4096);
    }

    #[test]
    fn test_both_paths_are_exact() {
        let multiplier = adaptive(8, 12);
        let small_a = vec![LIMB_BASE - 1; 40];
        let small_b = vec![123_456_789; 40];
        assert_eq!(
            multiplier.multiply(&small_a, &small_b).unwrap(),
            schoolbook(&small_a, &small_b)
        );

        let large_a: Vec<u32> = (0..900).map(|i| (i * 1_234_567) % LIMB_BASE).collect();
        let large_b: Vec<u32> = (0..700).map(|i| (i * 765_432 + 3) % LIMB_BASE).collect();
        assert_eq!(
            multiplier.multiply(&large_a, &large_b).unwrap(),
            schoolbook(&large_a, &large_b)
        );
    }

    #[test]
    fn test_prepare_reports_capacity() {
        let multiplier = adaptive(8, 10);
        assert!(multiplier.prepare(1024).is_ok());
        assert_eq!(
            multiplier.prepare(1025),
            Err(NumericError::CapacityExceeded {
                requested_order: 11,
                max_order: 10
            })
        );
    }
}
