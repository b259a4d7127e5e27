// ============================================================================
// Basecase (Schoolbook) Multiplication
// Exact quadratic-time fallback used for small operands and as a reference
// ============================================================================

use super::traits::Multiplier;
use crate::numeric::{NumericResult, LIMB_BASE};

/// Schoolbook multiplication.
///
/// Works for every operand size without tables. The transform strategies
/// delegate to it below their basecase threshold, and tests use it as the
/// exact reference for the transform paths.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasecaseMultiplier;

impl BasecaseMultiplier {
    /// Create a new basecase multiplier.
    pub fn new() -> Self {
        Self
    }
}

impl Multiplier for BasecaseMultiplier {
    fn multiply(&self, a: &[u32], b: &[u32]) -> NumericResult<Vec<u32>> {
        Ok(schoolbook(a, b))
    }

    fn prepare(&self, _product_len: usize) -> NumericResult<()> {
        Ok(())
    }

    fn max_product_len(&self) -> usize {
        usize::MAX
    }

    fn name(&self) -> &'static str {
        "Basecase"
    }
}

/// Exact product of two limb sequences, `a.len() + b.len()` limbs long.
pub(crate) fn schoolbook(a: &[u32], b: &[u32]) -> Vec<u32> {
    let base = u64::from(LIMB_BASE);
    let mut out = vec![0u32; a.len() + b.len()];

    for (i, &x) in a.iter().enumerate() {
        if x == 0 {
            continue;
        }
        let mut carry = 0u64;
        for (j, &y) in b.iter().enumerate() {
            // (B-1) + (B-1)^2 + (B-1) < 2^64
            let t = u64::from(out[i + j]) + u64::from(x) * u64::from(y) + carry;
            out[i + j] = (t % base) as u32;
            carry = t / base;
        }
        out[i + b.len()] = carry as u32;
    }

    out
}
