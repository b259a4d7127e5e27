// ============================================================================
// Multiplier Trait
// Abstract interface for exact large-integer multiplication strategies
// ============================================================================

use crate::numeric::NumericResult;

/// Strategy interface for multiplying limb sequences.
///
/// Operands are little-endian slices of radix-10^9 limbs (every limb is below
/// `LIMB_BASE`). Implementations return the exact product with exactly
/// `a.len() + b.len()` limbs; the caller strips the possible zero top limb and
/// applies any precision truncation afterwards.
///
/// # Thread Safety
/// Implementations must be `Send + Sync`: the binary-splitting recursion shares
/// one multiplier across all of its worker threads.
pub trait Multiplier: Send + Sync {
    /// Multiply two non-empty limb sequences exactly.
    ///
    /// # Errors
    /// - `CapacityExceeded` if the product needs a transform longer than the
    ///   configured tables allow
    /// - `PrecisionLoss` if a floating transform could not recover exact limbs
    fn multiply(&self, a: &[u32], b: &[u32]) -> NumericResult<Vec<u32>>;

    /// Build whatever tables a product of `product_len` limbs will need.
    ///
    /// Idempotent and safe to call from several threads. Calling it up front
    /// surfaces `CapacityExceeded` before any expensive work starts.
    fn prepare(&self, product_len: usize) -> NumericResult<()>;

    /// Largest product length (in limbs) this strategy can produce.
    fn max_product_len(&self) -> usize;

    /// Get the name of this strategy.
    ///
    /// Used for logging, debugging, and benchmarking.
    fn name(&self) -> &'static str;
}
