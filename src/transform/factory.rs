// ============================================================================
// Multiplier Factory
// Creates the configured multiplication strategy
// ============================================================================

use super::adaptive::AdaptiveMultiplier;
use super::basecase::BasecaseMultiplier;
use super::fft::FloatTransformMultiplier;
use super::ntt::ModularTransformMultiplier;
use super::traits::Multiplier;
use crate::domain::config::{MultiplierKind, TransformConfig};
use std::sync::Arc;

/// Creates the multiplication strategy selected by `kind`.
///
/// The returned handle owns its coefficient caches; share it (by cloning the
/// `Arc`) to reuse tables across computations.
///
/// # Example
/// ```
/// use chudnovsky_pi::domain::{MultiplierKind, TransformConfig};
/// use chudnovsky_pi::transform::create_multiplier;
///
/// let multiplier = create_multiplier(MultiplierKind::Adaptive, &TransformConfig::default());
/// assert_eq!(multiplier.name(), "Adaptive");
/// ```
pub fn create_multiplier(kind: MultiplierKind, config: &TransformConfig) -> Arc<dyn Multiplier> {
    let float_order = config.float_max_order.min(config.max_table_order);

    match kind {
        MultiplierKind::Basecase => Arc::new(BasecaseMultiplier::new()),
        MultiplierKind::FloatTransform => Arc::new(FloatTransformMultiplier::new(
            float_order,
            config.basecase_threshold,
        )),
        MultiplierKind::ModularTransform => Arc::new(ModularTransformMultiplier::new(
            config.max_table_order,
            config.basecase_threshold,
        )),
        MultiplierKind::Adaptive => Arc::new(AdaptiveMultiplier::new(
            FloatTransformMultiplier::new(float_order, config.basecase_threshold),
            ModularTransformMultiplier::new(config.max_table_order, config.basecase_threshold),
        )),
    }
}
