// ============================================================================
// Transform Module
// Multiplication strategies for large limb sequences
//
// This module contains:
// - Multiplier: the strategy trait shared by every backend
// - Basecase: schoolbook multiplication (exact reference)
// - FloatTransform: complex FFT convolution
// - ModularTransform: three-prime NTT convolution
// - Adaptive: float while safe, modular beyond
// - TwiddleCache: lazily built, shared root-of-unity tables
// ============================================================================

mod adaptive;
mod basecase;
mod cache;
mod factory;
mod fft;
mod layout;
mod ntt;
mod traits;

pub use adaptive::AdaptiveMultiplier;
pub use basecase::BasecaseMultiplier;
pub use cache::TwiddleCache;
pub use factory::create_multiplier;
pub use fft::{Complex, FloatTransformMultiplier, FLOAT_SAFE_ORDER};
pub use layout::transform_order;
pub use ntt::{ModularTransformMultiplier, NTT_MAX_ORDER, NTT_PRIMES};
pub use traits::Multiplier;
