// ============================================================================
// Domain Models Module
// Configuration, series terms and the computation plan
// ============================================================================

pub mod config;
pub mod plan;
pub mod series;

pub use config::{ComputeConfig, MultiplierKind, TransformConfig};
pub use plan::{ComputationPlan, MAX_TERMS};
pub use series::{Triple, C3_OVER_24, QUOTIENT_FACTOR, SERIES_A, SERIES_B, SQRT_RADICAND};
