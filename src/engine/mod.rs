// ============================================================================
// Engine Module
// Contains the binary-splitting evaluator and the computation orchestrator
// ============================================================================

mod binary_split;
mod errors;
mod pi_engine;

pub mod factory;

pub use binary_split::{evaluate, evaluate_series, EvalContext};
pub use errors::{ComputeError, ComputeResult};
pub use factory::{create_from_config, PiEngineBuilder};
pub use pi_engine::{PhaseTiming, PiEngine, RunReport};
