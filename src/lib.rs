// ============================================================================
// Chudnovsky Pi Library
// Multi-threaded computation of pi with transform-accelerated arithmetic
// ============================================================================

//! # Chudnovsky Pi
//!
//! Computes decimal digits of pi with the Chudnovsky series, evaluated by
//! binary splitting on top of an arbitrary-precision fixed-point number type.
//!
//! ## Features
//!
//! - **Binary splitting** with a static thread budget split across the recursion
//! - **Transform multiplication** (complex FFT, three-prime NTT, or adaptive)
//! - **Newton iteration** for division and inverse square root
//! - **Eager limit checks**: term count and transform capacity are verified
//!   before any evaluation starts
//! - **Progress events** and pluggable result persistence
//!
//! ## Example
//!
//! ```rust
//! use chudnovsky_pi::prelude::*;
//!
//! let engine = PiEngineBuilder::new(50)
//!     .with_threads(2)
//!     .build()
//!     .unwrap();
//!
//! let store = MemoryStore::new();
//! let report = engine.run(&store).unwrap();
//!
//! assert!(report.digits.starts_with("3.14159265358979323846"));
//! assert_eq!(store.get("pi.txt"), Some(report.digits.clone()));
//! println!("terms: {}, elapsed: {:?}", report.plan.terms(), report.elapsed());
//! ```

pub mod domain;
pub mod engine;
pub mod interfaces;
pub mod numeric;
pub mod transform;
pub mod utils;

// Re-exports for convenience
pub mod prelude {
    pub use crate::domain::{ComputationPlan, ComputeConfig, MultiplierKind, TransformConfig};
    pub use crate::engine::{
        create_from_config, ComputeError, ComputeResult, PhaseTiming, PiEngine, PiEngineBuilder,
        RunReport,
    };
    pub use crate::interfaces::{
        FileStore, LoggingProgressObserver, MemoryStore, NoOpProgressObserver, Phase,
        ProgressEvent, ProgressObserver, ResultStore, StoreError,
    };
    pub use crate::numeric::{BigFloat, NumericError, NumericResult};
    pub use crate::transform::{create_multiplier, Multiplier};
}
