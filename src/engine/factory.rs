// ============================================================================
// Pi Engine Factory
// Creates engines with proper configuration
// ============================================================================

use crate::domain::config::{ComputeConfig, MultiplierKind, TransformConfig};
use crate::engine::PiEngine;
use crate::interfaces::{NoOpProgressObserver, ProgressObserver};
use crate::transform::{create_multiplier, Multiplier};
use std::sync::Arc;

// ============================================================================
// Factory Functions
// ============================================================================

/// Creates a pi engine from configuration
///
/// # Arguments
/// * `config` - Computation configuration
/// * `observer` - Observer for progress events
///
/// # Returns
/// * `Result<PiEngine, String>` - Configured engine or validation error
///
/// # Example
/// ```
/// use chudnovsky_pi::prelude::*;
/// use std::sync::Arc;
///
/// let config = ComputeConfig::quick_check();
/// let engine = create_from_config(config, Arc::new(NoOpProgressObserver)).unwrap();
/// assert_eq!(engine.multiplier().name(), "Adaptive");
/// ```
pub fn create_from_config(
    config: ComputeConfig,
    observer: Arc<dyn ProgressObserver>,
) -> Result<PiEngine, String> {
    // Validate configuration first
    config.validate()?;

    let multiplier = create_multiplier(config.multiplier, &config.transform);

    Ok(PiEngine::new(config, multiplier, observer))
}

// ============================================================================
// Builder Pattern for Advanced Configuration
// ============================================================================

/// Builder for creating pi engines with fluent API
///
/// # Example
/// ```
/// use chudnovsky_pi::prelude::*;
/// use std::sync::Arc;
///
/// let engine = PiEngineBuilder::new(1_000)
///     .with_threads(4)
///     .modular_transform()
///     .with_output_name("pi-1000.txt")
///     .with_observer(Arc::new(LoggingProgressObserver::new()))
///     .build()
///     .unwrap();
/// assert_eq!(engine.config().threads, 4);
/// ```
pub struct PiEngineBuilder {
    config: ComputeConfig,
    observer: Arc<dyn ProgressObserver>,
    multiplier: Option<Arc<dyn Multiplier>>,
}

impl PiEngineBuilder {
    /// Create a new builder for `digits` decimal places
    pub fn new(digits: u64) -> Self {
        Self::from_config(ComputeConfig::new(digits))
    }

    /// Start from an existing configuration
    pub fn from_config(config: ComputeConfig) -> Self {
        Self {
            config,
            observer: Arc::new(NoOpProgressObserver),
            multiplier: None,
        }
    }

    /// Set the thread budget
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.config.threads = threads;
        self
    }

    // ========================================================================
    // Multiplication Strategy
    // ========================================================================

    /// Use schoolbook multiplication only
    pub fn basecase(mut self) -> Self {
        self.config.multiplier = MultiplierKind::Basecase;
        self
    }

    /// Use the complex FFT for every large product
    pub fn float_transform(mut self) -> Self {
        self.config.multiplier = MultiplierKind::FloatTransform;
        self
    }

    /// Use the three-prime NTT for every large product
    pub fn modular_transform(mut self) -> Self {
        self.config.multiplier = MultiplierKind::ModularTransform;
        self
    }

    /// Float transform while safe, modular transform above (default)
    pub fn adaptive(mut self) -> Self {
        self.config.multiplier = MultiplierKind::Adaptive;
        self
    }

    /// Set transform limits and thresholds
    pub fn with_transform(mut self, transform: TransformConfig) -> Self {
        self.config.transform = transform;
        self
    }

    /// Reuse an existing multiplier (and its tables) instead of creating one
    pub fn with_multiplier(mut self, multiplier: Arc<dyn Multiplier>) -> Self {
        self.multiplier = Some(multiplier);
        self
    }

    // ========================================================================
    // Collaborators
    // ========================================================================

    /// Set the name the digits are persisted under
    pub fn with_output_name(mut self, name: impl Into<String>) -> Self {
        self.config.output_name = name.into();
        self
    }

    /// Set the progress observer
    pub fn with_observer(mut self, observer: Arc<dyn ProgressObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Build the engine
    pub fn build(self) -> Result<PiEngine, String> {
        match self.multiplier {
            Some(multiplier) => {
                self.config.validate()?;
                Ok(PiEngine::new(self.config, multiplier, self.observer))
            },
            None => create_from_config(self.config, self.observer),
        }
    }
}
