// ============================================================================
// Computation Configuration
// Digit count, thread budget and multiplication backend settings
// ============================================================================

use crate::transform::{FLOAT_SAFE_ORDER, NTT_MAX_ORDER};
use crate::utils::default_thread_budget;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Multiplier Kind
// ============================================================================

/// Selects the multiplication strategy used for the whole run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MultiplierKind {
    /// Schoolbook multiplication only
    /// - Exact, no tables, quadratic cost
    /// - Use case: reference results in tests, tiny digit counts
    Basecase,

    /// Complex FFT over base-1000 digits
    /// - Fastest per point, limited by floating round-off
    FloatTransform,

    /// Number-theoretic transform over three primes
    /// - Exact for every supported order
    ModularTransform,

    /// Floating transform while it is safe, modular transform above that
    #[default]
    Adaptive,
}

// ============================================================================
// Transform Configuration
// ============================================================================

/// Limits and thresholds for the transform-based strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TransformConfig {
    /// Largest transform order (log2 of the length) any table may reach
    pub max_table_order: u32,

    /// Largest order handed to the floating transform (at most FLOAT_SAFE_ORDER)
    pub float_max_order: u32,

    /// Operands with at most this many limbs use schoolbook multiplication
    pub basecase_threshold: usize,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            max_table_order: NTT_MAX_ORDER,
            float_max_order: FLOAT_SAFE_ORDER,
            basecase_threshold: 32,
        }
    }
}

impl TransformConfig {
    /// Validate the transform limits
    pub fn validate(&self) -> Result<(), String> {
        if self.max_table_order == 0 || self.max_table_order > 40 {
            return Err("Maximum table order must be between 1 and 40".to_string());
        }

        if self.float_max_order > FLOAT_SAFE_ORDER {
            return Err(format!(
                "Floating transform order cannot exceed {}",
                FLOAT_SAFE_ORDER
            ));
        }

        Ok(())
    }
}

// ============================================================================
// Complete Computation Configuration
// ============================================================================

/// Everything needed to run one computation of pi
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ComputeConfig {
    /// Decimal digits after the decimal point
    pub digits: u64,

    /// Thread budget for the binary-splitting recursion
    /// Power-of-two values split evenly
    pub threads: usize,

    /// Multiplication strategy
    pub multiplier: MultiplierKind,

    /// Transform limits and thresholds
    pub transform: TransformConfig,

    /// Name under which the digits are persisted
    pub output_name: String,
}

impl ComputeConfig {
    /// Create a new configuration for `digits` decimal places
    pub fn new(digits: u64) -> Self {
        Self {
            digits,
            threads: default_thread_budget(),
            multiplier: MultiplierKind::default(),
            transform: TransformConfig::default(),
            output_name: "pi.txt".to_string(),
        }
    }

    /// Builder method: Set the thread budget
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Builder method: Set the multiplication strategy
    pub fn with_multiplier(mut self, multiplier: MultiplierKind) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// Builder method: Set the transform limits
    pub fn with_transform(mut self, transform: TransformConfig) -> Self {
        self.transform = transform;
        self
    }

    /// Builder method: Set the maximum table order
    pub fn with_max_table_order(mut self, order: u32) -> Self {
        self.transform.max_table_order = order;
        self
    }

    /// Builder method: Set the output name
    pub fn with_output_name(mut self, name: impl Into<String>) -> Self {
        self.output_name = name.into();
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.digits == 0 {
            return Err("Digit count must be at least 1".to_string());
        }

        if self.threads == 0 {
            return Err("Thread budget must be at least 1".to_string());
        }

        if self.output_name.trim().is_empty() {
            return Err("Output name cannot be empty".to_string());
        }

        if self.output_name.contains(['/', '\\']) {
            return Err("Output name must not contain path separators".to_string());
        }

        self.transform.validate()
    }
}

// ============================================================================
// Preset Configurations (Factory Methods)
// ============================================================================

impl ComputeConfig {
    /// Small single-threaded run for smoke tests
    /// - 1,000 digits
    /// - One thread, adaptive multiplication
    pub fn quick_check() -> Self {
        Self::new(1_000).with_threads(1)
    }

    /// Large run using every core
    /// - Thread budget from the detected core count
    /// - Adaptive multiplication with the largest modular tables
    pub fn record_attempt(digits: u64) -> Self {
        Self::new(digits)
            .with_multiplier(MultiplierKind::Adaptive)
            .with_max_table_order(NTT_MAX_ORDER)
    }

    /// Exact reference run without any transform
    pub fn reference(digits: u64) -> Self {
        Self::new(digits)
            .with_threads(1)
            .with_multiplier(MultiplierKind::Basecase)
    }
}
