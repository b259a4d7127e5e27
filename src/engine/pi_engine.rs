// ============================================================================
// Pi Engine
// Plans, evaluates and renders one computation of pi
// ============================================================================
//
// Phases:
// 1. series-summation     (P, Q) over [0, N) by binary splitting
// 2. division             Q·4270934400 / (13591409·Q + P)
// 3. inverse-square-root  1 / sqrt(10005)
// 4. final-multiply       quotient · inverse square root
//
// Every size-dependent failure (term count, transform capacity) is checked
// before phase 1 starts.
// ============================================================================

use super::binary_split::{evaluate_series, EvalContext};
use super::errors::{ComputeError, ComputeResult};
use crate::domain::{
    ComputationPlan, ComputeConfig, Triple, QUOTIENT_FACTOR, SERIES_A, SQRT_RADICAND,
};
use crate::interfaces::{Phase, ProgressEvent, ProgressObserver, ResultStore};
use crate::numeric::BigFloat;
use crate::transform::Multiplier;
use arrayvec::ArrayVec;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::{Duration, Instant};
use uuid::Uuid;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Run Report
// ============================================================================

/// Wall-clock time spent in one phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PhaseTiming {
    pub phase: Phase,
    pub elapsed: Duration,
}

/// Outcome of one computation
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RunReport {
    /// Unique run identifier
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub plan: ComputationPlan,
    pub threads: usize,
    /// Name of the multiplication strategy
    pub multiplier: String,
    /// Timings in execution order
    pub phases: ArrayVec<PhaseTiming, 4>,
    /// `"3."` followed by the requested digits
    pub digits: String,
    /// Set when persisting the digits failed; the digits are still valid
    pub persist_error: Option<String>,
}

impl RunReport {
    /// Timing of `phase`, if it ran
    pub fn phase(&self, phase: Phase) -> Option<&PhaseTiming> {
        self.phases.iter().find(|timing| timing.phase == phase)
    }

    /// Total time spent in all phases
    pub fn elapsed(&self) -> Duration {
        self.phases.iter().map(|timing| timing.elapsed).sum()
    }

    pub fn is_persisted(&self) -> bool {
        self.persist_error.is_none()
    }

    /// Serialize the report to JSON
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

// ============================================================================
// Engine
// ============================================================================

/// Computes pi for one configuration.
///
/// The multiplier (and its coefficient tables) is shared through an `Arc`,
/// so several engines can reuse the same tables.
///
/// # Example
/// ```
/// use chudnovsky_pi::prelude::*;
///
/// let engine = PiEngineBuilder::new(30).with_threads(2).build().unwrap();
/// let report = engine.compute().unwrap();
/// assert_eq!(report.digits, "3.141592653589793238462643383279");
/// ```
pub struct PiEngine {
    config: ComputeConfig,
    multiplier: Arc<dyn Multiplier>,
    observer: Arc<dyn ProgressObserver>,
}

impl PiEngine {
    pub fn new(
        config: ComputeConfig,
        multiplier: Arc<dyn Multiplier>,
        observer: Arc<dyn ProgressObserver>,
    ) -> Self {
        Self {
            config,
            multiplier,
            observer,
        }
    }

    pub fn config(&self) -> &ComputeConfig {
        &self.config
    }

    /// Shared handle to the multiplication strategy
    pub fn multiplier(&self) -> Arc<dyn Multiplier> {
        Arc::clone(&self.multiplier)
    }

    /// Validate the configuration and derive the plan.
    ///
    /// # Errors
    /// `InvalidConfig` or `LimitExceeded`.
    pub fn plan(&self) -> ComputeResult<ComputationPlan> {
        self.config.validate().map_err(ComputeError::InvalidConfig)?;
        ComputationPlan::derive(self.config.digits)
    }

    /// Compute the configured number of digits.
    pub fn compute(&self) -> ComputeResult<RunReport> {
        let plan = self.plan()?;
        self.compute_with_plan(plan)
    }

    /// Compute with an explicit plan (for example a non-default working
    /// precision).
    ///
    /// # Errors
    /// - `CapacityExceeded` before any evaluation if the multiplier cannot
    ///   hold products of the plan's size
    /// - Any numeric failure during the phases
    pub fn compute_with_plan(&self, plan: ComputationPlan) -> ComputeResult<RunReport> {
        let significant = usize::try_from(plan.digits())
            .ok()
            .and_then(|digits| digits.checked_add(1))
            .ok_or_else(|| {
                ComputeError::InvalidConfig("Digit count does not fit in memory".to_string())
            })?;

        let id = Uuid::new_v4();
        let started_at = Utc::now();
        let threads = self.config.threads.max(1);
        tracing::info!(
            run_id = %id,
            constant = "pi",
            algorithm = "Chudnovsky (1988)",
            digits = plan.digits(),
            threads,
            terms = plan.terms(),
            precision = plan.precision(),
            multiplier = self.multiplier.name(),
            "computation started"
        );

        self.multiplier.prepare(plan.product_limbs())?;

        let multiplier = self.multiplier.as_ref();
        let precision = plan.precision();
        let mut phases = ArrayVec::<PhaseTiming, 4>::new();

        // Phase 1
        self.observer.on_event(&ProgressEvent::SummationStarted {
            terms: plan.terms(),
            total_steps: plan.combine_steps(),
            timestamp: Utc::now(),
        });
        let clock = Instant::now();
        let ctx = EvalContext::new(
            Arc::clone(&self.multiplier),
            Some(precision),
            plan.combine_steps(),
            Arc::clone(&self.observer),
        );
        let Triple { p, q, .. } = evaluate_series(&ctx, plan.terms(), threads)?;
        self.finish_phase(&mut phases, Phase::SeriesSummation, clock);

        // Phase 2
        let clock = Instant::now();
        let numerator = &q.mul_u64(SERIES_A) + &p;
        let denominator = q.mul_u64(QUOTIENT_FACTOR);
        let quotient = denominator.divide(&numerator, precision, multiplier)?;
        self.finish_phase(&mut phases, Phase::Division, clock);

        // Phase 3
        let clock = Instant::now();
        let inv_sqrt = BigFloat::from_u32(SQRT_RADICAND).inv_sqrt(precision, multiplier)?;
        self.finish_phase(&mut phases, Phase::InverseSquareRoot, clock);

        // Phase 4
        let clock = Instant::now();
        let pi = quotient.mul(&inv_sqrt, Some(precision), multiplier)?;
        let digits = pi.to_decimal_string(significant);
        self.finish_phase(&mut phases, Phase::FinalMultiply, clock);

        let report = RunReport {
            id,
            started_at,
            finished_at: Utc::now(),
            plan,
            threads,
            multiplier: self.multiplier.name().to_string(),
            phases,
            digits,
            persist_error: None,
        };
        tracing::info!(
            run_id = %id,
            elapsed_ms = report.elapsed().as_millis() as u64,
            "computation finished"
        );

        Ok(report)
    }

    /// Compute and persist the digits under the configured output name.
    ///
    /// A persistence failure is logged and recorded in the report; the
    /// computed digits are returned either way.
    pub fn run(&self, store: &dyn ResultStore) -> ComputeResult<RunReport> {
        let mut report = self.compute()?;
        if let Err(err) = self.persist(&report, store) {
            tracing::error!(run_id = %report.id, error = %err, "failed to persist digits");
            report.persist_error = Some(err.to_string());
        }
        Ok(report)
    }

    /// Write the digits of `report` to `store`.
    pub fn persist(&self, report: &RunReport, store: &dyn ResultStore) -> ComputeResult<()> {
        store.store(&self.config.output_name, &report.digits)?;
        tracing::info!(
            run_id = %report.id,
            name = %self.config.output_name,
            "digits persisted"
        );
        Ok(())
    }

    fn finish_phase(&self, phases: &mut ArrayVec<PhaseTiming, 4>, phase: Phase, clock: Instant) {
        let elapsed = clock.elapsed();
        self.observer
            .on_event(&ProgressEvent::PhaseCompleted { phase, elapsed });
        phases.push(PhaseTiming { phase, elapsed });
    }
}
