// ============================================================================
// Binary-Splitting Evaluator
// Parallel recursive evaluation of the series triples
// ============================================================================
//
// The range [a, b) is halved at m = a + (b - a) / 2 until single terms remain.
// A node with a thread budget t > 1 evaluates its left half on a scoped thread
// (budget t / 2) and its right half on the current thread (budget t - t / 2),
// so one evaluation never runs more than t threads at once. The tree shape
// does not depend on t, which makes results bit-identical for every budget.
// ============================================================================

use crate::domain::Triple;
use crate::interfaces::{ProgressEvent, ProgressObserver};
use crate::numeric::{NumericError, NumericResult};
use crate::transform::Multiplier;
use crate::utils::split_budget;
use std::panic;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// State shared by every node of one evaluation.
pub struct EvalContext {
    multiplier: Arc<dyn Multiplier>,
    precision: Option<usize>,
    completed: AtomicU64,
    total: u64,
    observer: Arc<dyn ProgressObserver>,
}

impl EvalContext {
    /// Create a context for an evaluation with `total` combine steps.
    ///
    /// `precision = None` keeps every triple exact.
    pub fn new(
        multiplier: Arc<dyn Multiplier>,
        precision: Option<usize>,
        total: u64,
        observer: Arc<dyn ProgressObserver>,
    ) -> Self {
        Self {
            multiplier,
            precision,
            completed: AtomicU64::new(0),
            total,
            observer,
        }
    }

    #[inline]
    pub fn precision(&self) -> Option<usize> {
        self.precision
    }

    /// Combine steps finished so far.
    #[inline]
    pub fn completed(&self) -> u64 {
        self.completed.load(Ordering::Acquire)
    }

    #[inline]
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn multiplier(&self) -> &dyn Multiplier {
        self.multiplier.as_ref()
    }

    fn record_combine(&self) {
        let completed = self.completed.fetch_add(1, Ordering::AcqRel) + 1;
        self.observer.on_event(&ProgressEvent::TermsCombined {
            completed,
            total: self.total,
        });
    }
}

/// Evaluate the triple of `[a, b)` with a budget of `threads` threads.
///
/// A budget of zero runs sequentially.
///
/// # Errors
/// - `EmptyRange` unless `a < b`
/// - Multiplier failures (`CapacityExceeded`, `PrecisionLoss`) from any node
pub fn evaluate(ctx: &EvalContext, a: u32, b: u32, threads: usize) -> NumericResult<Triple> {
    if a >= b {
        return Err(NumericError::EmptyRange { start: a, end: b });
    }

    if b - a == 1 {
        return Ok(Triple::leaf(b));
    }

    let mid = a + (b - a) / 2;
    let (left, right) = if threads > 1 {
        let (left_budget, right_budget) = split_budget(threads);
        let joined = crossbeam::scope(|scope| {
            let handle = scope.spawn(move |_| evaluate(ctx, a, mid, left_budget));
            let right = evaluate(ctx, mid, b, right_budget);
            let left = handle.join().unwrap_or_else(|payload| panic::resume_unwind(payload));
            (left, right)
        });
        joined.unwrap_or_else(|payload| panic::resume_unwind(payload))
    } else {
        (evaluate(ctx, a, mid, 1), evaluate(ctx, mid, b, 1))
    };

    let triple = Triple::combine(left?, right?, ctx.precision, ctx.multiplier())?;
    ctx.record_combine();
    Ok(triple)
}

/// Evaluate the whole series `[0, terms)`; zero terms is an `EmptyRange`.
pub fn evaluate_series(ctx: &EvalContext, terms: u32, threads: usize) -> NumericResult<Triple> {
    evaluate(ctx, 0, terms, threads.max(1))
}
