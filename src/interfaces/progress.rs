// ============================================================================
// Progress Observer Interface
// Defines the contract for observing a running computation
// ============================================================================

use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Phases of one computation, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Phase {
    /// Binary splitting of the series
    SeriesSummation,
    /// Newton division `Q·K / (A·Q + P)`
    Division,
    /// Newton inverse square root of 10005
    InverseSquareRoot,
    /// Product of the quotient and the inverse square root
    FinalMultiply,
}

impl Phase {
    /// All phases in execution order
    pub const ALL: [Phase; 4] = [
        Phase::SeriesSummation,
        Phase::Division,
        Phase::InverseSquareRoot,
        Phase::FinalMultiply,
    ];

    /// Short label used in logs and reports
    pub fn label(&self) -> &'static str {
        match self {
            Phase::SeriesSummation => "series-summation",
            Phase::Division => "division",
            Phase::InverseSquareRoot => "inverse-square-root",
            Phase::FinalMultiply => "final-multiply",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Events emitted while computing
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ProgressEvent {
    /// Series evaluation is about to start
    SummationStarted {
        terms: u32,
        total_steps: u64,
        timestamp: DateTime<Utc>,
    },

    /// One more internal combine finished
    TermsCombined { completed: u64, total: u64 },

    /// A phase finished
    PhaseCompleted { phase: Phase, elapsed: Duration },
}

/// Observer trait for progress reporting.
///
/// Called from the evaluation threads themselves, so implementations must
/// return quickly and must never panic or block.
pub trait ProgressObserver: Send + Sync {
    /// Handle a progress event
    fn on_event(&self, event: &ProgressEvent);
}

/// No-op observer
#[derive(Debug, Default)]
pub struct NoOpProgressObserver;

impl ProgressObserver for NoOpProgressObserver {
    fn on_event(&self, _event: &ProgressEvent) {
        // Do nothing
    }
}

/// Logs milestones at `info` and combine progress at `debug`, once per
/// percent.
#[derive(Debug, Default)]
pub struct LoggingProgressObserver {
    last_percent: AtomicU64,
}

impl LoggingProgressObserver {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressObserver for LoggingProgressObserver {
    fn on_event(&self, event: &ProgressEvent) {
        match event {
            ProgressEvent::SummationStarted {
                terms, total_steps, ..
            } => {
                self.last_percent.store(0, Ordering::Relaxed);
                tracing::info!(terms, total_steps, "series summation started");
            },
            ProgressEvent::TermsCombined { completed, total } => {
                if *total == 0 {
                    return;
                }
                let percent = completed.saturating_mul(100) / total;
                // Several threads report concurrently; only the first to reach a new percent logs
                if self.last_percent.fetch_max(percent, Ordering::Relaxed) < percent {
                    tracing::debug!(completed, total, percent, "combining terms");
                }
            },
            ProgressEvent::PhaseCompleted { phase, elapsed } => {
                tracing::info!(
                    phase = phase.label(),
                    elapsed_ms = elapsed.as_millis() as u64,
                    "phase completed"
                );
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_labels() {
        let labels: Vec<_> = Phase::ALL.iter().map(Phase::label).collect();
        assert_eq!(
            labels,
            vec!["series-summation", "division", "inverse-square-root", "final-multiply"]
        );
        assert_eq!(Phase::Division.to_string(), "division");
    }

    #[test]
    fn test_noop_observer() {
        let observer = NoOpProgressObserver;
        observer.on_event(&ProgressEvent::TermsCombined {
            completed: 1,
            total: 2,
        });
        // Should not panic
    }

    #[test]
    fn test_logging_observer_tracks_percent() {
        let observer = LoggingProgressObserver::new();
        observer.on_event(&ProgressEvent::SummationStarted {
            terms: 201,
            total_steps: 200,
            timestamp: Utc::now(),
        });
        for completed in 1..=200 {
            observer.on_event(&ProgressEvent::TermsCombined {
                completed,
                total: 200,
            });
        }
        assert_eq!(observer.last_percent.load(Ordering::Relaxed), 100);

        // A zero-step run reports nothing and does not divide by zero
        observer.on_event(&ProgressEvent::TermsCombined {
            completed: 0,
            total: 0,
        });
        observer.on_event(&ProgressEvent::PhaseCompleted {
            phase: Phase::FinalMultiply,
            elapsed: Duration::from_millis(3),
        });
    }
}
