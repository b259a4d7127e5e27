// ============================================================================
// Utilities Module
// Helper functions for sizing the parallel recursion
// ============================================================================

mod threads;

pub use threads::{
    available_cores, default_thread_budget, round_down_to_power_of_two, split_budget,
};
