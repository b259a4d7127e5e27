// ============================================================================
// Thread Budget Detection
// Sizing the binary-splitting recursion to the machine
// ============================================================================
//
// The recursion halves its budget at every level, so a power-of-two budget
// gives every leaf subtree exactly one thread. Other budgets still work but
// leave the two halves of some nodes unevenly staffed.
// ============================================================================

/// Number of logical CPUs available to this process (at least 1).
pub fn available_cores() -> usize {
    std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(1)
}

/// Largest power of two not above the available core count.
pub fn default_thread_budget() -> usize {
    round_down_to_power_of_two(available_cores())
}

/// Largest power of two not above `n` (1 for `n <= 1`).
pub fn round_down_to_power_of_two(n: usize) -> usize {
    match n {
        0 | 1 => 1,
        _ => 1 << n.ilog2(),
    }
}

/// Split a budget between the left and right child of a recursion node.
///
/// The left share is `threads / 2`, the right gets the rest; the shares sum
/// to `threads`.
#[inline]
pub fn split_budget(threads: usize) -> (usize, usize) {
    let left = threads / 2;
    (left, threads - left)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_available_cores() {
        assert!(available_cores() >= 1);
        let budget = default_thread_budget();
        assert!(budget.is_power_of_two());
        assert!(budget <= available_cores());
    }

    #[test]
    fn test_round_down() {
        assert_eq!(round_down_to_power_of_two(0), 1);
        assert_eq!(round_down_to_power_of_two(1), 1);
        assert_eq!(round_down_to_power_of_two(6), 4);
        assert_eq!(round_down_to_power_of_two(8), 8);
        assert_eq!(round_down_to_power_of_two(127), 64);
    }

    #[test]
    fn test_split_budget() {
        assert_eq!(split_budget(8), (4, 4));
        assert_eq!(split_budget(5), (2, 3));
        assert_eq!(split_budget(2), (1, 1));
        for threads in 2..64 {
            let (left, right) = split_budget(threads);
            assert_eq!(left + right, threads);
            assert!(left >= 1 && right >= left);
        }
    }
}
