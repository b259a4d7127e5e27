// ============================================================================
// Transform Layout Helpers
// Length/order arithmetic and the bit-reversal permutation shared by the
// floating and modular transforms
// ============================================================================

/// Smallest order `k` such that `2^k >= len`.
#[inline]
pub fn transform_order(len: usize) -> u32 {
    len.next_power_of_two().trailing_zeros()
}

/// Reorder `data` (whose length is a power of two) into bit-reversed index order.
pub(crate) fn bit_reverse_permute<T>(data: &mut [T]) {
    let n = data.len();
    let mut j = 0usize;
    for i in 1..n {
        let mut bit = n >> 1;
        while j & bit != 0 {
            j ^= bit;
            bit >>= 1;
        }
        j |= bit;
        if i < j {
            data.swap(i, j);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_order() {
        assert_eq!(transform_order(0), 0);
        assert_eq!(transform_order(1), 0);
        assert_eq!(transform_order(2), 1);
        assert_eq!(transform_order(3), 2);
        assert_eq!(transform_order(4), 2);
        assert_eq!(transform_order(5), 3);
        assert_eq!(transform_order(1 << 20), 20);
        assert_eq!(transform_order((1 << 20) + 1), 21);
    }

    #[test]
    fn test_bit_reverse_permute() {
        let mut data: Vec<usize> = (0..8).collect();
        bit_reverse_permute(&mut data);
        assert_eq!(data, vec![0, 4, 2, 6, 1, 5, 3, 7]);

        // Applying the permutation twice is the identity
        bit_reverse_permute(&mut data);
        assert_eq!(data, (0..8).collect::<Vec<_>>());
    }

    #[test]
    fn test_bit_reverse_trivial_lengths() {
        let mut one = vec![42];
        bit_reverse_permute(&mut one);
        assert_eq!(one, vec![42]);

        let mut two = vec![1, 2];
        bit_reverse_permute(&mut two);
        assert_eq!(two, vec![1, 2]);
    }
}
