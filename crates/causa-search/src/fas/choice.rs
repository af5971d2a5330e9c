//! Lexicographic k-subsets of a slice.

use smallvec::SmallVec;

/// Conditioning sets are small; keep them on the stack.
pub type Subset = SmallVec<[usize; 8]>;

/// Iterates every `k`-element subset of `items` in lexicographic order of
/// position. `k = 0` yields the empty set once; `k > len` yields nothing.
#[derive(Debug, Clone)]
pub struct ChoiceGenerator<'a> {
    items: &'a [usize],
    positions: Option<SmallVec<[usize; 8]>>,
}

impl<'a> ChoiceGenerator<'a> {
    pub fn new(items: &'a [usize], k: usize) -> Self {
        let positions = (k <= items.len()).then(|| (0..k).collect());
        Self { items, positions }
    }
}

impl Iterator for ChoiceGenerator<'_> {
    type Item = Subset;

    fn next(&mut self) -> Option<Subset> {
        let positions = self.positions.as_mut()?;
        let current: Subset = positions.iter().map(|&p| self.items[p]).collect();

        // Advance: bump the rightmost position that still has room.
        let (n, k) = (self.items.len(), positions.len());
        let mut i = k;
        loop {
            if i == 0 {
                self.positions = None;
                break;
            }
            i -= 1;
            if positions[i] < n - k + i {
                positions[i] += 1;
                for j in i + 1..k {
                    positions[j] = positions[j - 1] + 1;
                }
                break;
            }
        }
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all(items: &[usize], k: usize) -> Vec<Vec<usize>> {
        ChoiceGenerator::new(items, k).map(|s| s.to_vec()).collect()
    }

    #[test]
    fn test_lexicographic_order() {
        assert_eq!(
            all(&[1, 4, 6, 9], 2),
            vec![vec![1, 4], vec![1, 6], vec![1, 9], vec![4, 6], vec![4, 9], vec![6, 9]]
        );
    }

    #[test]
    fn test_edge_sizes() {
        assert_eq!(all(&[3, 5], 0), vec![Vec::<usize>::new()]);
        assert_eq!(all(&[3, 5], 2), vec![vec![3, 5]]);
        assert!(all(&[3, 5], 3).is_empty());
        assert_eq!(all(&[], 0), vec![Vec::<usize>::new()]);
    }

    #[test]
    fn test_count_is_binomial() {
        let items: Vec<usize> = (0..7).collect();
        assert_eq!(ChoiceGenerator::new(&items, 3).count(), 35);
    }
}
