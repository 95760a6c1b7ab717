//! Stable counting sort of nodes by rank.
//!
//! Ranks are integers in `[0, n)`, so a counting sort orders the nodes in
//! `O(n)`. Nodes are placed in ascending position order within each bucket,
//! which keeps nodes of equal rank in their original input order.

/// Return node positions ordered by ascending rank, stable on position.
pub(crate) fn stable_order(ranks: &[usize]) -> Vec<usize> {
    let n = ranks.len();

    // starts[r] = first output slot of bucket r.
    let mut starts = vec![0usize; n + 1];
    for &rank in ranks {
        starts[rank + 1] += 1;
    }
    for r in 1..=n {
        starts[r] += starts[r - 1];
    }

    let mut order = vec![0usize; n];
    for (node, &rank) in ranks.iter().enumerate() {
        order[starts[rank]] = node;
        starts[rank] += 1;
    }
    order
}

#[cfg(test)]
mod tests {
    use super::stable_order;

    #[test]
    fn empty() {
        assert!(stable_order(&[]).is_empty());
    }

    #[test]
    fn sorts_by_rank() {
        assert_eq!(stable_order(&[2, 0, 1]), vec![1, 2, 0]);
    }

    #[test]
    fn equal_ranks_keep_input_order() {
        // Nodes 0, 2 and 4 share rank 3; nodes 1 and 3 share rank 1.
        assert_eq!(stable_order(&[3, 1, 3, 1, 3]), vec![1, 3, 0, 2, 4]);
    }
}
