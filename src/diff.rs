/// A single row of the edit script, tagged with the source indices it consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOp {
    /// Line present unchanged in both sequences.
    Equal { left: usize, right: usize },
    /// Line exists only in the left sequence.
    Removed { left: usize },
    /// Line exists only in the right sequence.
    Added { right: usize },
}

pub type EditScript = Vec<EditOp>;

/// Compute a line-level LCS alignment of two sequences.
///
/// Classic O(m*n) dynamic programming: `dp[i][j]` holds the LCS length of
/// `left[0..i]` and `right[0..j]`. The backtrack prefers the `Added` axis on
/// equal dp neighbors, which keeps output deterministic and groups adjacent
/// changes the same way on every run. The script is returned in top-to-bottom
/// document order.
pub fn compute<S: AsRef<str>>(left: &[S], right: &[S]) -> EditScript {
    let m = left.len();
    let n = right.len();

    let mut dp = vec![vec![0usize; n + 1]; m + 1];
    for i in 1..=m {
        for j in 1..=n {
            if left[i - 1].as_ref() == right[j - 1].as_ref() {
                dp[i][j] = dp[i - 1][j - 1] + 1;
            } else {
                dp[i][j] = dp[i - 1][j].max(dp[i][j - 1]);
            }
        }
    }

    let mut script = Vec::with_capacity(m.max(n));
    let mut i = m;
    let mut j = n;
    while i > 0 || j > 0 {
        if i > 0 && j > 0 && left[i - 1].as_ref() == right[j - 1].as_ref() {
            script.push(EditOp::Equal {
                left: i - 1,
                right: j - 1,
            });
            i -= 1;
            j -= 1;
        } else if j > 0 && (i == 0 || dp[i][j - 1] >= dp[i - 1][j]) {
            script.push(EditOp::Added { right: j - 1 });
            j -= 1;
        } else {
            script.push(EditOp::Removed { left: i - 1 });
            i -= 1;
        }
    }
    script.reverse();
    script
}

/// Count of (removed, added) rows in a script.
pub fn edit_counts(script: &[EditOp]) -> (usize, usize) {
    let mut removed = 0;
    let mut added = 0;
    for op in script {
        match op {
            EditOp::Removed { .. } => removed += 1,
            EditOp::Added { .. } => added += 1,
            EditOp::Equal { .. } => {}
        }
    }
    (removed, added)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Left indices of Equal/Removed ops must enumerate 0..m in order;
    /// symmetrically for the right side with Equal/Added.
    fn assert_alignment(script: &[EditOp], m: usize, n: usize) {
        let lefts: Vec<usize> = script
            .iter()
            .filter_map(|op| match op {
                EditOp::Equal { left, .. } | EditOp::Removed { left } => Some(*left),
                EditOp::Added { .. } => None,
            })
            .collect();
        let rights: Vec<usize> = script
            .iter()
            .filter_map(|op| match op {
                EditOp::Equal { right, .. } | EditOp::Added { right } => Some(*right),
                EditOp::Removed { .. } => None,
            })
            .collect();
        assert_eq!(lefts, (0..m).collect::<Vec<_>>());
        assert_eq!(rights, (0..n).collect::<Vec<_>>());
        assert!(script.len() >= m.max(n));
        assert!(script.len() <= m + n);
    }

    #[test]
    fn test_identity() {
        let lines = ["a", "b", "c"];
        let script = compute(&lines, &lines);
        assert_eq!(script.len(), 3);
        assert!(script
            .iter()
            .all(|op| matches!(op, EditOp::Equal { .. })));
        assert_alignment(&script, 3, 3);
    }

    #[test]
    fn test_both_empty() {
        let script = compute::<&str>(&[], &[]);
        assert!(script.is_empty());
    }

    #[test]
    fn test_empty_left() {
        let script = compute(&[], &["x", "y"]);
        assert_eq!(
            script,
            vec![EditOp::Added { right: 0 }, EditOp::Added { right: 1 }]
        );
    }

    #[test]
    fn test_empty_right() {
        let script = compute(&["x", "y"], &[]);
        assert_eq!(
            script,
            vec![EditOp::Removed { left: 0 }, EditOp::Removed { left: 1 }]
        );
    }

    #[test]
    fn test_disjoint() {
        let script = compute(&["a"], &["b"]);
        assert_eq!(script.len(), 2);
        let (removed, added) = edit_counts(&script);
        assert_eq!((removed, added), (1, 1));
        assert!(!script.iter().any(|op| matches!(op, EditOp::Equal { .. })));
        assert_alignment(&script, 1, 1);
    }

    #[test]
    fn test_minimal_single_change() {
        let script = compute(&["a", "b", "c"], &["a", "x", "c"]);
        let (removed, added) = edit_counts(&script);
        assert_eq!((removed, added), (1, 1));
        assert_eq!(script[0], EditOp::Equal { left: 0, right: 0 });
        assert_eq!(script[script.len() - 1], EditOp::Equal { left: 2, right: 2 });
        assert_alignment(&script, 3, 3);
    }

    #[test]
    fn test_tie_break_orders_removals_first() {
        // Fully disjoint with equal dp values everywhere on the backtrack:
        // the right axis wins each tie, so additions are consumed first and
        // land after the removals once the script is reversed.
        let script = compute(&["a", "b"], &["c", "d"]);
        assert_eq!(
            script,
            vec![
                EditOp::Removed { left: 0 },
                EditOp::Removed { left: 1 },
                EditOp::Added { right: 0 },
                EditOp::Added { right: 1 },
            ]
        );
    }

    #[test]
    fn test_interleaved_changes() {
        let left = ["fn main() {", "    old();", "}", "", "// tail"];
        let right = ["fn main() {", "    new();", "    extra();", "}", "// tail"];
        let script = compute(&left, &right);
        assert_alignment(&script, left.len(), right.len());
        let equal_count = script
            .iter()
            .filter(|op| matches!(op, EditOp::Equal { .. }))
            .count();
        // "fn main() {", "}" and "// tail" survive
        assert_eq!(equal_count, 3);
    }

    #[test]
    fn test_alignment_holds_for_prefix_suffix_overlap() {
        let left = ["a", "b", "a", "b", "a"];
        let right = ["b", "a", "b", "a", "b"];
        let script = compute(&left, &right);
        assert_alignment(&script, 5, 5);
        let (removed, added) = edit_counts(&script);
        // LCS length is 4 ("b a b a"), so one removal and one addition.
        assert_eq!((removed, added), (1, 1));
    }
}
