//! Levenshtein edit distance over character slices

/// Minimum number of single-character insertions, deletions or
/// substitutions turning `a` into `b`
pub fn levenshtein(a: &[char], b: &[char]) -> usize {
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut row: Vec<usize> = (0..=b.len()).collect();
    for (i, ac) in a.iter().enumerate() {
        let mut diag = row[0];
        row[0] = i + 1;
        for (j, bc) in b.iter().enumerate() {
            let above = row[j + 1];
            let cost = usize::from(ac != bc);
            row[j + 1] = (above + 1).min(row[j] + 1).min(diag + cost);
            diag = above;
        }
    }
    row[b.len()]
}

/// Positions in `text` that an optimal edit script keeps unchanged
///
/// Walks the full DP matrix back from the bottom-right corner, preferring
/// equal-character diagonals, then substitutions, deletions, insertions.
/// Positions are returned in ascending order.
pub fn aligned_positions(query: &[char], text: &[char]) -> Vec<usize> {
    let rows = query.len() + 1;
    let cols = text.len() + 1;
    let mut dp = vec![0usize; rows * cols];
    let at = |i: usize, j: usize| i * cols + j;

    for i in 0..rows {
        dp[at(i, 0)] = i;
    }
    for j in 0..cols {
        dp[at(0, j)] = j;
    }
    for i in 1..rows {
        for j in 1..cols {
            let cost = usize::from(query[i - 1] != text[j - 1]);
            dp[at(i, j)] = (dp[at(i - 1, j)] + 1)
                .min(dp[at(i, j - 1)] + 1)
                .min(dp[at(i - 1, j - 1)] + cost);
        }
    }

    let mut positions = Vec::new();
    let (mut i, mut j) = (query.len(), text.len());
    while i > 0 && j > 0 {
        let here = dp[at(i, j)];
        if query[i - 1] == text[j - 1] && here == dp[at(i - 1, j - 1)] {
            positions.push(j - 1);
            i -= 1;
            j -= 1;
        } else if here == dp[at(i - 1, j - 1)] + 1 {
            i -= 1;
            j -= 1;
        } else if here == dp[at(i - 1, j)] + 1 {
            i -= 1;
        } else {
            j -= 1;
        }
    }

    positions.reverse();
    positions
}
