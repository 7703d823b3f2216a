//! Line-level diff between two version bodies.
//!
//! Only the edit script is produced here; rendering it is the client's job.

use serde::Serialize;

/// Kind of a line in a diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffLineType {
    Added,
    Removed,
    Unchanged,
}

/// A single line of a diff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffLine {
    pub line_type: DiffLineType,
    pub content: String,
}

/// Added/removed line counts for a diff.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiffStats {
    pub added: usize,
    pub removed: usize,
}

/// Compute a line diff from `old` to `new` using a longest-common-subsequence
/// table over lines.
///
/// Removed lines are emitted before added lines at each point of divergence.
pub fn compute_line_diff(old: &str, new: &str) -> Vec<DiffLine> {
    let a: Vec<&str> = old.lines().collect();
    let b: Vec<&str> = new.lines().collect();

    // suffix[i][j] = LCS length of a[i..] and b[j..].
    let mut suffix = vec![vec![0usize; b.len() + 1]; a.len() + 1];
    for i in (0..a.len()).rev() {
        for j in (0..b.len()).rev() {
            suffix[i][j] = if a[i] == b[j] {
                suffix[i + 1][j + 1] + 1
            } else {
                suffix[i + 1][j].max(suffix[i][j + 1])
            };
        }
    }

    let line = |line_type, content: &str| DiffLine {
        line_type,
        content: content.to_string(),
    };

    let mut out = Vec::with_capacity(a.len().max(b.len()));
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        if a[i] == b[j] {
            out.push(line(DiffLineType::Unchanged, a[i]));
            i += 1;
            j += 1;
        } else if suffix[i + 1][j] >= suffix[i][j + 1] {
            out.push(line(DiffLineType::Removed, a[i]));
            i += 1;
        } else {
            out.push(line(DiffLineType::Added, b[j]));
            j += 1;
        }
    }
    out.extend(a[i..].iter().map(|l| line(DiffLineType::Removed, l)));
    out.extend(b[j..].iter().map(|l| line(DiffLineType::Added, l)));
    out
}

/// Count added and removed lines.
pub fn diff_stats(lines: &[DiffLine]) -> DiffStats {
    lines.iter().fold(DiffStats::default(), |mut stats, l| {
        match l.line_type {
            DiffLineType::Added => stats.added += 1,
            DiffLineType::Removed => stats.removed += 1,
            DiffLineType::Unchanged => {}
        }
        stats
    })
}
