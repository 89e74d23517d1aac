//! Query normalization and fuzzy matching for completion labels.
//!
//! A query fuzzily matches a label if every query character appears in the label in order.
//! Matching is ASCII-case-insensitive; callers normalize both sides first.

use std::cmp::Ordering;

/// Heuristic metrics for ranking a subsequence match (better = ranks earlier).
///
/// - `gap_sum`: skipped characters between matched characters (smaller is better).
/// - `max_run`: longest run of consecutive matched characters (larger is better).
/// - `first_pos`: index of the first matched character (smaller is better).
/// - `label_len`: label length in chars, a mild tie-breaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct FuzzyScore {
    pub(super) gap_sum: usize,
    pub(super) max_run: usize,
    pub(super) first_pos: usize,
    pub(super) label_len: usize,
}

/// Greedy subsequence match of `query` against `label`; `None` if some character is missing.
pub(super) fn fuzzy_score(query: &str, label: &str) -> Option<FuzzyScore> {
    if query.is_empty() || label.is_empty() {
        return None;
    }

    let label_chars: Vec<char> = label.chars().collect();
    let mut positions = Vec::new();
    let mut next = 0usize;
    for qc in query.chars() {
        let found = label_chars[next..].iter().position(|&lc| lc == qc)?;
        positions.push(next + found);
        next += found + 1;
    }

    let mut gap_sum = 0usize;
    let mut max_run = 1usize;
    let mut run = 1usize;
    for pair in positions.windows(2) {
        if pair[1] == pair[0] + 1 {
            run += 1;
            max_run = max_run.max(run);
        } else {
            run = 1;
            gap_sum += pair[1] - pair[0] - 1;
        }
    }

    Some(FuzzyScore {
        gap_sum,
        max_run,
        first_pos: positions.first().copied().unwrap_or(0),
        label_len: label_chars.len(),
    })
}

/// Orders fuzzy scores from best to worst: gaps, run, first position, then length.
pub(super) fn fuzzy_score_cmp(a: FuzzyScore, b: FuzzyScore) -> Ordering {
    a.gap_sum
        .cmp(&b.gap_sum)
        .then_with(|| b.max_run.cmp(&a.max_run))
        .then_with(|| a.first_pos.cmp(&b.first_pos))
        .then_with(|| a.label_len.cmp(&b.label_len))
}

/// Lowercases ASCII and removes `_`.
pub(super) fn normalize_for_match(s: &str) -> String {
    s.chars()
        .filter(|c| *c != '_')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
