//! Ranks and post-processes completion items.
//! Ranking uses an ASCII-ish normalized query (lowercased; `_` removed).
//! Spans are UTF-8 byte offsets; ranges are half-open `[start, end)`.

use std::cmp::Ordering;

use manifest::Span;

use crate::completion::matchers::{FuzzyScore, fuzzy_score, fuzzy_score_cmp, normalize_for_match};
use crate::completion::{CompletionItem, CompletionKind, TextEdit};

fn kind_priority(kind: CompletionKind) -> u8 {
    match kind {
        CompletionKind::EntityType => 0,
        CompletionKind::Metric => 1,
        CompletionKind::Dimension => 2,
        CompletionKind::Card => 3,
        CompletionKind::Relationship => 4,
        CompletionKind::EnumMember => 5,
        CompletionKind::Operator => 6,
        CompletionKind::Placeholder => 7,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MatchClass {
    Exact,
    Prefix,
    Contains { pos: usize },
    Fuzzy(FuzzyScore),
    None,
}

impl MatchClass {
    fn rank(self) -> u8 {
        match self {
            MatchClass::Exact => 0,
            MatchClass::Prefix => 1,
            MatchClass::Contains { .. } => 2,
            MatchClass::Fuzzy(_) => 3,
            MatchClass::None => 4,
        }
    }
}

fn match_class_for_norm_label(query_norm: &str, label_norm: &str) -> MatchClass {
    if label_norm == query_norm {
        return MatchClass::Exact;
    }
    if label_norm.starts_with(query_norm) {
        return MatchClass::Prefix;
    }
    if let Some(pos) = label_norm.find(query_norm) {
        return MatchClass::Contains { pos };
    }
    if let Some(score) = fuzzy_score(query_norm, label_norm) {
        return MatchClass::Fuzzy(score);
    }
    MatchClass::None
}

#[derive(Debug)]
struct RankedItem {
    original_idx: usize,
    label_norm_len: usize,
    class: MatchClass,
    item: CompletionItem,
}

fn cmp_ranked_items(a: &RankedItem, b: &RankedItem) -> Ordering {
    a.class
        .rank()
        .cmp(&b.class.rank())
        .then_with(|| match (a.class, b.class) {
            (MatchClass::Prefix, MatchClass::Prefix) => a.label_norm_len.cmp(&b.label_norm_len),
            (MatchClass::Contains { pos: ap }, MatchClass::Contains { pos: bp }) => ap
                .cmp(&bp)
                .then_with(|| a.label_norm_len.cmp(&b.label_norm_len)),
            (MatchClass::Fuzzy(sa), MatchClass::Fuzzy(sb)) => fuzzy_score_cmp(sa, sb)
                .then_with(|| kind_priority(a.item.kind).cmp(&kind_priority(b.item.kind))),
            _ => Ordering::Equal,
        })
        .then_with(|| a.original_idx.cmp(&b.original_idx))
}

/// Sorts items by match quality against `query` and drops the ones that do not match.
///
/// An empty query keeps the provider's order. A non-ASCII query also keeps it, since
/// normalization only folds ASCII.
pub(crate) fn rank_by_query(query: &str, items: &mut Vec<CompletionItem>) {
    if query.is_empty() || !query.is_ascii() {
        return;
    }
    let query_norm = normalize_for_match(query);
    if query_norm.is_empty() {
        return;
    }

    let mut ranked: Vec<RankedItem> = items
        .drain(..)
        .enumerate()
        .map(|(idx, item)| {
            let label_norm = normalize_for_match(&item.label);
            RankedItem {
                original_idx: idx,
                label_norm_len: label_norm.chars().count(),
                class: match_class_for_norm_label(&query_norm, &label_norm),
                item,
            }
        })
        .filter(|ranked| ranked.class != MatchClass::None)
        .collect();

    ranked.sort_by(cmp_ranked_items);
    *items = ranked.into_iter().map(|ranked| ranked.item).collect();
}

/// Fills in `primary_edit` for each item based on the replace span.
pub(crate) fn attach_primary_edits(replace: Span, items: &mut [CompletionItem]) {
    for item in items {
        item.primary_edit = Some(TextEdit::replace(replace, item.insert_text.clone()));
    }
}

/// Picks the leading items that match `query` strictly (not just fuzzily), up to
/// `preferred_limit`.
pub(crate) fn preferred_indices(
    items: &[CompletionItem],
    query: &str,
    preferred_limit: usize,
) -> Vec<usize> {
    if preferred_limit == 0 || query.is_empty() {
        return Vec::new();
    }

    let query_norm = normalize_for_match(query);
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| {
            matches!(
                match_class_for_norm_label(&query_norm, &normalize_for_match(&item.label)),
                MatchClass::Exact | MatchClass::Prefix | MatchClass::Contains { .. }
            )
        })
        .map(|(idx, _)| idx)
        .take(preferred_limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(labels: &[&str]) -> Vec<CompletionItem> {
        labels
            .iter()
            .map(|label| CompletionItem::new(*label, CompletionKind::EnumMember))
            .collect()
    }

    fn labels(items: &[CompletionItem]) -> Vec<&str> {
        items.iter().map(|item| item.label.as_str()).collect()
    }

    #[test]
    fn exact_then_prefix_then_contains_then_fuzzy() {
        let mut list = items(&["xrunsonx", "r_u_n", "runsOn", "runs", "isRunning"]);
        rank_by_query("runs", &mut list);
        assert_eq!(labels(&list), vec!["runs", "runsOn", "xrunsonx"]);

        let mut list = items(&["isChildOf", "CHILD_OF", "calls"]);
        rank_by_query("chof", &mut list);
        assert_eq!(labels(&list), vec!["CHILD_OF", "isChildOf"]);
    }

    #[test]
    fn empty_query_keeps_order() {
        let mut list = items(&["b", "a"]);
        rank_by_query("", &mut list);
        assert_eq!(labels(&list), vec!["b", "a"]);
    }

    #[test]
    fn preferred_skips_fuzzy_matches() {
        let list = items(&["gauge", "go_gc", "longest"]);
        assert_eq!(preferred_indices(&list, "g", 5), vec![0, 1, 2]);
        assert_eq!(preferred_indices(&list, "gg", 5), Vec::<usize>::new());
        assert_eq!(preferred_indices(&list, "g", 1), vec![0]);
        assert_eq!(preferred_indices(&list, "g", 0), Vec::<usize>::new());
    }
}
