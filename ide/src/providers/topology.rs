//! Completions under `topology`: relationship ends, rule sources, rule dimensions and
//! pattern placeholders.

use manifest::{Value, field_values, seq, str_field};

use super::{Request, retain_unused};
use crate::CompletionDraft;
use crate::completion::{CompletionItem, CompletionKind, entity_type_items, value_items};

const RELATION_TYPES: &[&str] = &[
    "CALLS",
    "CHILD_OF",
    "INSTANCE_OF",
    "PART_OF",
    "RUNS_ON",
    "SAME_AS",
];

const SOURCE_TYPES: &[&str] = &["Metrics", "Logs", "Spans", "Events"];

pub(super) fn complete(req: &Request<'_>) -> Option<CompletionDraft> {
    let cursor = req.cursor;
    if cursor.root() != Some("topology") {
        return None;
    }

    let items = match (cursor.parent()?, cursor.slot.key) {
        ("relationships", "fromType" | "toType") => entity_type_items(req.tree, req.config, ""),
        ("relationships", "typeOfRelation") => {
            value_items(RELATION_TYPES, CompletionKind::EnumMember)
        }
        ("sources", "sourceType") => value_items(SOURCE_TYPES, CompletionKind::EnumMember),
        (section @ ("requiredDimensions" | "attributes"), "key")
            if cursor.parents_end_with(&["rules", section]) =>
        {
            rule_dimension_items(req, section)
        }
        ("rules", "idPattern" | "instanceNamePattern") => return placeholder_draft(req),
        _ => return None,
    };

    Some(CompletionDraft {
        items,
        replace: cursor.value_span(),
    })
}

/// The `topology.types[..].rules[..]` entry owning the cursor line.
fn current_rule<'a>(req: &Request<'a>) -> Option<&'a Value> {
    let ty = req.cursor.item_index("types")?;
    let rule = req.cursor.item_index("rules")?;
    seq(&req.tree.topology_types().get(ty)?["rules"]).get(rule)
}

/// A rule source `condition` on metric keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Condition<'a> {
    Prefix(&'a str),
    Suffix(&'a str),
    Eq(&'a str),
    Contains(&'a str),
}

impl<'a> Condition<'a> {
    fn parse(text: &'a str) -> Option<Self> {
        let (func, arg) = text.trim().strip_prefix('$')?.split_once('(')?;
        let arg = arg.strip_suffix(')')?;
        match func {
            "prefix" => Some(Condition::Prefix(arg)),
            "suffix" => Some(Condition::Suffix(arg)),
            "eq" => Some(Condition::Eq(arg)),
            "contains" => Some(Condition::Contains(arg)),
            _ => None,
        }
    }

    fn matches(self, key: &str) -> bool {
        match self {
            Condition::Prefix(arg) => key.starts_with(arg),
            Condition::Suffix(arg) => key.ends_with(arg),
            Condition::Eq(arg) => key == arg,
            Condition::Contains(arg) => key.contains(arg),
        }
    }
}

/// Dimension keys of the groups feeding the rule, minus the keys `section` already lists.
fn rule_dimension_items(req: &Request<'_>, section: &str) -> Vec<CompletionItem> {
    let rule = current_rule(req);
    let conditions: Vec<Condition<'_>> = rule
        .map(|rule| {
            seq(&rule["sources"])
                .iter()
                .filter_map(|source| str_field(source, "condition"))
                .filter_map(Condition::parse)
                .collect()
        })
        .unwrap_or_default();

    let mut keys: Vec<&str> = Vec::new();
    for group in req.tree.metric_groups() {
        let fed = conditions.is_empty()
            || group
                .metric_keys
                .iter()
                .any(|key| conditions.iter().any(|condition| condition.matches(key)));
        if !fed {
            continue;
        }
        for key in group.dimension_keys {
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
    }

    let mut items: Vec<CompletionItem> = keys
        .into_iter()
        .map(|key| CompletionItem::new(key, CompletionKind::Dimension).with_detail("dimension"))
        .collect();
    if let Some(rule) = rule {
        retain_unused(&mut items, &field_values(rule, section, "key"));
    }
    items
}

/// `{key}` placeholders for the rule's required dimensions. An unclosed `{` before the
/// cursor is replaced; otherwise the placeholder is inserted at the cursor.
fn placeholder_draft(req: &Request<'_>) -> Option<CompletionDraft> {
    let cursor = req.cursor;
    let rule = current_rule(req)?;

    let value = cursor.slot.value;
    let replace = match value.rfind('{') {
        Some(open) if !value[open..].contains('}') => {
            manifest::Span::new(cursor.slot.value_start + open, cursor.cursor())
        }
        _ => cursor.cursor_span(),
    };

    let items = field_values(rule, "requiredDimensions", "key")
        .into_iter()
        .map(|key| {
            CompletionItem::new(format!("{{{key}}}"), CompletionKind::Placeholder)
                .with_detail("required dimension")
        })
        .collect();

    Some(CompletionDraft { items, replace })
}
