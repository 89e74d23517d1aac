//! Completions inside entity selector values (`entitySelectorTemplate`, `entitySelector`).
//!
//! Only the tail of the typed fragment matters: the innermost open call or the last `,`
//! decides what is being typed.

use manifest::Span;

use super::Request;
use crate::CompletionDraft;
use crate::completion::{Command, CompletionItem, CompletionKind, entity_type_items};

const SELECTOR_KEYS: &[&str] = &["entitySelectorTemplate", "entitySelector"];

/// `typeOfRelation` values and their selector spelling.
const RELATIONSHIP_NAMES: &[(&str, &str)] = &[
    ("CALLS", "calls"),
    ("CHILD_OF", "isChildOf"),
    ("INSTANCE_OF", "isInstanceOf"),
    ("PART_OF", "isPartOf"),
    ("RUNS_ON", "runsOn"),
    ("SAME_AS", "isSameAs"),
];

const HEALTH_STATES: &[&str] = &["HEALTHY", "UNHEALTHY"];

/// Placeholder the platform expands with the card's own entity conditions.
const ENTITY_CONDITIONS: &str = "$(entityConditions)";

struct Operator {
    label: &'static str,
    /// At most one per selector scope.
    single_use: bool,
}

impl Operator {
    const fn once(label: &'static str) -> Self {
        Self {
            label,
            single_use: true,
        }
    }

    const fn repeated(label: &'static str) -> Self {
        Self {
            label,
            single_use: false,
        }
    }
}

const OPERATORS: &[Operator] = &[
    Operator::once("type("),
    Operator::repeated("entityId("),
    Operator::once("entityName("),
    Operator::once("entityName.equals("),
    Operator::once("entityName.startsWith("),
    Operator::once("entityName.contains("),
    Operator::repeated("tag("),
    Operator::repeated("mzId("),
    Operator::repeated("mzName("),
    Operator::once("healthState("),
    Operator::repeated("fromRelationships."),
    Operator::repeated("toRelationships."),
    Operator::repeated("not("),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    EntityType,
    Relationship { outgoing: bool },
    HealthState,
    Operator,
}

pub(super) fn complete(req: &Request<'_>) -> Option<CompletionDraft> {
    let cursor = req.cursor;
    if !SELECTOR_KEYS.contains(&cursor.slot.key) {
        return None;
    }

    let fragment = cursor.slot.value;
    let (slot, query_start) = analyze(fragment)?;
    let closing = if cursor.line_suffix.starts_with(')') { "" } else { ")" };

    let items = match slot {
        Slot::EntityType => entity_type_items(req.tree, req.config, closing),
        Slot::Relationship { outgoing } => relationship_items(req, fragment, outgoing),
        Slot::HealthState => HEALTH_STATES
            .iter()
            .map(|state| {
                CompletionItem::new(*state, CompletionKind::EnumMember)
                    .with_insert_text(format!("{state}{closing}"))
            })
            .collect(),
        Slot::Operator => {
            let head = &fragment[..query_start];
            operator_items(&scope_text(head), cursor.has_parent("entitiesListCards"))
        }
    };

    Some(CompletionDraft {
        items,
        replace: Span::new(cursor.slot.value_start + query_start, cursor.cursor()),
    })
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | ':' | '-' | '$')
}

/// What is being typed at the end of `fragment`, and where its text starts.
fn analyze(fragment: &str) -> Option<(Slot, usize)> {
    for (prefix, outgoing) in [("fromRelationships.", true), ("toRelationships.", false)] {
        if let Some(pos) = fragment.rfind(prefix) {
            let start = pos + prefix.len();
            if fragment[start..].chars().all(|c| c.is_ascii_alphanumeric()) {
                return Some((Slot::Relationship { outgoing }, start));
            }
        }
    }

    let word_len: usize = fragment
        .chars()
        .rev()
        .take_while(|&c| is_word_char(c))
        .map(char::len_utf8)
        .sum();
    let start = fragment.len() - word_len;

    let before = fragment[..start].trim_end();
    if before.is_empty() || before.ends_with(',') {
        return Some((Slot::Operator, start));
    }

    let callee = before.strip_suffix('(')?;
    let callee_len: usize = callee
        .chars()
        .rev()
        .take_while(|&c| c.is_ascii_alphanumeric() || c == '.')
        .map(char::len_utf8)
        .sum();
    let slot = match &callee[callee.len() - callee_len..] {
        "type" => Slot::EntityType,
        "healthState" => Slot::HealthState,
        "not" => Slot::Operator,
        name if name.starts_with("fromRelationships.") || name.starts_with("toRelationships.") => {
            Slot::Operator
        }
        _ => return None,
    };
    Some((slot, start))
}

/// Start of the innermost selector still open in `head`: after its unclosed `(`, or 0.
fn scope_start(head: &str) -> usize {
    let mut open: Vec<usize> = Vec::new();
    for (idx, c) in head.char_indices() {
        match c {
            '(' => open.push(idx + 1),
            ')' => {
                open.pop();
            }
            _ => {}
        }
    }
    open.last().copied().unwrap_or(0)
}

/// Top-level text of the innermost open selector in `head`.
///
/// Closed calls keep their parentheses but lose their arguments, so `type(a),runsOn(type(b))`
/// reads as `type(),runsOn()`. The `$(entityConditions)` placeholder is kept whole.
fn scope_text(head: &str) -> String {
    let mut rest = &head[scope_start(head)..];
    let mut out = String::with_capacity(rest.len());
    let mut depth = 0usize;
    while let Some(c) = rest.chars().next() {
        if depth == 0 && rest.starts_with(ENTITY_CONDITIONS) {
            out.push_str(ENTITY_CONDITIONS);
            rest = &rest[ENTITY_CONDITIONS.len()..];
            continue;
        }
        match c {
            '(' => {
                if depth == 0 {
                    out.push(c);
                }
                depth += 1;
            }
            ')' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    out.push(c);
                }
            }
            _ if depth == 0 => out.push(c),
            _ => {}
        }
        rest = &rest[c.len_utf8()..];
    }
    out
}

/// Argument of the `type(...)` of the innermost open selector.
fn selected_type(fragment: &str) -> Option<&str> {
    let scope = &fragment[scope_start(fragment)..];
    let mut depth = 0usize;
    for (idx, c) in scope.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            't' if depth == 0 && scope[idx..].starts_with("type(") => {
                let preceded_by_word = scope[..idx]
                    .chars()
                    .next_back()
                    .is_some_and(|p| p.is_ascii_alphanumeric() || p == '.');
                if preceded_by_word {
                    continue;
                }
                let rest = &scope[idx + "type(".len()..];
                let end = rest.find([')', ',']).unwrap_or(rest.len());
                let name = rest[..end].trim().trim_matches('"');
                return (!name.is_empty()).then_some(name);
            }
            _ => {}
        }
    }
    None
}

fn relationship_items(req: &Request<'_>, fragment: &str, outgoing: bool) -> Vec<CompletionItem> {
    let selected = selected_type(fragment);
    let mut items: Vec<CompletionItem> = Vec::new();

    for rel in req.tree.relationships() {
        let side = if outgoing { rel.from_type } else { rel.to_type };
        if selected.is_some_and(|ty| ty != side) {
            continue;
        }
        let Some((_, name)) = RELATIONSHIP_NAMES
            .iter()
            .find(|(relation, _)| *relation == rel.type_of_relation)
        else {
            continue;
        };
        if items.iter().any(|item| item.label == *name) {
            continue;
        }
        items.push(
            CompletionItem::new(*name, CompletionKind::Relationship)
                .with_insert_text(format!("{name}("))
                .with_detail(format!("{} to {}", rel.from_type, rel.to_type))
                .with_command(Command::TriggerSuggest),
        );
    }
    items
}

/// Operators for a selector scope; `scope` is what the scope already contains.
fn operator_items(scope: &str, in_list_card: bool) -> Vec<CompletionItem> {
    let mut items: Vec<CompletionItem> = OPERATORS
        .iter()
        .filter(|op| !(op.single_use && scope.contains(op.label)))
        .map(|op| {
            let item = CompletionItem::new(op.label, CompletionKind::Operator);
            if op.label.ends_with('.') {
                item.with_command(Command::TriggerSuggest)
            } else {
                item
            }
        })
        .collect();

    if in_list_card && !scope.contains(ENTITY_CONDITIONS) {
        items.push(CompletionItem::new(ENTITY_CONDITIONS, CompletionKind::Placeholder));
    }
    items
}
