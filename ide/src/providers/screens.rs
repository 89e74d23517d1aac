//! Completions under `screens`.

use manifest::{Value, field_values, seq, str_field};

use super::{Request, retain_unused};
use crate::CompletionDraft;
use crate::completion::{CompletionItem, CompletionKind};

/// Card collections of a screen and the layout `type` of their cards.
const CARD_COLLECTIONS: &[(&str, &str)] = &[
    ("entitiesListCards", "ENTITIES_LIST"),
    ("chartsCards", "CHART_GROUP"),
    ("messageCards", "MESSAGE"),
    ("logsCards", "LOGS"),
    ("eventsCards", "EVENTS"),
    ("metricTableCards", "METRIC_TABLE"),
];

pub(super) fn complete(req: &Request<'_>) -> Option<CompletionDraft> {
    let cursor = req.cursor;
    if cursor.root() != Some("screens") {
        return None;
    }

    let in_layout_cards = cursor.parents_end_with(&["layout", "cards"]);
    let items = match cursor.slot.key {
        "entityType" if cursor.parents.len() == 1 => entity_type_items(req),
        "key" if in_layout_cards => card_key_items(req),
        "type" if in_layout_cards => card_type_items(req),
        "metricSelector" if cursor.parent() == Some("charts") => req
            .tree
            .metric_keys()
            .into_iter()
            .map(|key| CompletionItem::new(key, CompletionKind::Metric))
            .collect(),
        _ => return None,
    };

    Some(CompletionDraft {
        items,
        replace: cursor.value_span(),
    })
}

fn current_screen<'a>(req: &Request<'a>) -> Option<&'a Value> {
    req.tree.screens().get(req.cursor.item_index("screens")?)
}

/// `layout` of the settings section the cursor is in.
fn current_layout<'a>(req: &Request<'a>) -> Option<&'a Value> {
    let settings = ["listSettings", "detailsSettings"]
        .into_iter()
        .find(|settings| req.cursor.has_parent(settings))?;
    Some(&current_screen(req)?[settings]["layout"])
}

/// Topology types no other screen is bound to.
fn entity_type_items(req: &Request<'_>) -> Vec<CompletionItem> {
    let current = req.cursor.item_index("screens");
    let taken: Vec<&str> = req
        .tree
        .screens()
        .iter()
        .enumerate()
        .filter(|(idx, _)| Some(*idx) != current)
        .filter_map(|(_, screen)| str_field(screen, "entityType"))
        .collect();

    let mut items: Vec<CompletionItem> = req
        .tree
        .entity_types()
        .into_iter()
        .map(|name| CompletionItem::new(name, CompletionKind::EntityType))
        .collect();
    retain_unused(&mut items, &taken);
    items
}

/// Cards declared by the screen that its layout does not reference yet. Accepting one also
/// writes its `type:` line under the key.
fn card_key_items(req: &Request<'_>) -> Vec<CompletionItem> {
    let (Some(screen), Some(layout)) = (current_screen(req), current_layout(req)) else {
        return Vec::new();
    };
    let indent = " ".repeat(req.cursor.slot.key_column);

    let mut items = Vec::new();
    for (collection, card_type) in CARD_COLLECTIONS {
        for key in field_values(screen, collection, "key") {
            items.push(
                CompletionItem::new(key, CompletionKind::Card)
                    .with_insert_text(format!("{key}\n{indent}type: {card_type}"))
                    .with_detail(*collection),
            );
        }
    }
    retain_unused(&mut items, &field_values(layout, "cards", "key"));
    items
}

/// Layout card types; only the matching one once the card's key names a declared card.
fn card_type_items(req: &Request<'_>) -> Vec<CompletionItem> {
    let known = current_screen(req)
        .zip(current_layout(req))
        .and_then(|(screen, layout)| {
            let card = seq(&layout["cards"]).get(req.cursor.item_index("cards")?)?;
            let key = str_field(card, "key")?;
            CARD_COLLECTIONS
                .iter()
                .find(|(collection, _)| field_values(screen, collection, "key").contains(&key))
                .map(|(_, card_type)| *card_type)
        });

    CARD_COLLECTIONS
        .iter()
        .map(|(_, card_type)| *card_type)
        .filter(|card_type| known.is_none_or(|known| known == *card_type))
        .map(|card_type| CompletionItem::new(card_type, CompletionKind::EnumMember))
        .collect()
}
