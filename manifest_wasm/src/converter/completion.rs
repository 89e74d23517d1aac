use crate::converter::Converter;
use crate::converter::structure::span_dto;
use crate::dto::v1::{CompletionItem, CompletionItemKind, CompletionResult, TextEdit};
use crate::offsets::byte_offset_to_utf16_offset;

impl Converter {
    pub fn completion_output_view(source: &str, output: &ide::CompletionOutput) -> CompletionResult {
        CompletionResult {
            items: output
                .items
                .iter()
                .map(|item| completion_item_view(source, item))
                .collect(),
            replace: span_dto(source, output.replace),
            preferred_indices: output.preferred_indices.clone(),
        }
    }
}

fn completion_item_view(source: &str, item: &ide::CompletionItem) -> CompletionItem {
    let primary_edit = item.primary_edit.as_ref().map(|edit| TextEdit {
        range: span_dto(source, edit.range),
        new_text: edit.new_text.clone(),
    });

    // The cursor lands after the inserted text, measured in the updated document.
    let cursor = item.primary_edit.as_ref().and_then(|edit| {
        let updated = edit.apply(source)?;
        let cursor_byte = (edit.range.start as usize + edit.new_text.len()).min(updated.len());
        Some(byte_offset_to_utf16_offset(&updated, cursor_byte))
    });

    CompletionItem {
        label: item.label.clone(),
        kind: completion_kind_view(item.kind),
        insert_text: item.insert_text.clone(),
        primary_edit,
        cursor,
        detail: item.detail.clone(),
        command: item.command.map(|command| command.id().to_string()),
    }
}

fn completion_kind_view(kind: ide::CompletionKind) -> CompletionItemKind {
    use ide::CompletionKind::*;
    match kind {
        EntityType => CompletionItemKind::EntityType,
        Relationship => CompletionItemKind::Relationship,
        EnumMember => CompletionItemKind::EnumMember,
        Operator => CompletionItemKind::Operator,
        Placeholder => CompletionItemKind::Placeholder,
        Metric => CompletionItemKind::Metric,
        Dimension => CompletionItemKind::Dimension,
        Card => CompletionItemKind::Card,
    }
}
