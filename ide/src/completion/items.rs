//! Item builders shared by several providers.

use manifest::ManifestTree;

use crate::completion::{CompletionConfig, CompletionItem, CompletionKind};

/// Platform entity types a topology may relate to without declaring them.
pub const BUILTIN_ENTITY_TYPES: &[&str] = &[
    "dt.entity.host",
    "dt.entity.process_group",
    "dt.entity.process_group_instance",
    "dt.entity.service",
    "dt.entity.application",
    "dt.entity.custom_device",
    "dt.entity.custom_device_group",
    "dt.entity.kubernetes_cluster",
    "dt.entity.cloud_application",
    "dt.entity.cloud_application_namespace",
];

/// Topology types of `tree`, then the built-ins when enabled. `suffix` is appended to the
/// insert text.
pub(crate) fn entity_type_items(
    tree: &ManifestTree,
    config: &CompletionConfig,
    suffix: &str,
) -> Vec<CompletionItem> {
    let mut items: Vec<CompletionItem> = tree
        .entity_types()
        .into_iter()
        .map(|name| {
            CompletionItem::new(name, CompletionKind::EntityType)
                .with_insert_text(format!("{name}{suffix}"))
                .with_detail("topology type")
        })
        .collect();

    if config.builtin_entity_types {
        for name in BUILTIN_ENTITY_TYPES {
            if items.iter().any(|item| item.label == *name) {
                continue;
            }
            items.push(
                CompletionItem::new(*name, CompletionKind::EntityType)
                    .with_insert_text(format!("{name}{suffix}"))
                    .with_detail("built-in type"),
            );
        }
    }
    items
}

/// One item per fixed value.
pub(crate) fn value_items(values: &[&str], kind: CompletionKind) -> Vec<CompletionItem> {
    values
        .iter()
        .map(|value| CompletionItem::new(*value, kind))
        .collect()
}
