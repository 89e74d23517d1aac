//! Completion providers, one per manifest section.
//!
//! A provider returns `None` when the cursor is outside its section. The session runs them in
//! [`PROVIDERS`] order and keeps the first draft with items.

use manifest::ManifestTree;

use crate::completion::CompletionConfig;
use crate::context::CursorContext;
use crate::{CompletionDraft, Context};

mod entity_selector;
mod prometheus;
mod screens;
mod topology;

pub(crate) struct Request<'a> {
    pub(crate) cursor: &'a CursorContext<'a>,
    pub(crate) tree: &'a ManifestTree,
    pub(crate) ctx: &'a Context,
    pub(crate) config: &'a CompletionConfig,
}

pub(crate) struct Provider {
    pub(crate) name: &'static str,
    pub(crate) complete: fn(&Request<'_>) -> Option<CompletionDraft>,
}

pub(crate) const PROVIDERS: &[Provider] = &[
    Provider {
        name: "topology",
        complete: topology::complete,
    },
    Provider {
        name: "entity_selector",
        complete: entity_selector::complete,
    },
    Provider {
        name: "screens",
        complete: screens::complete,
    },
    Provider {
        name: "prometheus",
        complete: prometheus::complete,
    },
];

/// Drops items whose label is in `taken`.
pub(crate) fn retain_unused<T: AsRef<str>>(
    items: &mut Vec<crate::CompletionItem>,
    taken: &[T],
) {
    items.retain(|item| !taken.iter().any(|used| used.as_ref() == item.label));
}
