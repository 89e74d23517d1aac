//! IDE helpers for manifest editing.
//!
//! Coordinates are UTF-8 byte offsets (`[start, end)`), matching `manifest`.

mod completion;
mod context;
mod navigation;
mod prometheus;
mod providers;

use manifest::{ManifestTree, Span};

pub use completion::{
    BUILTIN_ENTITY_TYPES, Command, CompletionConfig, CompletionItem, CompletionKind,
    CompletionOutput, DEFAULT_PREFERRED_LIMIT,
};
pub use context::Position;
pub use manifest::TextEdit;
pub use navigation::{CodeLens, metric_code_lenses, selection_ranges};
pub use prometheus::{MetricKind, PrometheusData, ScrapedMetric};

/// Host-supplied data the providers draw on besides the manifest itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    /// Metrics scraped from a Prometheus endpoint; the Prometheus provider is silent without it.
    pub prometheus: Option<PrometheusData>,
}

/// Compute completion items at `position`.
///
/// `tree` is the last parsed object tree for `text`; pass `ManifestTree::default()` if the
/// document never parsed.
pub fn complete(
    text: &str,
    position: Position,
    tree: &ManifestTree,
    ctx: &Context,
    config: CompletionConfig,
) -> CompletionOutput {
    CompletionSession::new(text, position, tree, ctx, config).run()
}

struct CompletionSession<'a> {
    text: &'a str,
    position: Position,
    tree: &'a ManifestTree,
    ctx: &'a Context,
    config: CompletionConfig,
}

pub(crate) struct CompletionDraft {
    pub(crate) items: Vec<CompletionItem>,
    pub(crate) replace: Span,
}

impl<'a> CompletionSession<'a> {
    fn new(
        text: &'a str,
        position: Position,
        tree: &'a ManifestTree,
        ctx: &'a Context,
        config: CompletionConfig,
    ) -> Self {
        Self {
            text,
            position,
            tree,
            ctx,
            config,
        }
    }

    fn run(self) -> CompletionOutput {
        // 1) Locate the value slot and the parent chain at the cursor.
        let Some(cursor_ctx) = context::detect_cursor_context(self.text, self.position) else {
            return CompletionOutput::empty(context::cursor_offset(self.text, self.position));
        };

        // 2) Ask the providers in order; the first with items wins.
        let draft = self.build_completion_draft(&cursor_ctx);

        // 3) Rank by the query under the replace span (sort + filter).
        let mut items = draft.items;
        let query = context::query_for_replace(self.text, draft.replace);
        completion::rank_by_query(&query, &mut items);

        // 4) Attach primary edits and follow-up commands.
        completion::attach_primary_edits(draft.replace, &mut items);
        if !self.config.retrigger_suggest {
            for item in &mut items {
                item.command = None;
            }
        }

        // 5) Pick preferred indices.
        let preferred_indices =
            completion::preferred_indices(&items, &query, self.config.preferred_limit);

        CompletionOutput {
            items,
            replace: draft.replace,
            preferred_indices,
        }
    }

    fn build_completion_draft(&self, cursor_ctx: &context::CursorContext<'_>) -> CompletionDraft {
        let request = providers::Request {
            cursor: cursor_ctx,
            tree: self.tree,
            ctx: self.ctx,
            config: &self.config,
        };

        for provider in providers::PROVIDERS {
            let Some(draft) = (provider.complete)(&request) else {
                continue;
            };
            if draft.items.is_empty() {
                continue;
            }
            tracing::debug!(
                provider = provider.name,
                key = cursor_ctx.slot.key,
                items = draft.items.len(),
                "completion provider matched"
            );
            return draft;
        }

        tracing::debug!(key = cursor_ctx.slot.key, "no completion provider matched");
        CompletionDraft {
            items: Vec::new(),
            replace: Span::empty(cursor_ctx.cursor()),
        }
    }
}

#[cfg(test)]
mod tests;
