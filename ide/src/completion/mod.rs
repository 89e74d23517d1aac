//! Completion item model for editors.
//! All coordinates are UTF-8 byte offsets into the input `text`.
//! Spans are half-open ranges `[start, end)`.

use manifest::Span;

pub use crate::TextEdit;

mod items;
mod matchers;
mod ranking;

pub use items::BUILTIN_ENTITY_TYPES;
pub(crate) use items::{entity_type_items, value_items};
pub(crate) use ranking::{attach_primary_edits, preferred_indices, rank_by_query};

/// Default for `CompletionConfig.preferred_limit`.
pub const DEFAULT_PREFERRED_LIMIT: usize = 5;

/// Configuration knobs for `complete`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionConfig {
    /// Max length of `CompletionOutput.preferred_indices` (0 disables it).
    pub preferred_limit: usize,
    /// Offer the platform's built-in entity types next to the extension's own.
    pub builtin_entity_types: bool,
    /// Keep follow-up [`Command`]s on items that open a new completion slot.
    pub retrigger_suggest: bool,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            preferred_limit: DEFAULT_PREFERRED_LIMIT,
            builtin_entity_types: true,
            retrigger_suggest: true,
        }
    }
}

/// Result of a completion query.
///
/// `replace` and all edit ranges are UTF-8 byte spans, half-open `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionOutput {
    pub items: Vec<CompletionItem>,
    pub replace: Span,
    /// Indices into `items` for the UI default selection.
    pub preferred_indices: Vec<usize>,
}

impl CompletionOutput {
    pub(crate) fn empty(cursor: usize) -> Self {
        Self {
            items: Vec::new(),
            replace: Span::empty(cursor),
            preferred_indices: Vec::new(),
        }
    }
}

/// One completion candidate for an editor UI.
///
/// Use [`CompletionItem::new`] to construct with sensible defaults, then chain
/// builder methods (`.with_detail()`, `.with_command()`, etc.) to customise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionItem {
    pub label: String,
    pub kind: CompletionKind,
    pub insert_text: String,
    pub primary_edit: Option<TextEdit>,
    pub detail: Option<String>,
    /// Editor command to run after the item is accepted.
    pub command: Option<Command>,
}

impl CompletionItem {
    /// Creates a new completion item with the given label and kind.
    ///
    /// `insert_text` defaults to a clone of `label`.
    pub fn new(label: impl Into<String>, kind: CompletionKind) -> Self {
        let label = label.into();
        Self {
            insert_text: label.clone(),
            label,
            kind,
            primary_edit: None,
            detail: None,
            command: None,
        }
    }

    pub fn with_insert_text(mut self, text: impl Into<String>) -> Self {
        self.insert_text = text.into();
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_command(mut self, command: Command) -> Self {
        self.command = Some(command);
        self
    }
}

/// High-level bucket for UI grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionKind {
    EntityType,
    Relationship,
    EnumMember,
    Operator,
    Placeholder,
    Metric,
    Dimension,
    Card,
}

/// Follow-up editor commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Open the suggestion widget again at the new cursor.
    TriggerSuggest,
}

impl Command {
    pub fn id(self) -> &'static str {
        match self {
            Command::TriggerSuggest => "editor.action.triggerSuggest",
        }
    }
}
