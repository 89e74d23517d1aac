//! Cursor-context detection shared by the completion providers.
//! All coordinates are UTF-8 byte offsets into the original text.

use manifest::{BlockIndex, SourceMap, Span, block_item_index, parent_blocks};

/// Zero-based line and UTF-8 byte column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// `key: value` under the cursor, split at the first `": "` after any list markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ValueSlot<'a> {
    pub(crate) key: &'a str,
    /// Column of the key's first character.
    pub(crate) key_column: usize,
    /// Value text typed before the cursor, without an opening quote.
    pub(crate) value: &'a str,
    /// Byte offset of `value` in the document.
    pub(crate) value_start: usize,
}

/// Everything the providers know about the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CursorContext<'a> {
    pub(crate) text: &'a str,
    pub(crate) line: usize,
    /// Rest of the line after the cursor.
    pub(crate) line_suffix: &'a str,
    pub(crate) parents: Vec<String>,
    pub(crate) slot: ValueSlot<'a>,
}

impl CursorContext<'_> {
    pub(crate) fn cursor(&self) -> usize {
        self.slot.value_start + self.slot.value.len()
    }

    pub(crate) fn root(&self) -> Option<&str> {
        self.parents.first().map(String::as_str)
    }

    pub(crate) fn parent(&self) -> Option<&str> {
        self.parents.last().map(String::as_str)
    }

    pub(crate) fn has_parent(&self, label: &str) -> bool {
        self.parents.iter().any(|parent| parent == label)
    }

    /// `true` if the chain ends with `labels`, innermost last.
    pub(crate) fn parents_end_with(&self, labels: &[&str]) -> bool {
        self.parents.len() >= labels.len()
            && self.parents[self.parents.len() - labels.len()..]
                .iter()
                .zip(labels)
                .all(|(parent, label)| parent == label)
    }

    /// Item of the governing `label` block that owns the cursor line.
    pub(crate) fn item_index(&self, label: &str) -> Option<usize> {
        match block_item_index(label, self.line, self.text) {
            BlockIndex::Item(index) => Some(index),
            BlockIndex::NotFound | BlockIndex::BeforeFirstItem => None,
        }
    }

    /// Span of the whole typed value, up to the cursor.
    pub(crate) fn value_span(&self) -> Span {
        Span::new(self.slot.value_start, self.cursor())
    }

    /// Empty span at the cursor.
    pub(crate) fn cursor_span(&self) -> Span {
        Span::empty(self.cursor())
    }
}

/// Byte offset of `position`, clamped into the document.
pub(crate) fn cursor_offset(text: &str, position: Position) -> usize {
    SourceMap::new(text).offset(position.line as usize, position.character as usize)
}

/// Builds the cursor context, or `None` when the cursor is not in a value slot.
pub(crate) fn detect_cursor_context(text: &str, position: Position) -> Option<CursorContext<'_>> {
    let map = SourceMap::new(text);
    let line = position.line as usize;
    let line_start = map.line_start(line)?;
    let line_text = map.line_text(line)?;
    let cursor = map.offset(line, position.character as usize);
    let column = cursor.saturating_sub(line_start).min(line_text.len());

    let prefix = &line_text[..column];
    let slot = value_slot(prefix, line_start)?;

    Some(CursorContext {
        text,
        line,
        line_suffix: &line_text[column..],
        parents: parent_blocks(line, text),
        slot,
    })
}

fn value_slot(prefix: &str, line_start: usize) -> Option<ValueSlot<'_>> {
    let mut rest = prefix.trim_start_matches(' ');
    while let Some(after) = rest.strip_prefix("- ") {
        rest = after.trim_start_matches(' ');
    }
    let key_column = prefix.len() - rest.len();

    let colon = rest.find(": ")?;
    let key = rest[..colon].trim_matches(|c| c == '"' || c == '\'');
    if key.is_empty() || key.contains(' ') {
        return None;
    }

    let mut value_column = key_column + colon + 2;
    value_column += prefix[value_column..].len() - prefix[value_column..].trim_start().len();
    if prefix[value_column..].starts_with(['"', '\'']) {
        value_column += 1;
    }

    Some(ValueSlot {
        key,
        key_column,
        value: &prefix[value_column..],
        value_start: line_start + value_column,
    })
}

/// Text under `replace`, the query items are ranked against.
pub(crate) fn query_for_replace(text: &str, replace: Span) -> String {
    text.get(replace.start as usize..replace.end as usize)
        .unwrap_or_default()
        .to_string()
}
