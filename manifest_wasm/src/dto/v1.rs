use serde::Serialize;
use ts_rs::TS;

/// JS/editor-facing span in UTF-16 code units.
///
/// Ranges are half-open `[start, end)`; `end` is exclusive.
#[derive(Serialize, TS, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

#[derive(Serialize, TS, Clone, Debug, PartialEq, Eq)]
pub struct TextEdit {
    pub range: Span,
    pub new_text: String,
}

#[derive(Serialize, TS, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompletionItemKind {
    EntityType,
    Relationship,
    EnumMember,
    Operator,
    Placeholder,
    Metric,
    Dimension,
    Card,
}

#[derive(Serialize, TS, Clone, Debug, PartialEq, Eq)]
pub struct CompletionItem {
    pub label: String,
    pub kind: CompletionItemKind,
    pub insert_text: String,
    pub primary_edit: Option<TextEdit>,
    /// Cursor position in the updated document after applying `primary_edit`.
    pub cursor: Option<u32>,
    pub detail: Option<String>,
    /// Editor command id to run after accepting the item.
    pub command: Option<String>,
}

#[derive(Serialize, TS, Clone, Debug, PartialEq, Eq)]
pub struct CompletionResult {
    pub items: Vec<CompletionItem>,
    pub replace: Span,
    pub preferred_indices: Vec<usize>,
}

#[derive(Serialize, TS, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ItemRange {
    pub index: usize,
    pub span: Span,
}

#[derive(Serialize, TS, Clone, Debug, PartialEq, Eq)]
pub struct CodeLens {
    pub span: Span,
    /// Zero-based line.
    pub line: usize,
    pub title: String,
}

#[derive(Serialize, TS, Clone, Copy, Debug, PartialEq, Eq)]
pub enum MetricKind {
    #[serde(rename = "counter")]
    Counter,
    #[serde(rename = "gauge")]
    Gauge,
    #[serde(rename = "histogram")]
    Histogram,
    #[serde(rename = "summary")]
    Summary,
    #[serde(rename = "untyped")]
    Untyped,
}

#[derive(Serialize, TS, Clone, Debug, PartialEq, Eq)]
pub struct ScrapedMetric {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: MetricKind,
    pub help: Option<String>,
    pub labels: Vec<String>,
}

/// Host-side view of the parsed Prometheus metadata, families sorted by name.
#[derive(Serialize, TS, Clone, Debug, PartialEq, Eq)]
pub struct PrometheusResult {
    pub metrics: Vec<ScrapedMetric>,
}

#[derive(Serialize, TS, Clone, Copy, Debug, PartialEq, Eq)]
pub struct UpdateResult {
    pub version: i32,
    /// `true` if this version did not parse and completion runs on an older tree.
    pub stale: bool,
}
