//! Structural analysis of Extension 2.0 manifest text.
//!
//! Pipeline: text → scanner → structural resolvers (block index, item ranges, parent chain,
//! block range). The parsed object tree (`ManifestTree`) and its cache sit beside the
//! resolvers; completion code pairs the two.
//! All spans are UTF-8 byte offsets into the original text, using `[start, end)`.
//! UTF-16 conversion for editors happens in `manifest_wasm`.

mod cache;
mod document;
mod error;
pub mod scanner;
mod source_map;
mod span;
pub mod structure;
mod tests;
mod text_edit;

pub use cache::{CachedTree, DocumentCache};
pub use document::{
    DATASOURCES, ManifestTree, MetricGroup, Relationship, field_values, seq, str_field,
};
pub use error::{ManifestError, Result};
pub use source_map::SourceMap;
pub use span::Span;
pub use structure::{
    BlockIndex, ItemRange, block_item_index, block_range, block_range_at, list_item_ranges,
    list_item_ranges_at, parent_blocks,
};
pub use text_edit::TextEdit;

/// `serde_yaml` value type used by [`ManifestTree`].
pub use serde_yaml::Value;
