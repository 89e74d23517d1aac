//! Code lenses and selection ranges built on the structural resolvers.

use manifest::scanner::find_declarations;
use manifest::{
    ManifestTree, SourceMap, Span, block_range_at, list_item_ranges_at, parent_blocks, seq,
    str_field,
};

use crate::context::Position;

/// A lens over one metric metadata entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeLens {
    pub span: Span,
    /// Zero-based line the lens sits on.
    pub line: usize,
    pub title: String,
}

/// One lens per item of the top-level `metrics` block, titled with its display name or key.
pub fn metric_code_lenses(text: &str, tree: &ManifestTree) -> Vec<CodeLens> {
    let Some(decl) = find_declarations("metrics", text)
        .into_iter()
        .find(|decl| decl.indent == 0)
    else {
        return Vec::new();
    };

    let map = SourceMap::new(text);
    let metrics = seq(tree.get("metrics"));
    list_item_ranges_at("metrics", decl.line, text)
        .into_iter()
        .filter_map(|item| {
            let metric = metrics.get(item.index)?;
            let title = metric["metadata"]["displayName"]
                .as_str()
                .or_else(|| str_field(metric, "key"))?;
            Some(CodeLens {
                span: item.span,
                line: map.line_index(item.span.start as usize),
                title: title.to_string(),
            })
        })
        .collect()
}

/// Nested spans around `position`, innermost first: the line's content, then for each
/// enclosing block from the inside out the list item holding the line and the whole block.
pub fn selection_ranges(text: &str, position: Position) -> Vec<Span> {
    let map = SourceMap::new(text);
    let line = position.line as usize;
    let (Some(start), Some(line_text)) = (map.line_start(line), map.line_text(line)) else {
        return Vec::new();
    };

    let mut out: Vec<Span> = Vec::new();
    let content = line_text.trim();
    if !content.is_empty() {
        let indent = line_text.len() - line_text.trim_start().len();
        push_enclosing(&mut out, Span::new(start + indent, start + indent + content.len()));
    }

    for label in parent_blocks(line, text).iter().rev() {
        let item = list_item_ranges_at(label, line, text)
            .into_iter()
            .find(|item| item.span.contains(u32::try_from(start).unwrap_or(u32::MAX)));
        if let Some(item) = item {
            push_enclosing(&mut out, item.span);
        }
        if let Some(block) = block_range_at(label, line, text) {
            push_enclosing(&mut out, block);
        }
    }
    out
}

/// Appends `span` if it strictly grows the selection.
fn push_enclosing(out: &mut Vec<Span>, span: Span) {
    match out.last() {
        Some(last) if !span.covers(*last) || span == *last => {}
        _ => out.push(span),
    }
}
