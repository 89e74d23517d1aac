//! List Item Range Resolver: byte ranges of every item of a labelled block.

use crate::scanner::{ScanLine, declares, scan_lines};
use crate::span::Span;

/// One list item of a block. `span` covers the item line and all of its sub-lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemRange {
    pub index: usize,
    pub span: Span,
}

/// Item ranges of the first `label` block in `text`.
pub fn list_item_ranges(label: &str, text: &str) -> Vec<ItemRange> {
    let lines: Vec<ScanLine<'_>> = scan_lines(text).collect();
    match lines.iter().position(|line| declares(line.text, label)) {
        Some(decl) => ranges_after(&lines, decl, text.len()),
        None => Vec::new(),
    }
}

/// Item ranges of the `label` block governing `line`: the most recent declaration at or
/// before it.
pub fn list_item_ranges_at(label: &str, line: usize, text: &str) -> Vec<ItemRange> {
    let lines: Vec<ScanLine<'_>> = scan_lines(text).collect();
    let last = line.min(lines.len().saturating_sub(1));
    match lines[..=last]
        .iter()
        .rposition(|scan| declares(scan.text, label))
    {
        Some(decl) => ranges_after(&lines, decl, text.len()),
        None => Vec::new(),
    }
}

fn ranges_after(lines: &[ScanLine<'_>], decl: usize, text_len: usize) -> Vec<ItemRange> {
    let label_indent = lines[decl].content_indent().unwrap_or(0);
    let mut column: Option<usize> = None;
    let mut starts: Vec<usize> = Vec::new();
    let mut end = text_len;

    for line in &lines[decl + 1..] {
        let Some(indent) = line.indent() else {
            continue;
        };
        let marker = line.marker_indent();

        let Some(col) = column else {
            match marker {
                Some(m) if m >= label_indent => {
                    column = Some(m);
                    starts.push(line.start);
                    continue;
                }
                _ => return Vec::new(),
            }
        };

        if indent < col || (indent == col && marker.is_none()) {
            end = line.start;
            break;
        }
        if marker == Some(col) {
            starts.push(line.start);
        }
    }

    starts
        .iter()
        .enumerate()
        .map(|(index, &start)| {
            let item_end = starts.get(index + 1).copied().unwrap_or(end);
            ItemRange {
                index,
                span: Span::new(start, item_end),
            }
        })
        .collect()
}
