//! Block Range Resolver: byte range of a whole labelled block.

use crate::scanner::{ScanLine, declares, scan_lines};
use crate::span::Span;

/// Range of the first `label` block, from the label to the line that ends the block.
///
/// Without a terminating line the range ends at `text.len()`.
pub fn block_range(label: &str, text: &str) -> Option<Span> {
    let lines: Vec<ScanLine<'_>> = scan_lines(text).collect();
    let decl = lines.iter().position(|line| declares(line.text, label))?;
    Some(range_from(&lines, decl, text.len()))
}

/// Range of the innermost `label` block that contains `line`.
pub fn block_range_at(label: &str, line: usize, text: &str) -> Option<Span> {
    let lines: Vec<ScanLine<'_>> = scan_lines(text).collect();
    let target = lines.get(line)?;

    lines[..=line]
        .iter()
        .enumerate()
        .rev()
        .filter(|(_, scan)| declares(scan.text, label))
        .map(|(decl, _)| (decl, range_from(&lines, decl, text.len())))
        .find(|&(decl, span)| decl == line || span.end as usize > target.start)
        .map(|(_, span)| span)
}

fn range_from(lines: &[ScanLine<'_>], decl: usize, text_len: usize) -> Span {
    let declaration = &lines[decl];
    let label_indent = declaration.content_indent().unwrap_or(0);
    let start = declaration.start + label_indent;

    for line in &lines[decl + 1..] {
        let Some(indent) = line.indent() else {
            continue;
        };
        if indent < label_indent || (indent == label_indent && line.marker_indent().is_none()) {
            return Span::new(start, line.start);
        }
    }

    Span::new(start, text_len)
}
