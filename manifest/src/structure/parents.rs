//! Parent Block Chain Resolver.
//!
//! Nesting is reconstructed with an explicit indentation stack. A significant line opens a
//! frame when it carries a label and the next significant line is indented deeper; frames
//! are closed by any later line at or left of their column. Indents are content columns,
//! so `- name: x` sits at the column of `name`.

use crate::scanner::{ScanLine, indent_of, label_of, leading_spaces, scan_lines, strip_markers};

#[derive(Debug)]
struct Frame<'a> {
    indent: usize,
    label: &'a str,
}

/// Labels of the blocks enclosing `target_line`, outermost first.
///
/// A line starting at column 0 reports just its own label.
pub fn parent_blocks(target_line: usize, text: &str) -> Vec<String> {
    let lines: Vec<ScanLine<'_>> = scan_lines(text).collect();
    let Some(target) = lines.get(target_line) else {
        return Vec::new();
    };

    if indent_of(target.text) == Some(0) {
        let rest = strip_markers(target.text);
        let own = label_of(target.text).unwrap_or_else(|| rest.trim_end());
        return vec![own.to_string()];
    }

    // Blank and comment target lines sit wherever the cursor's indentation puts them.
    let target_indent = target
        .content_indent()
        .unwrap_or_else(|| leading_spaces(target.text));

    let significant: Vec<(&ScanLine<'_>, usize)> = lines[..target_line]
        .iter()
        .filter_map(|line| Some((line, line.content_indent()?)))
        .collect();

    let mut stack: Vec<Frame<'_>> = Vec::new();
    for (pos, &(line, indent)) in significant.iter().enumerate() {
        close_frames(&mut stack, indent);

        let next_indent = significant
            .get(pos + 1)
            .map(|&(_, next)| next)
            .unwrap_or(target_indent);
        if next_indent > indent
            && let Some(label) = label_of(line.text)
        {
            stack.push(Frame { indent, label });
        }
    }
    close_frames(&mut stack, target_indent);

    stack.into_iter().map(|frame| frame.label.to_string()).collect()
}

fn close_frames(stack: &mut Vec<Frame<'_>>, indent: usize) {
    while stack.last().is_some_and(|frame| frame.indent >= indent) {
        stack.pop();
    }
}
