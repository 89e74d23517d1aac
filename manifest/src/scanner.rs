//! Line scanning helpers shared by every structural resolver.
//!
//! A line is *significant* if it has content other than spaces and is not a comment.
//! Blank and comment-only lines never take part in nesting decisions.
//! Columns are byte columns from the start of the line.

/// One line of the document together with its byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanLine<'a> {
    /// Zero-based line number.
    pub number: usize,
    /// Byte offset of the first character of the line.
    pub start: usize,
    /// Line content without the terminating `'\n'`.
    pub text: &'a str,
}

impl ScanLine<'_> {
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }

    pub fn indent(&self) -> Option<usize> {
        indent_of(self.text)
    }

    pub fn content_indent(&self) -> Option<usize> {
        content_indent(self.text)
    }

    pub fn marker_indent(&self) -> Option<usize> {
        marker_indent(self.text)
    }

    pub fn is_significant(&self) -> bool {
        self.indent().is_some()
    }
}

/// Splits `text` on `'\n'` and tracks the byte offset of each line.
///
/// A trailing newline produces a final empty line, matching the editor's line count.
pub fn scan_lines(text: &str) -> impl Iterator<Item = ScanLine<'_>> {
    let mut start = 0usize;
    text.split('\n').enumerate().map(move |(number, line)| {
        let scan = ScanLine {
            number,
            start,
            text: line,
        };
        start += line.len() + 1;
        scan
    })
}

/// A line that declares a block (`<label>:`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Declaration {
    pub line: usize,
    /// Column of the label's first character.
    pub indent: usize,
    /// Byte offset of the label's first character.
    pub offset: usize,
}

/// All declarations of `label`, in document order.
pub fn find_declarations(label: &str, text: &str) -> Vec<Declaration> {
    scan_lines(text)
        .filter(|line| declares(line.text, label))
        .filter_map(|line| {
            let indent = content_indent(line.text)?;
            Some(Declaration {
                line: line.number,
                indent,
                offset: line.start + indent,
            })
        })
        .collect()
}

pub fn leading_spaces(line: &str) -> usize {
    line.bytes().take_while(|&b| b == b' ').count()
}

/// Column of the first non-space character, or `None` for blank and comment-only lines.
pub fn indent_of(line: &str) -> Option<usize> {
    let indent = leading_spaces(line);
    match line[indent..].trim_end().chars().next() {
        None | Some('#') => None,
        Some(_) => Some(indent),
    }
}

/// Column of the list marker if the line is a list item (`-` then a space or end of line).
pub fn marker_indent(line: &str) -> Option<usize> {
    let indent = indent_of(line)?;
    is_marker(&line[indent..]).then_some(indent)
}

pub fn is_list_item(line: &str) -> bool {
    marker_indent(line).is_some()
}

/// Column of the first character after any leading `- ` markers.
///
/// A bare marker (`"  -"`) reports the column right after `"- "`.
pub fn content_indent(line: &str) -> Option<usize> {
    let mut col = indent_of(line)?;
    while is_marker(&line[col..]) {
        col += 1;
        col += leading_spaces(&line[col..]);
        if col >= line.trim_end().len() {
            return Some(col.max(line.trim_end().len() + 1));
        }
    }
    Some(col)
}

/// The line's content with leading spaces and list markers removed.
pub fn strip_markers(line: &str) -> &str {
    let mut rest = line.trim_start_matches(' ');
    while is_marker(rest) {
        rest = rest[1..].trim_start_matches(' ');
    }
    rest
}

/// Key text before the first `:`, with list markers and surrounding quotes removed.
pub fn label_of(line: &str) -> Option<&str> {
    let rest = strip_markers(line);
    let (key, _) = rest.split_once(':')?;
    let key = unquote(key.trim());
    (!key.is_empty()).then_some(key)
}

/// `true` if the line opens a `<label>:` block. The key may be quoted, as in [`label_of`].
pub fn declares(line: &str, label: &str) -> bool {
    strip_markers(line)
        .split_once(':')
        .is_some_and(|(key, _)| unquote(key.trim_end()) == label)
}

fn is_marker(rest: &str) -> bool {
    let mut chars = rest.chars();
    chars.next() == Some('-') && matches!(chars.next(), None | Some(' ') | Some('\r'))
}

fn unquote(key: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = key
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    key
}
