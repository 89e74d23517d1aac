use crate::span::Span;

/// A single text edit in byte offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub range: Span,
    pub new_text: String,
}

impl TextEdit {
    pub fn replace(range: Span, new_text: impl Into<String>) -> Self {
        Self {
            range,
            new_text: new_text.into(),
        }
    }

    /// Applies the edit to `source`. Out-of-range or non-boundary spans yield `None`.
    pub fn apply(&self, source: &str) -> Option<String> {
        let start = self.range.start as usize;
        let end = self.range.end as usize;
        if start > end || !source.is_char_boundary(start) || !source.is_char_boundary(end) {
            return None;
        }
        let mut out = String::with_capacity(source.len() - (end - start) + self.new_text.len());
        out.push_str(&source[..start]);
        out.push_str(&self.new_text);
        out.push_str(&source[end..]);
        Some(out)
    }
}
