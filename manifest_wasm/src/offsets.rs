//! JS/editor boundary uses UTF-16 code units (VS Code positions).
//! Ranges are half-open `[start, end)`; `end` is exclusive.

use ide::Position;
use manifest::SourceMap;

pub fn utf16_offset_to_byte(source: &str, utf16: usize) -> usize {
    if utf16 == 0 {
        return 0;
    }

    let mut u16_count = 0usize;
    for (byte_idx, ch) in source.char_indices() {
        if u16_count >= utf16 {
            return byte_idx;
        }
        u16_count += ch.len_utf16();
    }

    source.len()
}

pub fn byte_offset_to_utf16_offset(source: &str, byte: usize) -> u32 {
    let byte = byte.min(source.len());
    let prefix = source.get(..byte).unwrap_or(source);
    u32::try_from(prefix.encode_utf16().count()).unwrap_or(u32::MAX)
}

/// Editor position (UTF-16 column) to a byte-column position. Columns past the line end
/// clamp to it; lines past the document end are passed through for `ide` to reject.
pub fn utf16_position_to_byte(source: &str, line: u32, character: u32) -> Position {
    let map = SourceMap::new(source);
    let column = map
        .line_text(line as usize)
        .map_or(0, |text| utf16_offset_to_byte(text, character as usize));
    Position::new(line, u32::try_from(column).unwrap_or(u32::MAX))
}
