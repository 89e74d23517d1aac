//! Block Index Resolver: which list item of a labelled block owns a line.

use crate::scanner::{content_indent, declares, scan_lines};

/// Position of a line relative to the items of a labelled block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockIndex {
    /// The label was never declared at or before the line.
    NotFound,
    /// The block is declared but the line precedes its first item.
    BeforeFirstItem,
    /// Zero-based index of the item owning the line.
    Item(usize),
}

impl BlockIndex {
    pub fn item(self) -> Option<usize> {
        match self {
            BlockIndex::Item(index) => Some(index),
            BlockIndex::NotFound | BlockIndex::BeforeFirstItem => None,
        }
    }

    /// Integer encoding used across the host boundary: `-2`, `-1` or the item index.
    pub fn to_sentinel(self) -> i64 {
        match self {
            BlockIndex::NotFound => -2,
            BlockIndex::BeforeFirstItem => -1,
            BlockIndex::Item(index) => i64::try_from(index).unwrap_or(i64::MAX),
        }
    }
}

/// Item state after a declaration line.
#[derive(Debug, Clone, Copy)]
enum Items {
    /// Waiting for the first significant line to fix the item column.
    Pending { label_indent: usize },
    Column(usize),
    /// The first significant line was not an item of this block.
    Empty,
}

/// Computes the index of the `label` list item that owns `target_line`.
///
/// The most recent declaration of `label` at or before `target_line` governs. Only list
/// markers at exactly the column of the block's first item count as siblings.
pub fn block_item_index(label: &str, target_line: usize, text: &str) -> BlockIndex {
    let mut index = BlockIndex::NotFound;
    let mut items = Items::Empty;

    for line in scan_lines(text) {
        if line.number > target_line {
            break;
        }

        if declares(line.text, label) {
            index = BlockIndex::BeforeFirstItem;
            items = Items::Pending {
                label_indent: content_indent(line.text).unwrap_or(0),
            };
            continue;
        }

        if !line.is_significant() {
            continue;
        }

        match items {
            Items::Pending { label_indent } => match line.marker_indent() {
                Some(marker) if marker >= label_indent => {
                    items = Items::Column(marker);
                    index = BlockIndex::Item(0);
                }
                _ => items = Items::Empty,
            },
            Items::Column(column) => {
                if line.marker_indent() == Some(column)
                    && let BlockIndex::Item(n) = index
                {
                    index = BlockIndex::Item(n + 1);
                }
            }
            Items::Empty => {}
        }
    }

    index
}
