//! Positional structure of manifest text.
//!
//! Every resolver is a pure function of the text it is given: nothing is cached and nothing
//! is reported as an error. Offsets are UTF-8 byte offsets, lines are zero-based.

mod index;
mod items;
mod parents;
mod range;

pub use index::{BlockIndex, block_item_index};
pub use items::{ItemRange, list_item_ranges, list_item_ranges_at};
pub use parents::parent_blocks;
pub use range::{block_range, block_range_at};
