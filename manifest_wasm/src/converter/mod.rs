//! Conversion utilities for the WASM/JS boundary.
//!
//! This module is stateless and centralizes:
//! - Input conversion (parsing context JSON).
//! - UTF-16 ↔ byte offset bridging for editor-facing positions.
//! - DTO conversion (`manifest` and `ide` types → `dto::v1::*` views).

mod completion;
mod context;
mod structure;

use wasm_bindgen::prelude::JsValue;

use crate::offsets::utf16_position_to_byte;

pub use context::{ContextError, ParsedContext};

pub struct Converter;

impl Converter {
    /// Parse the JS-provided context JSON; `None` or blank text yields the defaults.
    pub fn parse_context(context_json: Option<&str>) -> Result<ParsedContext, JsValue> {
        context::parse_context(context_json).map_err(ContextError::into_js)
    }

    /// Convert an editor position to the byte-column position `ide` expects.
    pub fn position(source: &str, line: u32, character_utf16: u32) -> ide::Position {
        utf16_position_to_byte(source, line, character_utf16)
    }
}
