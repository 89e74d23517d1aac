//! `wasm-bindgen` exports for the editor host.
//!
//! Every position and span crossing this boundary is in UTF-16 code units; lines are
//! zero-based.

pub mod converter;
pub mod dto;
mod offsets;
mod span;

use std::sync::Arc;

use manifest::{DocumentCache, ManifestTree};
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::converter::{Converter, ParsedContext};
use crate::dto::v1::UpdateResult;

fn to_js<T: Serialize>(value: &T) -> JsValue {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    value.serialize(&serializer).unwrap_or(JsValue::NULL)
}

/// Completion for a one-off document; the text is parsed on every call.
#[wasm_bindgen]
pub fn complete(
    source: String,
    line: u32,
    character: u32,
    context_json: Option<String>,
) -> Result<JsValue, JsValue> {
    let parsed = Converter::parse_context(context_json.as_deref())?;
    let tree = ManifestTree::parse(&source).unwrap_or_default();
    Ok(run_completion(&source, line, character, &tree, &parsed))
}

fn run_completion(
    source: &str,
    line: u32,
    character: u32,
    tree: &ManifestTree,
    parsed: &ParsedContext,
) -> JsValue {
    let position = Converter::position(source, line, character);
    let output = ide::complete(source, position, tree, &parsed.ctx, parsed.completion);
    to_js(&Converter::completion_output_view(source, &output))
}

#[wasm_bindgen]
pub fn parent_blocks(source: String, line: u32) -> Vec<String> {
    manifest::parent_blocks(line as usize, &source)
}

/// Item of the `label` block owning `line`: `-2` if the label is not declared, `-1` if the
/// line precedes the first item.
#[wasm_bindgen]
pub fn block_item_index(label: String, line: u32, source: String) -> i32 {
    let index = manifest::block_item_index(&label, line as usize, &source).to_sentinel();
    i32::try_from(index).unwrap_or(i32::MAX)
}

#[wasm_bindgen]
pub fn list_item_ranges(label: String, source: String) -> JsValue {
    let items = manifest::list_item_ranges(&label, &source);
    to_js(&Converter::item_ranges_view(&source, &items))
}

/// Span of the first `label` block, or `null`.
#[wasm_bindgen]
pub fn block_range(label: String, source: String) -> JsValue {
    let range = manifest::block_range(&label, &source).map(|span| Converter::span_view(&source, span));
    to_js(&range)
}

#[wasm_bindgen]
pub fn code_lenses(source: String) -> JsValue {
    let tree = ManifestTree::parse(&source).unwrap_or_default();
    let lenses = ide::metric_code_lenses(&source, &tree);
    to_js(&Converter::code_lenses_view(&source, &lenses))
}

#[wasm_bindgen]
pub fn selection_ranges(source: String, line: u32, character: u32) -> JsValue {
    let position = Converter::position(&source, line, character);
    let ranges: Vec<_> = ide::selection_ranges(&source, position)
        .into_iter()
        .map(|span| Converter::span_view(&source, span))
        .collect();
    to_js(&ranges)
}

/// Folds Prometheus text exposition into metric families.
#[wasm_bindgen]
pub fn parse_prometheus(exposition: String) -> JsValue {
    let data = ide::PrometheusData::from_exposition(&exposition);
    to_js(&Converter::prometheus_view(&data))
}

/// One open manifest document. Reparses only when the version or text changes and keeps
/// serving the last tree that parsed while the text is invalid.
#[wasm_bindgen]
pub struct ManifestSession {
    parsed: ParsedContext,
    cache: DocumentCache,
    version: i64,
    source: String,
}

#[wasm_bindgen]
impl ManifestSession {
    #[wasm_bindgen(constructor)]
    pub fn new(context_json: Option<String>) -> Result<ManifestSession, JsValue> {
        Ok(Self {
            parsed: Converter::parse_context(context_json.as_deref())?,
            cache: DocumentCache::new(),
            version: 0,
            source: String::new(),
        })
    }

    /// Replaces the completion context; the document stays cached.
    pub fn set_context(&mut self, context_json: Option<String>) -> Result<(), JsValue> {
        self.parsed = Converter::parse_context(context_json.as_deref())?;
        Ok(())
    }

    pub fn update(&mut self, version: i32, source: String) -> JsValue {
        self.version = i64::from(version);
        self.source = source;
        let stale = self
            .cache
            .get(self.version, &self.source)
            .is_none_or(|cached| cached.stale);
        to_js(&UpdateResult { version, stale })
    }

    pub fn complete(&mut self, line: u32, character: u32) -> JsValue {
        let tree = self.tree();
        run_completion(&self.source, line, character, &tree, &self.parsed)
    }

    pub fn code_lenses(&mut self) -> JsValue {
        let tree = self.tree();
        let lenses = ide::metric_code_lenses(&self.source, &tree);
        to_js(&Converter::code_lenses_view(&self.source, &lenses))
    }
}

impl ManifestSession {
    fn tree(&mut self) -> Arc<ManifestTree> {
        self.cache
            .get(self.version, &self.source)
            .map(|cached| cached.tree)
            .unwrap_or_default()
    }
}
