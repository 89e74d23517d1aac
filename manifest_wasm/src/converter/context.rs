use ide::{CompletionConfig, Context, DEFAULT_PREFERRED_LIMIT, PrometheusData};
use js_sys::Error as JsError;
use serde::Deserialize;
use wasm_bindgen::prelude::JsValue;

#[derive(Debug, Clone, Default)]
pub struct ParsedContext {
    pub ctx: Context,
    pub completion: CompletionConfig,
}

#[derive(Debug)]
pub struct ContextError;

impl ContextError {
    pub fn into_js(self) -> JsValue {
        JsValue::from(JsError::new("Invalid context JSON"))
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CompletionInput {
    #[serde(default = "default_preferred_limit")]
    preferred_limit: usize,
    #[serde(default = "default_true")]
    builtin_entity_types: bool,
    #[serde(default = "default_true")]
    retrigger_suggest: bool,
}

impl Default for CompletionInput {
    fn default() -> Self {
        Self {
            preferred_limit: default_preferred_limit(),
            builtin_entity_types: true,
            retrigger_suggest: true,
        }
    }
}

fn default_preferred_limit() -> usize {
    DEFAULT_PREFERRED_LIMIT
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ContextInput {
    #[serde(default)]
    completion: CompletionInput,
    #[serde(default)]
    prometheus: Option<PrometheusData>,
    /// Raw scrape output; families from `prometheus` override the ones parsed here.
    #[serde(default)]
    prometheus_exposition: Option<String>,
}

pub(crate) fn parse_context(context_json: Option<&str>) -> Result<ParsedContext, ContextError> {
    let trimmed = context_json.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return Ok(ParsedContext::default());
    }

    let input: ContextInput = serde_json::from_str(trimmed).map_err(|_| ContextError)?;

    let prometheus = match (input.prometheus_exposition, input.prometheus) {
        (None, None) => None,
        (exposition, json) => {
            let mut data = exposition
                .as_deref()
                .map(PrometheusData::from_exposition)
                .unwrap_or_default();
            if let Some(json) = json {
                data.metrics.extend(json.metrics);
            }
            Some(data)
        }
    };

    Ok(ParsedContext {
        ctx: Context { prometheus },
        completion: CompletionConfig {
            preferred_limit: input.completion.preferred_limit,
            builtin_entity_types: input.completion.builtin_entity_types,
            retrigger_suggest: input.completion.retrigger_suggest,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_context_uses_defaults() {
        let parsed = parse_context(None).unwrap();
        assert_eq!(parsed.completion, CompletionConfig::default());
        assert!(parsed.ctx.prometheus.is_none());
        assert!(parse_context(Some("  ")).is_ok());
    }

    #[test]
    fn completion_fields_are_optional() {
        let parsed = parse_context(Some(r#"{"completion":{"retrigger_suggest":false}}"#)).unwrap();
        assert_eq!(parsed.completion.preferred_limit, DEFAULT_PREFERRED_LIMIT);
        assert!(parsed.completion.builtin_entity_types);
        assert!(!parsed.completion.retrigger_suggest);
    }

    #[test]
    fn json_families_override_exposition() {
        let parsed = parse_context(Some(
            r#"{
                "prometheus_exposition": "up{job=\"a\"} 1\n",
                "prometheus": {"metrics": {"up": {"type": "gauge", "labels": ["instance"]}}}
            }"#,
        ))
        .unwrap();
        let data = parsed.ctx.prometheus.unwrap();
        assert_eq!(data.metrics["up"].labels, vec!["instance"]);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(parse_context(Some(r#"{"properties":[]}"#)).is_err());
        assert!(parse_context(Some(r#"{"completion":{"limit":1}}"#)).is_err());
        assert!(parse_context(Some("{")).is_err());
    }
}
