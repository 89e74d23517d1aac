use manifest::ManifestTree;

use crate::{
    Command, CompletionConfig, CompletionItem, CompletionOutput, Context, Position,
    PrometheusData, complete,
};

/// Manifest shared with the structural tests of `manifest`.
pub const FIXTURE: &str = include_str!("../../../manifest/tests/fixtures/extension.yaml");

pub const EXPOSITION: &str = r#"
# TYPE up gauge
up{job="a",instance="x"} 1
# HELP http_requests Requests served.
# TYPE http_requests counter
http_requests_total{path="/",method="GET"} 5
# TYPE latency_seconds histogram
latency_seconds_bucket{le="1",path="/"} 1
latency_seconds_sum{path="/"} 1
latency_seconds_count{path="/"} 1
"#;

pub fn scraped() -> PrometheusData {
    PrometheusData::from_exposition(EXPOSITION)
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// ----------------------------
// Completion Test DSL
// ----------------------------

pub fn t(input_with_cursor: &str) -> CompletionTestBuilder {
    CompletionTestBuilder::new(input_with_cursor, None)
}

/// The fixture with zero-based `line` replaced by `line_with_cursor`.
pub fn fixture(line: usize, line_with_cursor: &str) -> CompletionTestBuilder {
    fixture_with(&[(line, line_with_cursor)])
}

/// The fixture with several lines replaced; exactly one replacement carries `$0`.
pub fn fixture_with(replacements: &[(usize, &str)]) -> CompletionTestBuilder {
    let mut lines: Vec<&str> = FIXTURE.split('\n').collect();
    for (line, text) in replacements {
        assert!(*line < lines.len(), "fixture has no line {line}");
        lines[*line] = text;
    }
    CompletionTestBuilder::new(&lines.join("\n"), Some(FIXTURE))
}

pub struct CompletionTestBuilder {
    text: String,
    /// Parsed in place of `text` when the edited text is not valid YAML.
    last_good: Option<&'static str>,
    position: Position,
    ctx: Context,
    config: CompletionConfig,
    output: Option<CompletionOutput>,
}

impl CompletionTestBuilder {
    fn new(input_with_cursor: &str, last_good: Option<&'static str>) -> Self {
        let cursor = input_with_cursor
            .find("$0")
            .expect("fixture must contain $0 marker");
        let text = input_with_cursor.replace("$0", "");
        assert!(
            text.len() + 2 == input_with_cursor.len(),
            "fixture must contain exactly one $0 marker"
        );

        let before = &input_with_cursor[..cursor];
        let line = before.matches('\n').count();
        let line_start = before.rfind('\n').map_or(0, |idx| idx + 1);

        init_tracing();
        Self {
            text,
            last_good,
            position: Position::new(line as u32, (cursor - line_start) as u32),
            ctx: Context::default(),
            config: CompletionConfig::default(),
            output: None,
        }
    }

    pub fn prometheus(mut self, data: PrometheusData) -> Self {
        self.ctx.prometheus = Some(data);
        self
    }

    pub fn builtin_types(mut self, enabled: bool) -> Self {
        self.config.builtin_entity_types = enabled;
        self
    }

    pub fn retrigger(mut self, enabled: bool) -> Self {
        self.config.retrigger_suggest = enabled;
        self
    }

    pub fn preferred_limit(mut self, preferred_limit: usize) -> Self {
        self.config.preferred_limit = preferred_limit;
        self
    }

    fn ensure_run(&mut self) -> &CompletionOutput {
        if self.output.is_none() {
            let tree = ManifestTree::parse(&self.text)
                .or_else(|err| match self.last_good {
                    Some(last_good) => ManifestTree::parse(last_good),
                    None => Err(err),
                })
                .unwrap_or_default();
            let out = complete(&self.text, self.position, &tree, &self.ctx, self.config);
            self.output = Some(out);
        }
        self.output.as_ref().unwrap()
    }

    fn labels(&mut self) -> Vec<String> {
        self.ensure_run()
            .items
            .iter()
            .map(|item| item.label.clone())
            .collect()
    }

    pub fn output(mut self) -> CompletionOutput {
        self.ensure_run().clone()
    }

    pub fn expect_empty(mut self) -> Self {
        let labels = self.labels();
        assert!(labels.is_empty(), "expected no completion items, got {labels:?}");
        self
    }

    pub fn expect_labels(mut self, expected: &[&str]) -> Self {
        let labels = self.labels();
        assert_eq!(labels, expected, "unexpected completion labels");
        self
    }

    pub fn expect_contains_labels(mut self, expected: &[&str]) -> Self {
        let labels = self.labels();
        for label in expected {
            assert!(
                labels.iter().any(|l| l == label),
                "expected to contain label {label}\nactual labels: {labels:?}"
            );
        }
        self
    }

    pub fn expect_not_contains_labels(mut self, expected: &[&str]) -> Self {
        let labels = self.labels();
        for label in expected {
            assert!(
                !labels.iter().any(|l| l == label),
                "expected NOT to contain label {label}\nactual labels: {labels:?}"
            );
        }
        self
    }

    pub fn expect_top_labels(mut self, expected: &[&str]) -> Self {
        let labels = self.labels();
        assert!(
            labels.len() >= expected.len(),
            "expected at least {} items\nactual labels: {labels:?}",
            expected.len()
        );
        assert_eq!(&labels[..expected.len()], expected, "prefix mismatch");
        self
    }

    pub fn item(&mut self, label: &str) -> CompletionItem {
        let out = self.ensure_run();
        out.items
            .iter()
            .find(|i| i.label == label)
            .cloned()
            .unwrap_or_else(|| {
                let labels: Vec<&str> = out.items.iter().map(|i| i.label.as_str()).collect();
                panic!("missing completion item for label {label}\nactual labels: {labels:?}")
            })
    }

    pub fn expect_item_insert_text(mut self, label: &str, expected: &str) -> Self {
        let item = self.item(label);
        assert_eq!(
            item.insert_text, expected,
            "unexpected insert_text for item {label}"
        );
        self
    }

    pub fn expect_item_detail(mut self, label: &str, expected: &str) -> Self {
        let item = self.item(label);
        assert_eq!(
            item.detail.as_deref(),
            Some(expected),
            "unexpected detail for item {label}"
        );
        self
    }

    pub fn expect_item_command(mut self, label: &str, expected: Option<Command>) -> Self {
        let item = self.item(label);
        assert_eq!(item.command, expected, "unexpected command for item {label}");
        self
    }

    /// Text under the replace span.
    pub fn expect_replaced(mut self, expected: &str) -> Self {
        let replace = self.ensure_run().replace;
        let replaced = &self.text[replace.start as usize..replace.end as usize];
        assert_eq!(replaced, expected, "unexpected replace span {replace:?}");
        self
    }

    /// Applies the item's primary edit and checks the cursor line afterwards.
    pub fn expect_applied_line(mut self, label: &str, expected: &str) -> Self {
        let item = self.item(label);
        let edit = item
            .primary_edit
            .expect("completion item must carry a primary edit");
        let applied = edit.apply(&self.text).expect("edit must apply");
        let line = applied
            .split('\n')
            .nth(self.position.line as usize)
            .unwrap_or_default()
            .to_string();
        assert_eq!(line, expected, "unexpected line after applying {label}");
        self
    }

    pub fn expect_preferred_indices(mut self, expected: &[usize]) -> Self {
        let out = self.ensure_run();
        assert_eq!(out.preferred_indices, expected);
        self
    }
}
