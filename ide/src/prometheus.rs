//! Scraped Prometheus metadata used by the Prometheus provider.
//!
//! The host either sends it as JSON or hands over raw exposition text, which
//! [`PrometheusData::from_exposition`] folds into metric families.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    Counter,
    Gauge,
    Histogram,
    Summary,
    #[default]
    Untyped,
}

impl MetricKind {
    fn parse(text: &str) -> Self {
        match text {
            "counter" => MetricKind::Counter,
            "gauge" => MetricKind::Gauge,
            "histogram" => MetricKind::Histogram,
            "summary" => MetricKind::Summary,
            _ => MetricKind::Untyped,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MetricKind::Counter => "counter",
            MetricKind::Gauge => "gauge",
            MetricKind::Histogram => "histogram",
            MetricKind::Summary => "summary",
            MetricKind::Untyped => "untyped",
        }
    }

    /// Histograms and summaries are exposed as `_sum` / `_count` series.
    pub fn is_distribution(self) -> bool {
        matches!(self, MetricKind::Histogram | MetricKind::Summary)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScrapedMetric {
    #[serde(rename = "type", default)]
    pub kind: MetricKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    /// Label names seen on the family's samples, first seen first.
    #[serde(default)]
    pub labels: Vec<String>,
}

impl ScrapedMetric {
    /// Series names a manifest `value: metric:<name>` can point at.
    pub fn series(&self, family: &str) -> Vec<String> {
        if self.kind.is_distribution() {
            vec![format!("{family}_sum"), format!("{family}_count")]
        } else {
            vec![family.to_string()]
        }
    }

    /// Metric keys suggested for the family.
    pub fn key_suggestions(&self, family: &str) -> Vec<String> {
        match self.kind {
            MetricKind::Counter => {
                let base = family.strip_suffix("_total").unwrap_or(family);
                vec![format!("{base}.count")]
            }
            MetricKind::Histogram | MetricKind::Summary => {
                vec![format!("{family}.count"), format!("{family}.sum")]
            }
            MetricKind::Gauge | MetricKind::Untyped => vec![family.to_string()],
        }
    }
}

/// Metric families keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PrometheusData {
    #[serde(default)]
    pub metrics: BTreeMap<String, ScrapedMetric>,
}

const DISTRIBUTION_SUFFIXES: &[&str] = &["_bucket", "_sum", "_count"];
const IGNORED_LABELS: &[&str] = &["le", "quantile"];

impl PrometheusData {
    /// Parses Prometheus text exposition format.
    ///
    /// `# HELP` / `# TYPE` lines declare families. `_bucket`, `_sum` and `_count` samples
    /// fold into a declared histogram or summary. The `_total` samples of a counter declared
    /// without the suffix rename the family to the sample name. Unparseable lines are skipped.
    pub fn from_exposition(text: &str) -> Self {
        let mut metrics: BTreeMap<String, ScrapedMetric> = BTreeMap::new();

        for line in text.lines().map(str::trim) {
            if line.is_empty() {
                continue;
            }
            if let Some(comment) = line.strip_prefix('#') {
                let mut parts = comment.trim_start().splitn(3, ' ');
                match (parts.next(), parts.next()) {
                    (Some("HELP"), Some(name)) => {
                        let help = parts.next().unwrap_or_default().trim();
                        metrics.entry(name.to_string()).or_default().help =
                            (!help.is_empty()).then(|| help.to_string());
                    }
                    (Some("TYPE"), Some(name)) => {
                        let kind = MetricKind::parse(parts.next().unwrap_or_default().trim());
                        metrics.entry(name.to_string()).or_default().kind = kind;
                    }
                    _ => {}
                }
                continue;
            }

            let Some((sample, labels)) = parse_sample(line) else {
                continue;
            };
            let family = family_of_sample(&mut metrics, sample);
            let metric = metrics.entry(family).or_default();
            for label in labels {
                if IGNORED_LABELS.contains(&label) || metric.labels.iter().any(|l| l == label) {
                    continue;
                }
                metric.labels.push(label.to_string());
            }
        }

        Self { metrics }
    }

    /// Family a series name belongs to, with its metadata.
    pub fn family(&self, series: &str) -> Option<(&str, &ScrapedMetric)> {
        if let Some((name, metric)) = self.metrics.get_key_value(series) {
            return Some((name.as_str(), metric));
        }
        DISTRIBUTION_SUFFIXES
            .iter()
            .chain(&["_total"])
            .filter_map(|suffix| series.strip_suffix(suffix))
            .find_map(|base| self.metrics.get_key_value(base))
            .map(|(name, metric)| (name.as_str(), metric))
    }

    /// All label names, sorted and deduplicated.
    pub fn label_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .metrics
            .values()
            .flat_map(|metric| metric.labels.iter().map(String::as_str))
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }
}

fn family_of_sample(metrics: &mut BTreeMap<String, ScrapedMetric>, sample: &str) -> String {
    if metrics.contains_key(sample) {
        return sample.to_string();
    }
    for suffix in DISTRIBUTION_SUFFIXES {
        if let Some(base) = sample.strip_suffix(suffix)
            && metrics.get(base).is_some_and(|metric| metric.kind.is_distribution())
        {
            return base.to_string();
        }
    }
    if let Some(base) = sample.strip_suffix("_total")
        && metrics
            .get(base)
            .is_some_and(|metric| metric.kind == MetricKind::Counter)
        && let Some(metric) = metrics.remove(base)
    {
        metrics.insert(sample.to_string(), metric);
    }
    sample.to_string()
}

/// Sample name and label names of one sample line.
fn parse_sample(line: &str) -> Option<(&str, Vec<&str>)> {
    let name_end = line
        .find(|c: char| c == '{' || c.is_whitespace())
        .unwrap_or(line.len());
    let name = &line[..name_end];
    if name.is_empty() {
        return None;
    }

    let labels = match line[name_end..].strip_prefix('{') {
        Some(body) => parse_label_names(body)?,
        None => Vec::new(),
    };
    Some((name, labels))
}

/// Label names of `a="x",b="y"}`; `None` if a value is not terminated.
fn parse_label_names(body: &str) -> Option<Vec<&str>> {
    let mut names = Vec::new();
    let mut rest = body;
    loop {
        rest = rest.trim_start_matches([' ', ',']);
        if rest.is_empty() || rest.starts_with('}') {
            return Some(names);
        }

        let (name, after) = rest.split_once('=')?;
        names.push(name.trim());
        let value = after.trim_start().strip_prefix('"')?;

        let mut escaped = false;
        let mut close = None;
        for (idx, c) in value.char_indices() {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => {
                    close = Some(idx);
                    break;
                }
                _ => {}
            }
        }
        rest = &value[close? + 1..];
    }
}
