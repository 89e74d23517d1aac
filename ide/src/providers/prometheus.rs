//! Completions under `prometheus`, drawn from the scraped metrics of the host's endpoint.

use manifest::{Value, field_values, seq};

use super::{Request, retain_unused};
use crate::CompletionDraft;
use crate::completion::{CompletionItem, CompletionKind};
use crate::prometheus::{MetricKind, PrometheusData};

pub(super) fn complete(req: &Request<'_>) -> Option<CompletionDraft> {
    let cursor = req.cursor;
    if cursor.root() != Some("prometheus") {
        return None;
    }
    let data = req.ctx.prometheus.as_ref()?;
    let node = current_group(req)?;

    let items = match (cursor.parent()?, cursor.slot.key) {
        ("metrics", "value") => metric_value_items(data, node),
        ("metrics", "key") => metric_key_items(data, node, current_series(req, node)),
        ("metrics", "type") => metric_type_items(data, current_series(req, node)),
        ("dimensions", "key") => dimension_items(data, node, DimensionField::Key),
        ("dimensions", "value") => dimension_items(data, node, DimensionField::Value),
        _ => return None,
    };

    Some(CompletionDraft {
        items,
        replace: cursor.value_span(),
    })
}

/// The group, or the subgroup when the cursor is under `subgroups`.
fn current_group<'a>(req: &Request<'a>) -> Option<&'a Value> {
    let group = seq(req.tree.get("prometheus")).get(req.cursor.item_index("prometheus")?)?;
    if req.cursor.has_parent("subgroups") {
        return seq(&group["subgroups"]).get(req.cursor.item_index("subgroups")?);
    }
    Some(group)
}

/// Series named by the `value` of the metric item owning the cursor line.
fn current_series<'a>(req: &Request<'_>, node: &'a Value) -> Option<&'a str> {
    let metric = seq(&node["metrics"]).get(req.cursor.item_index("metrics")?)?;
    metric["value"].as_str()?.strip_prefix("metric:")
}

fn metric_detail(kind: MetricKind, help: Option<&str>) -> String {
    match help {
        Some(help) => format!("{}: {help}", kind.as_str()),
        None => kind.as_str().to_string(),
    }
}

fn metric_value_items(data: &PrometheusData, node: &Value) -> Vec<CompletionItem> {
    let mut items = Vec::new();
    for (family, metric) in &data.metrics {
        for series in metric.series(family) {
            items.push(
                CompletionItem::new(format!("metric:{series}"), CompletionKind::Metric)
                    .with_detail(metric_detail(metric.kind, metric.help.as_deref())),
            );
        }
    }
    retain_unused(&mut items, &field_values(node, "metrics", "value"));
    items
}

/// Key suggestions for every family; the family of the item's own series comes first.
fn metric_key_items(
    data: &PrometheusData,
    node: &Value,
    series: Option<&str>,
) -> Vec<CompletionItem> {
    let own = series
        .and_then(|series| data.family(series))
        .map(|(family, _)| family);

    let mut families: Vec<_> = data.metrics.iter().collect();
    families.sort_by_key(|(family, _)| Some(family.as_str()) != own);

    let mut items = Vec::new();
    for (family, metric) in families {
        for key in metric.key_suggestions(family) {
            items.push(
                CompletionItem::new(key, CompletionKind::Metric)
                    .with_detail(format!("from {family}")),
            );
        }
    }
    retain_unused(&mut items, &field_values(node, "metrics", "key"));
    items
}

/// `count` and `gauge`, the better fit for the item's series first.
fn metric_type_items(data: &PrometheusData, series: Option<&str>) -> Vec<CompletionItem> {
    let kind = series
        .and_then(|series| data.family(series))
        .map(|(_, metric)| metric.kind)
        .unwrap_or_default();
    let order = match kind {
        MetricKind::Counter | MetricKind::Histogram | MetricKind::Summary => ["count", "gauge"],
        MetricKind::Gauge | MetricKind::Untyped => ["gauge", "count"],
    };
    order
        .into_iter()
        .map(|ty| CompletionItem::new(ty, CompletionKind::EnumMember))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DimensionField {
    Key,
    Value,
}

/// Labels of the metrics the node references, or every scraped label if it references none.
fn dimension_items(
    data: &PrometheusData,
    node: &Value,
    field: DimensionField,
) -> Vec<CompletionItem> {
    let mut labels: Vec<&str> = Vec::new();
    for value in field_values(node, "metrics", "value") {
        let Some((_, metric)) = value
            .strip_prefix("metric:")
            .and_then(|series| data.family(series))
        else {
            continue;
        };
        for label in &metric.labels {
            if !labels.contains(&label.as_str()) {
                labels.push(label);
            }
        }
    }
    if labels.is_empty() {
        labels = data.label_names();
    }

    let mut items: Vec<CompletionItem> = labels
        .into_iter()
        .map(|label| {
            let text = match field {
                DimensionField::Key => label.to_string(),
                DimensionField::Value => format!("label:{label}"),
            };
            CompletionItem::new(text, CompletionKind::Dimension)
        })
        .collect();

    let taken = match field {
        DimensionField::Key => field_values(node, "dimensions", "key"),
        DimensionField::Value => field_values(node, "dimensions", "value"),
    };
    retain_unused(&mut items, &taken);
    items
}
