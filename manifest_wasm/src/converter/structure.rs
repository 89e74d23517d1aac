use manifest::Span as ByteSpan;

use crate::converter::Converter;
use crate::dto::v1::{
    CodeLens, ItemRange, MetricKind, PrometheusResult, ScrapedMetric, Span as Utf16Span,
};
use crate::span::byte_span_to_utf16_span;

pub(crate) fn span_dto(source: &str, span: ByteSpan) -> Utf16Span {
    byte_span_to_utf16_span(source, span)
}

impl Converter {
    pub fn span_view(source: &str, span: ByteSpan) -> Utf16Span {
        span_dto(source, span)
    }

    pub fn item_ranges_view(source: &str, items: &[manifest::ItemRange]) -> Vec<ItemRange> {
        items
            .iter()
            .map(|item| ItemRange {
                index: item.index,
                span: span_dto(source, item.span),
            })
            .collect()
    }

    pub fn code_lenses_view(source: &str, lenses: &[ide::CodeLens]) -> Vec<CodeLens> {
        lenses
            .iter()
            .map(|lens| CodeLens {
                span: span_dto(source, lens.span),
                line: lens.line,
                title: lens.title.clone(),
            })
            .collect()
    }

    pub fn prometheus_view(data: &ide::PrometheusData) -> PrometheusResult {
        PrometheusResult {
            metrics: data
                .metrics
                .iter()
                .map(|(name, metric)| ScrapedMetric {
                    name: name.clone(),
                    kind: metric_kind_view(metric.kind),
                    help: metric.help.clone(),
                    labels: metric.labels.clone(),
                })
                .collect(),
        }
    }
}

fn metric_kind_view(kind: ide::MetricKind) -> MetricKind {
    match kind {
        ide::MetricKind::Counter => MetricKind::Counter,
        ide::MetricKind::Gauge => MetricKind::Gauge,
        ide::MetricKind::Histogram => MetricKind::Histogram,
        ide::MetricKind::Summary => MetricKind::Summary,
        ide::MetricKind::Untyped => MetricKind::Untyped,
    }
}
