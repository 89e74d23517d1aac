//! Generated documents checked against the resolver guarantees.

use crate::source_map::SourceMap;
use crate::structure::{BlockIndex, block_item_index, list_item_ranges, parent_blocks};
use crate::tests::common::init_tracing;

struct Generated {
    text: String,
    /// Owning item for every line; `None` for the declaration line.
    owners: Vec<Option<usize>>,
}

fn generate(items: usize, sub_lines: usize, blank_between: bool) -> Generated {
    let mut lines = vec!["metrics:".to_string()];
    let mut owners = vec![None];
    for item in 0..items {
        lines.push(format!("  - key: m{item}"));
        owners.push(Some(item));
        for sub in 0..sub_lines {
            lines.push(format!("    value{sub}: metric:m{item}"));
            owners.push(Some(item));
        }
        if blank_between {
            lines.push(String::new());
            owners.push(Some(item));
        }
    }
    let mut text = lines.join("\n");
    text.push('\n');
    Generated { text, owners }
}

fn shapes() -> impl Iterator<Item = (usize, usize, bool)> {
    (1..5).flat_map(|items| {
        (0..3).flat_map(move |sub| [false, true].map(move |blank| (items, sub, blank)))
    })
}

#[test]
fn index_matches_owning_item_and_never_decreases() {
    init_tracing();
    for (items, sub, blank) in shapes() {
        let doc = generate(items, sub, blank);
        let mut previous = -2;
        for (line, owner) in doc.owners.iter().enumerate() {
            let index = block_item_index("metrics", line, &doc.text);
            let want = match owner {
                Some(item) => BlockIndex::Item(*item),
                None => BlockIndex::BeforeFirstItem,
            };
            assert_eq!(index, want, "shape {items}/{sub}/{blank} line {line}");
            assert!(index.to_sentinel() >= previous);
            previous = index.to_sentinel();
        }
    }
}

#[test]
fn absent_label_is_never_found() {
    for (items, sub, blank) in shapes() {
        let doc = generate(items, sub, blank);
        for line in 0..doc.owners.len() {
            assert_eq!(block_item_index("screens", line, &doc.text), BlockIndex::NotFound);
        }
    }
}

#[test]
fn item_ranges_are_ordered_and_cover_every_item_line() {
    for (items, sub, blank) in shapes() {
        let doc = generate(items, sub, blank);
        let sm = SourceMap::new(&doc.text);
        let ranges = list_item_ranges("metrics", &doc.text);
        assert_eq!(ranges.len(), items);

        for pair in ranges.windows(2) {
            assert!(pair[0].span.end <= pair[1].span.start);
            assert_eq!(pair[0].span.end, pair[1].span.start);
        }
        assert_eq!(ranges[0].span.start as usize, sm.line_start(1).unwrap());
        assert_eq!(ranges[items - 1].span.end as usize, doc.text.len());

        for (line, owner) in doc.owners.iter().enumerate() {
            let Some(item) = owner else { continue };
            let start = sm.line_start(line).unwrap() as u32;
            assert!(
                ranges[*item].span.contains(start),
                "shape {items}/{sub}/{blank} line {line} outside item {item}"
            );
        }
    }
}

#[test]
fn chains_of_generated_sub_lines() {
    for (items, sub, blank) in shapes() {
        let doc = generate(items, sub, blank);
        for (line, owner) in doc.owners.iter().enumerate() {
            if owner.is_none() {
                assert_eq!(parent_blocks(line, &doc.text), vec!["metrics"]);
            } else if !doc.text.lines().nth(line).unwrap_or("").is_empty() {
                assert_eq!(parent_blocks(line, &doc.text), vec!["metrics"], "line {line}");
            }
        }
    }
}
