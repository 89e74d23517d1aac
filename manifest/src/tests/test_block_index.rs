use crate::structure::{BlockIndex, block_item_index};
use crate::tests::common::{NESTED_METRICS, TOPOLOGY_RULES, trim_indent};

#[test]
fn first_item_of_nested_blocks() {
    assert_eq!(block_item_index("types", 2, TOPOLOGY_RULES), BlockIndex::Item(0));
    assert_eq!(block_item_index("rules", 4, TOPOLOGY_RULES), BlockIndex::Item(0));
    assert_eq!(block_item_index("attributes", 5, TOPOLOGY_RULES), BlockIndex::Item(0));
}

#[test]
fn declaration_line_is_before_first_item() {
    assert_eq!(
        block_item_index("types", 1, TOPOLOGY_RULES),
        BlockIndex::BeforeFirstItem
    );
}

#[test]
fn line_before_declaration_is_not_found() {
    assert_eq!(block_item_index("rules", 2, TOPOLOGY_RULES), BlockIndex::NotFound);
}

#[test]
fn absent_label_is_not_found_everywhere() {
    for line in 0..8 {
        assert_eq!(
            block_item_index("screens", line, TOPOLOGY_RULES),
            BlockIndex::NotFound,
            "line {line}"
        );
    }
}

#[test]
fn sub_lines_keep_their_item_index() {
    let text = trim_indent(
        r#"
        metrics:
          - key: a
            value: metric:a
          - key: b
            dimensions:
              - key: x
          - key: c"#,
    );

    let expected = [
        BlockIndex::BeforeFirstItem,
        BlockIndex::Item(0),
        BlockIndex::Item(0),
        BlockIndex::Item(1),
        BlockIndex::Item(1),
        BlockIndex::Item(1),
        BlockIndex::Item(2),
    ];
    for (line, want) in expected.iter().enumerate() {
        assert_eq!(block_item_index("metrics", line, &text), *want, "line {line}");
    }
}

#[test]
fn block_without_items_stays_before_first_item() {
    let text = trim_indent(
        r#"
        metrics:
        dimensions:
          - key: a"#,
    );

    assert_eq!(block_item_index("metrics", 0, &text), BlockIndex::BeforeFirstItem);
    assert_eq!(block_item_index("metrics", 2, &text), BlockIndex::BeforeFirstItem);
    assert_eq!(block_item_index("dimensions", 2, &text), BlockIndex::Item(0));
}

#[test]
fn most_recent_declaration_governs() {
    let text = trim_indent(
        r#"
        prometheus:
          - group: a
            metrics:
              - key: a1
              - key: a2
          - group: b
            metrics:
              - key: b1"#,
    );

    assert_eq!(block_item_index("metrics", 4, &text), BlockIndex::Item(1));
    assert_eq!(block_item_index("metrics", 7, &text), BlockIndex::Item(0));
    assert_eq!(block_item_index("metrics", 6, &text), BlockIndex::BeforeFirstItem);
    assert_eq!(block_item_index("prometheus", 7, &text), BlockIndex::Item(1));
}

#[test]
fn same_label_at_different_depths() {
    assert_eq!(block_item_index("metrics", 1, NESTED_METRICS), BlockIndex::Item(0));
    assert_eq!(block_item_index("metrics", 5, NESTED_METRICS), BlockIndex::Item(0));
    assert_eq!(block_item_index("prometheus", 5, NESTED_METRICS), BlockIndex::Item(0));
}

#[test]
fn blank_and_comment_lines_are_skipped() {
    let text = "types:\n\n  # first\n  - name: a\n\n  - name: b\n";

    assert_eq!(block_item_index("types", 1, text), BlockIndex::BeforeFirstItem);
    assert_eq!(block_item_index("types", 2, text), BlockIndex::BeforeFirstItem);
    assert_eq!(block_item_index("types", 3, text), BlockIndex::Item(0));
    assert_eq!(block_item_index("types", 4, text), BlockIndex::Item(0));
    assert_eq!(block_item_index("types", 5, text), BlockIndex::Item(1));
}

#[test]
fn items_may_sit_at_the_label_column() {
    let text = "metrics:\n- key: a\n- key: b\n";
    assert_eq!(block_item_index("metrics", 2, text), BlockIndex::Item(1));
}

#[test]
fn items_left_of_the_label_do_not_belong_to_it() {
    let text = "  metrics:\n- key: a\n";
    assert_eq!(block_item_index("metrics", 1, text), BlockIndex::BeforeFirstItem);
}

#[test]
fn sentinel_encoding() {
    assert_eq!(BlockIndex::NotFound.to_sentinel(), -2);
    assert_eq!(BlockIndex::BeforeFirstItem.to_sentinel(), -1);
    assert_eq!(BlockIndex::Item(3).to_sentinel(), 3);
    assert_eq!(BlockIndex::Item(3).item(), Some(3));
    assert_eq!(BlockIndex::BeforeFirstItem.item(), None);
}

#[test]
fn quoted_keys_declare_blocks() {
    let text = trim_indent(
        r#"
        topology:
          "types":
            - name: a
            - name: b
        "#,
    );
    assert_eq!(block_item_index("types", 3, &text), BlockIndex::Item(1));
    assert_eq!(
        crate::structure::parent_blocks(3, &text),
        vec!["topology", "types"]
    );
}
