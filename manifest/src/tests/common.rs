/// The chain example used throughout the structural tests.
pub const TOPOLOGY_RULES: &str = "\
topology:
  types:
    - name: myType
      rules:
        - attributes:
            - key: foo
";

/// A top-level `metrics` block followed by a nested one of the same name.
pub const NESTED_METRICS: &str = "\
metrics:
  - key: top
prometheus:
  - group: g
    metrics:
      - key: nested
";

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn trim_indent(s: &str) -> String {
    let lines: Vec<&str> = s.lines().collect();
    let min_indent = lines
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.chars().take_while(|c| *c == ' ').count())
        .min()
        .unwrap_or(0);

    let mut kept: Vec<&str> = lines
        .iter()
        // Skip the first line (which is the empty line)
        .skip(1)
        .map(|l| if l.len() >= min_indent { &l[min_indent..] } else { "" })
        .collect();
    while kept.last().is_some_and(|l| l.is_empty()) {
        kept.pop();
    }

    let mut out = kept.join("\n");
    out.push('\n');
    out
}

#[test]
fn test_trim_indent() {
    let s = r#"
        topology:
          types:
            - name: a"#;
    assert_eq!(trim_indent(s), "topology:\n  types:\n    - name: a\n");
}
