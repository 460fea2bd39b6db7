//! Human-readable rendering of a plan for `loadplan show`.

use crate::plan::PlanNode;

/// Render `root` as an indented outline, one node per line:
///
/// ```text
/// Plan "L&P Test Plan" enabled=true
///   ThreadGroup "Thread Group" num_threads=5 ramp_time=2 on_sample_error=continue
///     Sampler "Test Endpoint" path=/api method=GET enabled=true
///       - name: Alice
/// ```
pub fn render_outline(root: &PlanNode) -> String {
    let mut out = String::new();
    render_node(root, 0, &mut out);
    out
}

fn render_node(node: &PlanNode, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    out.push_str(&format!("{indent}{:?} \"{}\"", node.kind(), node.name()));
    for prop in node.properties() {
        out.push_str(&format!(" {}={}", prop.key, prop.value));
    }
    out.push('\n');
    for entry in node.entries() {
        out.push_str(&format!("{indent}  - {}: {}\n", entry.name, entry.value));
    }
    for child in node.children() {
        render_node(child, depth + 1, out);
    }
}
