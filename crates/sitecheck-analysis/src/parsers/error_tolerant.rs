//! Error-tolerant parsing: locate ERROR and MISSING nodes without failing.

use tree_sitter::Node;

/// Count ERROR/MISSING nodes and collect their 1-based start lines.
pub fn count_errors(root: Node) -> (u32, Vec<u32>) {
    let mut count = 0u32;
    let mut lines = Vec::new();
    collect_errors(root, &mut count, &mut lines);
    (count, lines)
}

fn collect_errors(node: Node, count: &mut u32, lines: &mut Vec<u32>) {
    if node.is_error() || node.is_missing() {
        *count += 1;
        lines.push(node.start_position().row as u32 + 1);
    }
    if !node.has_error() {
        return;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_errors(child, count, lines);
    }
}
