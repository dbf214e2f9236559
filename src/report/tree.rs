use colored::*;

use crate::view::{GraphNode, NodeKind};

/// Print the dependency graph as an indented tree.
pub fn render(root: Option<&GraphNode>) {
    println!(" {} Dependency Graph:\n", "[TREE]".cyan().bold());
    match root {
        Some(root) => {
            for line in tree_lines(root) {
                println!(" {}", line);
            }
            println!();
        }
        None => println!(" No dependency data available\n"),
    }
}

fn badge(kind: NodeKind) -> Option<ColoredString> {
    match kind {
        NodeKind::Production => Some("[dependency]".cyan()),
        NodeKind::Development => Some("[devDependency]".dimmed()),
        NodeKind::Container => None,
    }
}

fn node_text(node: &GraphNode) -> String {
    match badge(node.kind) {
        Some(badge) => format!("{} {}", node.label, badge),
        None => node.label.bold().to_string(),
    }
}

pub fn tree_lines(root: &GraphNode) -> Vec<String> {
    let mut lines = vec![node_text(root)];
    push_children(root, "", &mut lines);
    lines
}

fn push_children(node: &GraphNode, prefix: &str, lines: &mut Vec<String>) {
    let count = node.children.len();
    for (i, child) in node.children.iter().enumerate() {
        let last = i + 1 == count;
        let (branch, indent) = if last { ("└── ", "    ") } else { ("├── ", "│   ") };
        lines.push(format!("{}{}{}", prefix, branch, node_text(child)));
        push_children(child, &format!("{}{}", prefix, indent), lines);
    }
}
