// Formatter: render a pattern tree back to canonical pattern notation
use crate::ast::{Node, NodeId, NodeKind, Repeat, Tree};

/// Format a parsed pattern; the result parses back to an equivalent tree
pub fn format(tree: &Tree) -> String {
    format_chain(tree, tree.first())
}

fn format_chain(tree: &Tree, first: NodeId) -> String {
    let mut out = String::new();
    let mut separator = None;

    for (_, node) in tree.siblings(first) {
        if node.is_placeholder() {
            continue;
        }
        if let Some(separator) = separator {
            out.push_str(separator);
        }
        out.push_str(&format_node(tree, node));
        separator = Some(if node.alt_boundary { " | " } else { " " });
    }

    out
}

fn format_node(tree: &Tree, node: &Node) -> String {
    let body = match (node.child, node.kind) {
        (Some(child), _) => format!("({})", format_chain(tree, child)),
        (None, NodeKind::Symbol) => format!("<{}>", node.content),
        (None, NodeKind::Literal) => quote(&node.content),
    };
    format!("{}{}", body, format_repeat(node.repeat))
}

fn format_repeat(repeat: Repeat) -> String {
    match repeat {
        Repeat::None => String::new(),
        Repeat::Range { min: 0, max: 1 } => "?".to_string(),
        Repeat::Range { min, max } if min == max => format!("{{{}}}", min),
        Repeat::Range { min, max } => format!("{{{},{}}}", min, max),
        Repeat::ZeroOrMore => "*".to_string(),
        Repeat::OneOrMore => "+".to_string(),
    }
}

fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for ch in text.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}
