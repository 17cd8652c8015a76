//! Plain-text outline rendering of an [`Ast`](crate::ast::Ast).
//!
//! Used by the CLI `outline` command and by snapshot tests. Only nodes that
//! opt in via [`Outlinable`] contribute a labeled line; expression internals
//! are elided so outlines stay readable.

use crate::ast::{Ast, Node, NodeId, NodeKind};
use std::fmt::Write;

/// Capability trait for nodes that appear in outlines.
///
/// This is the one genuinely polymorphic seam in the tree; everything else
/// dispatches on [`NodeKind`] directly.
pub trait Outlinable {
    /// Label shown in the outline, or `None` to skip the node (children are
    /// still visited).
    fn outline_label(&self) -> Option<String>;
}

impl Outlinable for Node {
    fn outline_label(&self) -> Option<String> {
        match &self.kind {
            NodeKind::Module(_) => Some("module".to_string()),
            NodeKind::MainBlock(_) => Some("main".to_string()),
            NodeKind::FunctionBlock(f) => Some(format!("function {}", f.name)),
            NodeKind::ReportBlock(f) => Some(format!("report {}", f.name)),
            NodeKind::Globals(_) => Some("globals".to_string()),
            NodeKind::Define { .. } => Some("define".to_string()),
            NodeKind::VariableDef(v) => Some(format!(
                "variables {}",
                v.names.iter().map(|(n, _)| n.as_str()).collect::<Vec<_>>().join(", ")
            )),
            NodeKind::ConstantDef { .. } => Some("constant".to_string()),
            NodeKind::ConstantItem(c) => Some(format!("constant {}", c.name)),
            NodeKind::TypeDef { .. } => Some("type".to_string()),
            NodeKind::TypeItem(t) => Some(format!("type {}", t.name)),
            NodeKind::Record(_) => Some("record".to_string()),
            NodeKind::DeclareCursor(d) => Some(format!("cursor {}", d.name)),
            kind if kind.is_expression() => None,
            NodeKind::TypeReference(_) | NodeKind::ArrayType { .. } | NodeKind::RecordField(_) => None,
            kind => Some(kind.label().to_string()),
        }
    }
}

/// Render the whole tree as an indented outline.
pub fn render(ast: &Ast) -> String {
    let mut out = String::new();
    if let Some(root) = ast.root() {
        render_node(ast, root, 0, &mut out);
    }
    out
}

fn render_node(ast: &Ast, id: NodeId, depth: usize, out: &mut String) {
    let node = ast.node(id);
    let next_depth = match node.outline_label() {
        Some(label) => {
            for _ in 0..depth {
                out.push_str("  ");
            }
            let _ = writeln!(
                out,
                "{} [{}..{}]{}",
                label,
                node.span.start,
                node.span.end,
                if node.complete { "" } else { " (incomplete)" }
            );
            depth + 1
        }
        None => depth,
    };
    for &child in ast.children(id) {
        render_node(ast, child, next_depth, out);
    }
}
