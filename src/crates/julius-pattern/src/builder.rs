//! Cursor that assembles a [`Tree`] while the parser walks the pattern
//!
//! The cursor always sits on the most recently finalized node. Items are
//! written into the cursor node when it is still a placeholder and into a
//! fresh sibling otherwise.

use crate::ast::{Node, NodeId, NodeKind, Repeat, Tree};
use crate::span::Span;

#[derive(Debug)]
pub struct AstBuilder {
    nodes: Vec<Node>,
    current: NodeId,
    /// Groups that have been entered but not yet closed
    open_groups: Vec<NodeId>,
}

impl Default for AstBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AstBuilder {
    pub fn new() -> Self {
        AstBuilder {
            nodes: vec![Node::placeholder(None, Span::default())],
            current: NodeId(0),
            open_groups: Vec::new(),
        }
    }

    pub fn current(&self) -> NodeId {
        self.current
    }

    pub fn depth(&self) -> usize {
        self.open_groups.len()
    }

    pub fn literal(&mut self, text: impl Into<String>, span: Span) -> NodeId {
        self.leaf(text.into(), NodeKind::Literal, span)
    }

    pub fn symbol(&mut self, name: impl Into<String>, span: Span) -> NodeId {
        self.leaf(name.into(), NodeKind::Symbol, span)
    }

    /// Open a group and move the cursor onto its (placeholder) first child
    pub fn enter_group(&mut self, span: Span) -> NodeId {
        let group = self.occupy(span);
        let child = self.push(Node::placeholder(Some(group), span));
        self.nodes[group.0].child = Some(child);
        self.open_groups.push(group);
        self.current = child;
        group
    }

    /// Close the innermost group; the group node becomes current again.
    /// A group whose children are all placeholders, e.g. `("")`, turns back
    /// into a placeholder. Returns `None` when no group is open.
    pub fn exit_group(&mut self, span: Span) -> Option<NodeId> {
        let group = self.open_groups.pop()?;
        let empty = self.children_are_placeholders(group);
        let node = &mut self.nodes[group.0];
        node.span = node.span.merge(span);
        if empty {
            node.child = None;
        }
        self.current = group;
        Some(group)
    }

    /// Record a `|`: the node before the separator ends its alternative
    pub fn alternative(&mut self) {
        self.nodes[self.current.0].alt_boundary = true;
    }

    pub fn set_repeat(&mut self, repeat: Repeat, span: Span) {
        let node = &mut self.nodes[self.current.0];
        node.repeat = repeat;
        node.span = node.span.merge(span);
    }

    pub fn finish(self) -> Tree {
        Tree::new(self.nodes, NodeId(0))
    }

    fn leaf(&mut self, content: String, kind: NodeKind, span: Span) -> NodeId {
        let id = self.occupy(span);
        let node = &mut self.nodes[id.0];
        node.content = content;
        node.kind = kind;
        id
    }

    /// Return the node the next item goes into, appending a sibling if needed
    fn occupy(&mut self, span: Span) -> NodeId {
        let current = &self.nodes[self.current.0];
        if current.is_occupied() {
            let parent = current.parent;
            let sibling = self.push(Node::placeholder(parent, span));
            self.nodes[self.current.0].next = Some(sibling);
            self.current = sibling;
        } else {
            // Marks left on an emptied node do not carry over to the new item
            let node = &mut self.nodes[self.current.0];
            node.span = span;
            node.repeat = Repeat::None;
            node.alt_boundary = false;
        }
        self.current
    }

    fn children_are_placeholders(&self, group: NodeId) -> bool {
        let mut cursor = self.nodes[group.0].child;
        while let Some(id) = cursor {
            let node = &self.nodes[id.0];
            if !node.is_placeholder() {
                return false;
            }
            cursor = node.next;
        }
        true
    }

    fn push(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }
}
