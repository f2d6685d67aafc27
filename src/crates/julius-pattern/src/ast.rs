//! Arena tree for parsed patterns
//!
//! Nodes are stored in a flat `Vec` and linked by [`NodeId`] indices. A group
//! node points at the first node of its child chain; siblings are linked via
//! `next`. `parent` is only needed while building.

use crate::span::Span;
use serde::{Deserialize, Serialize};

/// Index of a node inside its [`Tree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub usize);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    /// Quoted text, emitted as a vocabulary entry
    #[default]
    Literal,
    /// `<name>` reference to a symbol section defined elsewhere
    Symbol,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Repeat {
    #[default]
    None,
    /// Between `min` and `max` occurrences, inclusive
    Range { min: u32, max: u32 },
    ZeroOrMore,
    OneOrMore,
}

impl Repeat {
    pub fn exactly(count: u32) -> Self {
        Repeat::Range { min: count, max: count }
    }

    pub fn optional() -> Self {
        Repeat::Range { min: 0, max: 1 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub content: String,
    pub kind: NodeKind,
    pub repeat: Repeat,
    pub child: Option<NodeId>,
    pub next: Option<NodeId>,
    pub parent: Option<NodeId>,
    /// Set on the last node of an alternative: the *next* sibling starts a new one
    pub alt_boundary: bool,
    pub span: Span,
}

impl Node {
    pub fn placeholder(parent: Option<NodeId>, span: Span) -> Self {
        Node {
            parent,
            span,
            ..Node::default()
        }
    }

    pub fn is_group(&self) -> bool {
        self.child.is_some()
    }

    pub fn is_leaf(&self) -> bool {
        !self.content.is_empty() && self.child.is_none()
    }

    /// Empty and childless; never emitted
    pub fn is_placeholder(&self) -> bool {
        self.content.is_empty() && self.child.is_none()
    }

    /// Whether a new item must go into a fresh sibling instead of this node
    pub fn is_occupied(&self) -> bool {
        !self.is_placeholder()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tree {
    pub(crate) nodes: Vec<Node>,
    pub(crate) first: NodeId,
}

impl Tree {
    pub(crate) fn new(nodes: Vec<Node>, first: NodeId) -> Self {
        Tree { nodes, first }
    }

    /// First node of the top-level chain
    pub fn first(&self) -> NodeId {
        self.first
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate a sibling chain starting at `start`
    pub fn siblings(&self, start: NodeId) -> Siblings<'_> {
        Siblings {
            tree: self,
            cursor: Some(start),
        }
    }

    /// Non-placeholder nodes of the top-level chain
    pub fn top_level(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.siblings(self.first).filter(|(_, node)| !node.is_placeholder())
    }
}

/// Iterator over a sibling chain; stops early on a dangling index
pub struct Siblings<'a> {
    tree: &'a Tree,
    cursor: Option<NodeId>,
}

impl<'a> Iterator for Siblings<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        let node = self.tree.get(id)?;
        self.cursor = node.next;
        Some((id, node))
    }
}
