//! Element/text tree for the tagtree parser.
//!
//! This crate provides the arena-based tree that the streaming parser builds
//! and callers inspect or render back to markup.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all relationships.
//! Children are owned by the arena and listed in document order by their
//! parent; each node keeps a lookup-only link back to its parent. Ownership
//! only flows parent to child, so there are no reference cycles.

use std::collections::BTreeMap;
use std::fmt;

/// Map of attribute names to values for an element.
///
/// Keys are unique and the last assignment wins. Iteration is lexicographic
/// by name, which is the order [`DomTree::render`] writes them in.
pub type AttributesMap = BTreeMap<String, String>;

/// A type-safe index into the tree.
///
/// `NodeId` provides O(1) access to any node without borrowing issues. Ids
/// are stable for the life of the tree: nodes are never removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NodeId(pub usize);

/// A single node: its payload plus parent/child links.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Node {
    /// Element or text payload.
    pub kind: NodeKind,

    /// The enclosing element, or `None` for the root. Fixed at creation.
    pub parent: Option<NodeId>,

    /// Children in document order. Always empty for text nodes.
    pub children: Vec<NodeId>,
}

/// The two node variants.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "lowercase"))]
pub enum NodeKind {
    /// A named container with attributes and ordered children.
    Element(ElementData),
    /// Literal character data. Never empty when built by the parser.
    Text {
        /// The raw, unescaped text.
        data: String,
    },
}

/// Element-specific data.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ElementData {
    /// The name given in the opening tag.
    pub tag_name: String,
    /// Attributes set while the opening tag was read.
    pub attrs: AttributesMap,
}

impl ElementData {
    /// Create element data with no attributes.
    #[must_use]
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            attrs: AttributesMap::new(),
        }
    }

    /// Look up an attribute value by name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }
}

/// Arena-based element/text tree.
///
/// All nodes live in one contiguous vector and refer to each other by
/// [`NodeId`]. The first element created without a parent is the root.
/// `PartialEq` compares structure and content, which is what makes two
/// parses of the same document comparable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DomTree {
    nodes: Vec<Node>,
    root: Option<NodeId>,
}

impl DomTree {
    /// Create an empty tree.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
        }
    }

    /// The root element, once one has been created.
    #[must_use]
    pub const fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get the number of nodes in the tree.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether no node has been created yet.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn alloc(&mut self, kind: NodeKind, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent,
            children: Vec::new(),
        });
        id
    }

    /// Allocate an element whose parent link points at `parent`.
    ///
    /// The node is not listed among `parent`'s children until
    /// [`append_child`](Self::append_child) is called. An element created
    /// with no parent while the tree has no root becomes the root.
    pub fn create_element(
        &mut self,
        parent: Option<NodeId>,
        tag_name: impl Into<String>,
    ) -> NodeId {
        let id = self.alloc(NodeKind::Element(ElementData::new(tag_name)), parent);
        if parent.is_none() && self.root.is_none() {
            self.root = Some(id);
        }
        id
    }

    /// Allocate a text node whose parent link points at `parent`.
    pub fn create_text(&mut self, parent: NodeId, data: impl Into<String>) -> NodeId {
        let data = data.into();
        debug_assert!(!data.is_empty(), "text nodes are never empty");
        self.alloc(NodeKind::Text { data }, Some(parent))
    }

    /// Appends `child` as the last child of `parent`.
    ///
    /// `child` must have been created with `parent` as its parent. Ids that
    /// do not name a node of this tree are ignored.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        debug_assert_eq!(
            self.parent(child),
            Some(parent),
            "parent link set at creation"
        );
        if let Some(node) = self.nodes.get_mut(parent.0) {
            node.children.push(child);
        }
    }

    /// Insert or overwrite an attribute on an element.
    ///
    /// Names and values may be any string, including empty. Ids that do not
    /// name an element are ignored.
    pub fn set_attribute(
        &mut self,
        element: NodeId,
        name: impl Into<String>,
        value: impl Into<String>,
    ) {
        if let Some(Node {
            kind: NodeKind::Element(data),
            ..
        }) = self.nodes.get_mut(element.0)
        {
            let _previous = data.attrs.insert(name.into(), value.into());
        }
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// The nearest ancestor that is an element, or `None` for the root.
    #[must_use]
    pub fn parent_element(&self, id: NodeId) -> Option<NodeId> {
        self.ancestors(id).find(|&a| self.as_element(a).is_some())
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Get element data if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.kind {
            NodeKind::Element(data) => Some(data),
            NodeKind::Text { .. } => None,
        })
    }

    /// Get text content if this node is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.kind {
            NodeKind::Text { data } => Some(data.as_str()),
            NodeKind::Element(_) => None,
        })
    }

    /// Look up an attribute on an element node.
    #[must_use]
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.as_element(id).and_then(|e| e.attribute(name))
    }

    /// Concatenated text of `id` and all its descendants, in document order.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        // Explicit stack so arbitrarily deep trees cannot overflow.
        let mut pending = vec![id];
        while let Some(id) = pending.pop() {
            match self.get(id).map(|n| &n.kind) {
                Some(NodeKind::Text { data }) => out.push_str(data),
                Some(NodeKind::Element(_)) => pending.extend(self.children(id).iter().rev()),
                None => {}
            }
        }
    }

    /// A [`fmt::Display`] adapter writing the canonical markup for `id`.
    #[must_use]
    pub const fn display(&self, id: NodeId) -> NodeDisplay<'_> {
        NodeDisplay { tree: self, id }
    }

    /// Canonical markup for `id` and its subtree.
    ///
    /// Elements render as `<name a="v">children</name>` with attributes in
    /// name order; text renders raw. Boolean attributes come out expanded
    /// (`<a foo>` parses to `foo="foo"`), so the result is a normalized form
    /// of the input rather than a byte-for-byte copy. Unknown ids render as
    /// the empty string.
    #[must_use]
    pub fn render(&self, id: NodeId) -> String {
        self.display(id).to_string()
    }
}

/// Renders a node and its subtree as markup. See [`DomTree::render`].
#[derive(Debug, Clone, Copy)]
pub struct NodeDisplay<'a> {
    tree: &'a DomTree,
    id: NodeId,
}

/// One pending step of the render walk.
enum RenderStep {
    Open(NodeId),
    Close(NodeId),
}

impl fmt::Display for NodeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Explicit stack so arbitrarily deep trees cannot overflow.
        let mut steps = vec![RenderStep::Open(self.id)];
        while let Some(step) = steps.pop() {
            match step {
                RenderStep::Open(id) => match self.tree.get(id).map(|n| &n.kind) {
                    Some(NodeKind::Element(data)) => {
                        write!(f, "<{}", data.tag_name)?;
                        for (name, value) in &data.attrs {
                            write!(f, " {name}=\"{value}\"")?;
                        }
                        f.write_str(">")?;
                        steps.push(RenderStep::Close(id));
                        steps.extend(
                            self.tree
                                .children(id)
                                .iter()
                                .rev()
                                .map(|&c| RenderStep::Open(c)),
                        );
                    }
                    Some(NodeKind::Text { data }) => f.write_str(data)?,
                    None => {}
                },
                RenderStep::Close(id) => {
                    if let Some(data) = self.tree.as_element(id) {
                        write!(f, "</{}>", data.tag_name)?;
                    }
                }
            }
        }
        Ok(())
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    tree: &'a DomTree,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}
