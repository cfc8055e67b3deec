//! Typed syntax tree consumed by the lint rules
//!
//! The host framework owns SQL tokenization and parsing; it hands over an
//! immutable tree of classified nodes built through [`SyntaxTreeBuilder`].
//! Rules only ever read the tree.

/// Classification of a syntax tree node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxNodeKind {
    Statement,
    Clause,
    Keyword,
    Whitespace,
    Identifier,
    ObjectReference,
    Symbol,
    Literal,
    /// Inline `REFERENCES ...` construct, tagged by grammars that do not
    /// spell out the FOREIGN KEY keywords next to the constraint name.
    ForeignKeyReference,
}

impl SyntaxNodeKind {
    pub fn is_whitespace(self) -> bool {
        matches!(self, SyntaxNodeKind::Whitespace)
    }

    pub fn is_keyword(self) -> bool {
        matches!(self, SyntaxNodeKind::Keyword)
    }
}

/// Index of a node within its [`SyntaxTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug)]
struct NodeData {
    kind: SyntaxNodeKind,
    text: String,
    offset: usize,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// An immutable tree of SQL syntax nodes.
///
/// Nodes are appended by the builder in document order, so node ids double
/// as a preorder ordering over the tree.
#[derive(Debug, Default)]
pub struct SyntaxTree {
    nodes: Vec<NodeData>,
}

impl SyntaxTree {
    /// Look up a node by id. Returns `None` for ids that do not belong to
    /// this tree, so callers can surface malformed-id errors instead of
    /// panicking.
    pub fn get(&self, id: NodeId) -> Option<SyntaxNode<'_>> {
        if id.index() < self.nodes.len() {
            Some(SyntaxNode { tree: self, id })
        } else {
            None
        }
    }

    pub fn root(&self) -> Option<SyntaxNode<'_>> {
        self.get(NodeId(0))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over every node in document (preorder) order
    pub fn preorder(&self) -> impl Iterator<Item = SyntaxNode<'_>> {
        (0..self.nodes.len() as u32).map(move |i| SyntaxNode {
            tree: self,
            id: NodeId(i),
        })
    }
}

/// A read-only view of one node in a [`SyntaxTree`].
///
/// Only constructed through bounds-checked lookups, so accessors can index
/// the arena directly.
#[derive(Debug, Clone, Copy)]
pub struct SyntaxNode<'a> {
    tree: &'a SyntaxTree,
    id: NodeId,
}

impl<'a> SyntaxNode<'a> {
    fn data(&self) -> &'a NodeData {
        &self.tree.nodes[self.id.index()]
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> SyntaxNodeKind {
        self.data().kind
    }

    /// Raw source text of this node. Container nodes carry no text of
    /// their own.
    pub fn text(&self) -> &'a str {
        &self.data().text
    }

    /// Uppercase-normalized text, used for keyword comparisons
    pub fn upper_text(&self) -> String {
        self.data().text.to_uppercase()
    }

    /// Byte offset of this node in the original source
    pub fn offset(&self) -> usize {
        self.data().offset
    }

    pub fn parent(&self) -> Option<SyntaxNode<'a>> {
        let tree = self.tree;
        self.data().parent.map(|id| SyntaxNode { tree, id })
    }

    /// Ordered children of this node
    pub fn children(&self) -> impl Iterator<Item = SyntaxNode<'a>> + 'a {
        let tree = self.tree;
        self.data().children.iter().map(move |&id| SyntaxNode { tree, id })
    }

    /// The next node in document order, crossing subtree boundaries
    pub fn next_in_document_order(&self) -> Option<SyntaxNode<'a>> {
        self.tree.get(NodeId(self.id.0 + 1))
    }
}

/// Builder used by the host to hand a parsed tree to the linter.
///
/// `open`/`close` bracket container nodes; `token` appends a leaf and
/// advances the byte offset by the token text, so every node knows its
/// source position.
#[derive(Debug, Default)]
pub struct SyntaxTreeBuilder {
    tree: SyntaxTree,
    stack: Vec<NodeId>,
    offset: usize,
}

impl SyntaxTreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, kind: SyntaxNodeKind, text: String) -> NodeId {
        let id = NodeId(self.tree.nodes.len() as u32);
        let parent = self.stack.last().copied();
        self.tree.nodes.push(NodeData {
            kind,
            text,
            offset: self.offset,
            parent,
            children: Vec::new(),
        });
        if let Some(parent) = parent {
            self.tree.nodes[parent.index()].children.push(id);
        }
        id
    }

    /// Open a container node; subsequent nodes become its children until
    /// the matching `close`
    pub fn open(&mut self, kind: SyntaxNodeKind) -> NodeId {
        let id = self.push(kind, String::new());
        self.stack.push(id);
        id
    }

    /// Append a leaf node carrying source text
    pub fn token(&mut self, kind: SyntaxNodeKind, text: &str) -> NodeId {
        let id = self.push(kind, text.to_string());
        self.offset += text.len();
        id
    }

    pub fn close(&mut self) {
        self.stack.pop();
    }

    pub fn finish(self) -> SyntaxTree {
        self.tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> SyntaxTree {
        let mut b = SyntaxTreeBuilder::new();
        b.open(SyntaxNodeKind::Statement);
        b.token(SyntaxNodeKind::Keyword, "CREATE");
        b.token(SyntaxNodeKind::Whitespace, " ");
        b.token(SyntaxNodeKind::Keyword, "TABLE");
        b.token(SyntaxNodeKind::Whitespace, " ");
        b.token(SyntaxNodeKind::ObjectReference, "person");
        b.close();
        b.finish()
    }

    #[test]
    fn test_document_order_and_offsets() {
        let tree = sample_tree();
        assert_eq!(tree.len(), 6);

        let texts: Vec<_> = tree.preorder().map(|n| n.text().to_string()).collect();
        assert_eq!(texts, vec!["", "CREATE", " ", "TABLE", " ", "person"]);

        let person = tree.preorder().find(|n| n.text() == "person").unwrap();
        assert_eq!(person.offset(), "CREATE TABLE ".len());
        assert_eq!(person.kind(), SyntaxNodeKind::ObjectReference);
    }

    #[test]
    fn test_parent_and_children() {
        let tree = sample_tree();
        let root = tree.root().unwrap();
        assert_eq!(root.kind(), SyntaxNodeKind::Statement);
        assert_eq!(root.children().count(), 5);
        assert!(root.parent().is_none());

        for child in root.children() {
            assert_eq!(child.parent().unwrap().id(), root.id());
        }
    }

    #[test]
    fn test_next_in_document_order() {
        let tree = sample_tree();
        let root = tree.root().unwrap();
        let first = root.next_in_document_order().unwrap();
        assert_eq!(first.text(), "CREATE");

        let last = tree.preorder().last().unwrap();
        assert!(last.next_in_document_order().is_none());
    }

    #[test]
    fn test_get_out_of_range() {
        let tree = sample_tree();
        assert!(tree.get(NodeId(999)).is_none());
    }

    #[test]
    fn test_upper_text() {
        let mut b = SyntaxTreeBuilder::new();
        b.token(SyntaxNodeKind::Keyword, "constraint");
        let tree = b.finish();
        assert_eq!(tree.root().unwrap().upper_text(), "CONSTRAINT");
    }

    #[test]
    fn test_empty_tree() {
        let tree = SyntaxTreeBuilder::new().finish();
        assert!(tree.is_empty());
        assert!(tree.root().is_none());
    }
}
