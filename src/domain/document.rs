//! Read-only document tree model
//!
//! The parsed page is held in an arena: every node lives in one `Vec` and
//! links to its relatives by index (`first_child`, `next_sibling`, `parent`).
//! Ownership stays strictly top-down; the parent index is a plain back-reference
//! used for diagnostics only.
//!
//! Traversal code does not depend on the arena directly but on the [`DomNode`]
//! trait, so matchers work over any tree that can describe its nodes.

use std::fmt;
use tracing::trace;

/// Index of a node inside a [`DocumentTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Kind of a document node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Root of a parsed document
    Document,
    /// Root of a parsed fragment
    Fragment,
    Doctype,
    Element,
    Text,
    Comment,
    ProcessingInstruction,
}

/// Capabilities a tree node must expose to be searched by the tree matcher.
///
/// Implementations are cheap handles (`Clone`) onto an immutable tree.
pub trait DomNode: Clone {
    type Children: Iterator<Item = Self>;

    fn kind(&self) -> NodeKind;

    /// Tag name for element nodes, `None` for everything else
    fn tag_name(&self) -> Option<&str>;

    /// Value of the first attribute named `key`
    fn attribute(&self, key: &str) -> Option<&str>;

    /// Children in document order (first child, then its next siblings)
    fn children(&self) -> Self::Children;

    /// Non-owning link to the parent node
    fn parent(&self) -> Option<Self>;

    fn is_element(&self) -> bool {
        self.kind() == NodeKind::Element
    }

    fn has_attribute(&self, key: &str) -> bool {
        self.attribute(key).is_some()
    }
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    tag: Option<String>,
    attributes: Vec<(String, String)>,
    text: Option<String>,
    parent: Option<NodeId>,
    first_child: Option<NodeId>,
    last_child: Option<NodeId>,
    next_sibling: Option<NodeId>,
}

impl NodeData {
    const fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            tag: None,
            attributes: Vec::new(),
            text: None,
            parent: None,
            first_child: None,
            last_child: None,
            next_sibling: None,
        }
    }
}

/// Immutable-after-construction document tree
#[derive(Debug, Clone)]
pub struct DocumentTree {
    nodes: Vec<NodeData>,
}

impl DocumentTree {
    /// Create a tree that holds only a root node of the given kind
    pub fn new(root_kind: NodeKind) -> Self {
        Self {
            nodes: vec![NodeData::new(root_kind)],
        }
    }

    /// Empty document (a single `Document` root)
    pub fn document() -> Self {
        Self::new(NodeKind::Document)
    }

    pub const fn root_id(&self) -> NodeId {
        NodeId(0)
    }

    pub fn root(&self) -> DocumentNode<'_> {
        self.node(self.root_id())
    }

    /// Handle onto the node with the given id.
    ///
    /// Ids are only produced by this tree, so they are always in range.
    pub fn node(&self, id: NodeId) -> DocumentNode<'_> {
        debug_assert!(id.0 < self.nodes.len());
        DocumentNode { tree: self, id }
    }

    /// Number of nodes, root included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Append an element as the last child of `parent`
    pub fn append_element(&mut self, parent: NodeId, tag: &str, attributes: &[(&str, &str)]) -> NodeId {
        let mut data = NodeData::new(NodeKind::Element);
        data.tag = Some(tag.to_string());
        data.attributes = attributes
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        self.append(parent, data)
    }

    /// Append a text node as the last child of `parent`
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        let mut data = NodeData::new(NodeKind::Text);
        data.text = Some(text.to_string());
        self.append(parent, data)
    }

    /// Append a comment node as the last child of `parent`
    pub fn append_comment(&mut self, parent: NodeId, comment: &str) -> NodeId {
        let mut data = NodeData::new(NodeKind::Comment);
        data.text = Some(comment.to_string());
        self.append(parent, data)
    }

    /// Append a childless node of any non-element kind (doctype, processing instruction)
    pub fn append_leaf(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        self.append(parent, NodeData::new(kind))
    }

    fn append(&mut self, parent: NodeId, mut data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        data.parent = Some(parent);
        self.nodes.push(data);

        match self.nodes[parent.0].last_child {
            Some(last) => self.nodes[last.0].next_sibling = Some(id),
            None => self.nodes[parent.0].first_child = Some(id),
        }
        self.nodes[parent.0].last_child = Some(id);
        id
    }
}

/// Borrowed handle onto one node of a [`DocumentTree`]
#[derive(Clone, Copy)]
pub struct DocumentNode<'a> {
    tree: &'a DocumentTree,
    id: NodeId,
}

impl<'a> DocumentNode<'a> {
    pub const fn id(&self) -> NodeId {
        self.id
    }

    fn data(&self) -> &'a NodeData {
        &self.tree.nodes[self.id.0]
    }

    /// Attributes in source order
    pub fn attributes(&self) -> impl Iterator<Item = (&'a str, &'a str)> {
        self.data()
            .attributes
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Character data of text and comment nodes
    pub fn text(&self) -> Option<&'a str> {
        self.data().text.as_deref()
    }
}

impl PartialEq for DocumentNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for DocumentNode<'_> {}

impl fmt::Debug for DocumentNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.data();
        let mut s = f.debug_struct("DocumentNode");
        s.field("id", &self.id.0).field("kind", &data.kind);
        if let Some(tag) = &data.tag {
            s.field("tag", tag);
        }
        if !data.attributes.is_empty() {
            s.field("attributes", &data.attributes);
        }
        s.finish()
    }
}

/// Iterator over the children of a [`DocumentNode`], following sibling links
pub struct Children<'a> {
    tree: &'a DocumentTree,
    next: Option<NodeId>,
}

impl<'a> Iterator for Children<'a> {
    type Item = DocumentNode<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        self.next = self.tree.nodes[id.0].next_sibling;
        Some(self.tree.node(id))
    }
}

impl<'a> DomNode for DocumentNode<'a> {
    type Children = Children<'a>;

    fn kind(&self) -> NodeKind {
        self.data().kind
    }

    fn tag_name(&self) -> Option<&str> {
        self.data().tag.as_deref()
    }

    fn attribute(&self, key: &str) -> Option<&str> {
        self.data()
            .attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn children(&self) -> Children<'a> {
        Children {
            tree: self.tree,
            next: self.data().first_child,
        }
    }

    fn parent(&self) -> Option<Self> {
        self.data().parent.map(|id| self.tree.node(id))
    }
}

/// Dotted path of element tags from the outermost element ancestor down to
/// `node`, e.g. `html.body.form.input`. Non-element ancestors are skipped.
pub fn element_path<N: DomNode>(node: &N) -> String {
    let mut segments: Vec<String> = Vec::new();
    if let Some(tag) = node.tag_name() {
        segments.push(tag.to_string());
    }

    let mut current = node.parent();
    while let Some(ancestor) = current {
        if let Some(tag) = ancestor.tag_name() {
            segments.push(tag.to_string());
        }
        current = ancestor.parent();
    }

    segments.reverse();
    segments.join(".")
}

/// Log every element under `root` with its path and attributes, in document order.
///
/// Diagnostic only; emits nothing unless `trace` is enabled for this module.
/// The walk keeps its own stack, so nesting depth is bounded by memory only.
pub fn trace_elements(root: &DocumentNode<'_>) {
    if !tracing::enabled!(tracing::Level::TRACE) {
        return;
    }

    // Tags of the element ancestors of the node being visited
    let mut path: Vec<&str> = Vec::new();
    // Pending nodes with the number of element ancestors each one has
    let mut pending = vec![(*root, 0usize)];

    while let Some((node, depth)) = pending.pop() {
        path.truncate(depth);

        let data = node.data();
        if let Some(tag) = data.tag.as_deref() {
            path.push(tag);
            let attributes: Vec<(&str, &str)> = node.attributes().collect();
            trace!("{} -> {:?}", TagPath(&path), attributes);
        }

        let child_depth = path.len();
        let children: Vec<DocumentNode<'_>> = node.children().collect();
        pending.extend(children.into_iter().rev().map(|child| (child, child_depth)));
    }
}

/// Dotted tag path, formatted only when the event is actually written
struct TagPath<'p, 'a>(&'p [&'a str]);

impl fmt::Display for TagPath<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, tag) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(tag)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing::Level;
    use tracing_subscriber::filter::LevelFilter;
    use tracing_subscriber::fmt::MakeWriter;
    use tracing_subscriber::layer::SubscriberExt;

    fn login_form() -> (DocumentTree, NodeId) {
        let mut tree = DocumentTree::document();
        let root = tree.root_id();
        let html = tree.append_element(root, "html", &[]);
        let body = tree.append_element(html, "body", &[]);
        let form = tree.append_element(body, "form", &[("action", "/login")]);
        let input = tree.append_element(form, "input", &[("type", "password"), ("name", "pwd")]);
        (tree, input)
    }

    #[test]
    fn test_children_follow_sibling_links_in_order() {
        let mut tree = DocumentTree::document();
        let root = tree.root_id();
        let a = tree.append_element(root, "a", &[]);
        let t = tree.append_text(root, "hello");
        let c = tree.append_comment(root, "note");

        let ids: Vec<NodeId> = tree.root().children().map(|n| n.id()).collect();
        assert_eq!(ids, vec![a, t, c]);
        assert_eq!(tree.node(t).text(), Some("hello"));
        assert_eq!(tree.node(c).kind(), NodeKind::Comment);
    }

    #[test]
    fn test_attribute_lookup_first_match_wins() {
        let mut tree = DocumentTree::document();
        let root = tree.root_id();
        let input = tree.append_element(root, "input", &[("type", "password"), ("type", "text")]);

        let node = tree.node(input);
        assert_eq!(node.attribute("type"), Some("password"));
        assert!(node.has_attribute("type"));
        assert!(!node.has_attribute("name"));
    }

    #[test]
    fn test_non_element_nodes_have_no_tag() {
        let mut tree = DocumentTree::document();
        let root = tree.root_id();
        let text = tree.append_text(root, "x");

        assert_eq!(tree.root().tag_name(), None);
        assert_eq!(tree.node(text).tag_name(), None);
        assert!(!tree.node(text).is_element());
    }

    #[test]
    fn test_parent_link_points_back() {
        let (tree, input) = login_form();
        let form = tree.node(input).parent().unwrap();
        assert_eq!(form.tag_name(), Some("form"));
        assert!(tree.root().parent().is_none());
    }

    #[test]
    fn test_element_path_skips_document_root() {
        let (tree, input) = login_form();
        assert_eq!(element_path(&tree.node(input)), "html.body.form.input");
        assert_eq!(element_path(&tree.root()), "");
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'w> MakeWriter<'w> for CapturedLogs {
        type Writer = Self;

        fn make_writer(&'w self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_trace_elements_logs_paths_in_document_order() {
        let (mut tree, input) = login_form();
        let form = tree.node(input).parent().unwrap().id();
        tree.append_element(form, "button", &[]);

        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_max_level(Level::TRACE)
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, || trace_elements(&tree.root()));

        let output = logs.contents();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].ends_with("html -> []"));
        assert!(lines[2].ends_with(r#"html.body.form -> [("action", "/login")]"#));
        assert!(lines[3].ends_with(r#"html.body.form.input -> [("type", "password"), ("name", "pwd")]"#));
        assert!(lines[4].ends_with("html.body.form.button -> []"));
    }

    #[test]
    fn test_trace_elements_handles_deep_nesting() {
        let mut tree = DocumentTree::document();
        let mut parent = tree.root_id();
        for _ in 0..200_000 {
            parent = tree.append_element(parent, "div", &[]);
        }
        tree.append_element(parent, "input", &[("type", "password"), ("name", "pwd")]);

        let subscriber = tracing_subscriber::registry().with(LevelFilter::TRACE);
        tracing::subscriber::with_default(subscriber, || trace_elements(&tree.root()));
    }
}
