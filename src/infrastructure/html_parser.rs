//! HTML parsing into the read-only document tree
//!
//! `scraper` (html5ever) does the actual parsing; its tree is then copied into a
//! [`DocumentTree`] so the rest of the crate only sees the [`DomNode`] view.
//! html5ever recovers from malformed markup, so parsing itself never fails.
//!
//! [`DomNode`]: crate::domain::document::DomNode

use scraper::{Html, Node};
use tracing::debug;

use crate::domain::document::{DocumentTree, NodeKind};

/// Parse a full HTML document
pub fn parse_document(body: &str) -> DocumentTree {
    let html = Html::parse_document(body);
    if !html.errors.is_empty() {
        debug!("HTML parser recovered from {} markup errors", html.errors.len());
    }
    to_document_tree(&html)
}

/// Parse an HTML fragment; the tree is rooted at a `Fragment` node
pub fn parse_fragment(body: &str) -> DocumentTree {
    to_document_tree(&Html::parse_fragment(body))
}

fn to_document_tree(html: &Html) -> DocumentTree {
    let root = html.tree.root();
    let root_kind = match root.value() {
        Node::Fragment => NodeKind::Fragment,
        _ => NodeKind::Document,
    };
    let mut tree = DocumentTree::new(root_kind);

    // Pre-order walk; `open` holds the chain of ancestors of the current node.
    let mut open = vec![(root, tree.root_id())];
    for node in root.descendants().skip(1) {
        let Some(parent) = node.parent() else {
            continue;
        };
        while let Some((candidate, _)) = open.last() {
            if *candidate == parent {
                break;
            }
            open.pop();
        }
        let Some(&(_, parent_id)) = open.last() else {
            continue;
        };

        let id = match node.value() {
            Node::Element(element) => {
                let attributes: Vec<(&str, &str)> = element.attrs().collect();
                tree.append_element(parent_id, element.name(), &attributes)
            }
            Node::Text(text) => tree.append_text(parent_id, &text.text),
            Node::Comment(comment) => tree.append_comment(parent_id, &comment.comment),
            Node::Doctype(_) => tree.append_leaf(parent_id, NodeKind::Doctype),
            Node::ProcessingInstruction(_) => tree.append_leaf(parent_id, NodeKind::ProcessingInstruction),
            Node::Document => tree.append_leaf(parent_id, NodeKind::Document),
            Node::Fragment => tree.append_leaf(parent_id, NodeKind::Fragment),
        };
        open.push((node, id));
    }

    debug!("Parsed document tree with {} nodes", tree.node_count());
    tree
}
