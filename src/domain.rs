//! Domain layer: document tree model, tree search and status rules

pub mod document;
pub mod matchers;
pub mod status;
pub mod tree_matcher;

pub use document::{element_path, DocumentNode, DocumentTree, DomNode, NodeId, NodeKind};
pub use matchers::is_login_password_input;
pub use status::Status;
pub use tree_matcher::{find_matching_nodes, find_matching_nodes_until};
