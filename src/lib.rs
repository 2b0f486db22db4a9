//! yadmin probe - login state detection for administrative web panels
//!
//! Fetches an admin panel's entry page over a per-client HTTP session and
//! reports whether the application is initialized and whether the session is
//! logged in, by searching the parsed markup for a login password field.

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::session_probe::{detect_status, ProbeClient};
pub use domain::document::{DocumentNode, DocumentTree, DomNode, NodeKind};
pub use domain::status::Status;
pub use domain::tree_matcher::{find_matching_nodes, find_matching_nodes_until};
pub use infrastructure::config::ProbeConfig;
pub use infrastructure::probe_error::{ConfigError, FetchError, ProbeError, ProbeResult};
