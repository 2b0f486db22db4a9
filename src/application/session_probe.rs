//! Status probe for an administrative web panel
//!
//! Fetches the panel's entry page and infers its login state from the password
//! fields rendered in the markup:
//!
//! 1. GET the configured base URL (200 only)
//! 2. parse the body into a document tree
//! 3. breadth-first search for `<input type="password" name=...>`
//! 4. reduce the match count into a [`Status`]

use std::fmt;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};
use url::Url;

use crate::application::validated_config::ValidatedProbeConfig;
use crate::domain::document::{element_path, trace_elements, DocumentNode, DocumentTree};
use crate::domain::matchers::is_login_password_input;
use crate::domain::status::Status;
use crate::domain::tree_matcher::{find_matching_nodes, find_matching_nodes_until};
use crate::infrastructure::config::ProbeConfig;
use crate::infrastructure::html_parser::parse_document;
use crate::infrastructure::http_session::HttpSession;
use crate::infrastructure::probe_error::{ConfigError, FetchError, ProbeResult};

/// Probe client bound to one admin panel.
///
/// Owns its HTTP session (transport and cookie jar) for its whole lifetime.
/// `reqwest::Client` is safe for concurrent use, so `status` may be called
/// from several tasks at once.
pub struct ProbeClient {
    config: ValidatedProbeConfig,
    session: HttpSession,
}

impl ProbeClient {
    /// Validate the configuration and build the session. No network I/O.
    pub fn new(config: ProbeConfig) -> Result<Self, ConfigError> {
        let config = ValidatedProbeConfig::from_probe_config(&config)?;
        let session = HttpSession::new(config.session())?;
        debug!("Created probe client {}", DisplayTarget(&config));
        Ok(Self { config, session })
    }

    pub const fn base_url(&self) -> &Url {
        self.config.base_url()
    }

    pub fn admin_login(&self) -> &str {
        self.config.admin_login()
    }

    pub const fn config(&self) -> &ValidatedProbeConfig {
        &self.config
    }

    /// Report whether the panel is initialized and whether this session is logged in
    pub async fn status(&self) -> ProbeResult<Status> {
        info!("🔍 Probing status of {}", self.base_url());
        let body = self.session.fetch_page(self.base_url()).await?;
        let status = detect_status(&body);
        self.log_outcome(&status);
        status
    }

    /// [`status`](Self::status) that gives up as soon as `token` is cancelled,
    /// including between node visits of the page traversal
    pub async fn status_with_cancellation(&self, token: CancellationToken) -> ProbeResult<Status> {
        info!("🔍 Probing status of {} (cancellable)", self.base_url());
        let body = self
            .session
            .fetch_page_with_cancellation(self.base_url(), &token)
            .await?;

        let status = detect_status_until(&body, || token.is_cancelled());
        self.log_outcome(&status);
        status
    }

    fn log_outcome(&self, status: &ProbeResult<Status>) {
        match status {
            Ok(status) => info!("✅ {} status: {}", self.base_url(), status),
            Err(e) => warn!("❌ {} probe failed ({}): {}", self.base_url(), e.kind(), e),
        }
    }
}

/// Infer the login state from a page body
pub fn detect_status(body: &str) -> ProbeResult<Status> {
    let tree = parse_document(body);
    let matches = find_matching_nodes(
        Some(tree.root()),
        Some(is_login_password_input::<DocumentNode<'_>>),
    );
    reduce_matches(&tree, &matches)
}

/// [`detect_status`] that consults `should_stop` once before parsing and then
/// between node visits, failing with [`FetchError::Cancelled`] when it says so
fn detect_status_until<S: FnMut() -> bool>(body: &str, mut should_stop: S) -> ProbeResult<Status> {
    if should_stop() {
        return Err(FetchError::Cancelled.into());
    }

    let tree = parse_document(body);
    let matches = find_matching_nodes_until(
        Some(tree.root()),
        is_login_password_input::<DocumentNode<'_>>,
        should_stop,
    )
    .ok_or(FetchError::Cancelled)?;
    reduce_matches(&tree, &matches)
}

fn reduce_matches(tree: &DocumentTree, matches: &[DocumentNode<'_>]) -> ProbeResult<Status> {
    trace_elements(&tree.root());
    for node in matches {
        trace!("password input at {}", element_path(node));
    }
    debug!("Found {} login password input(s)", matches.len());
    Status::from_password_input_count(matches.len())
}

struct DisplayTarget<'a>(&'a ValidatedProbeConfig);

impl fmt::Display for DisplayTarget<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{user: \"{}\", baseUrl: \"{}\"}}",
            self.0.admin_login(),
            self.0.base_url()
        )
    }
}

impl fmt::Display for ProbeClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&DisplayTarget(&self.config), f)
    }
}

impl fmt::Debug for ProbeClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProbeClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
