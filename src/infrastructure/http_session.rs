//! HTTP session used by the status probe
//!
//! One session pairs a `reqwest` transport with its own cookie jar. Sessions are
//! created per probe client and never shared, so cookies picked up by one client
//! are invisible to every other.

use reqwest::{Client, ClientBuilder, Response, StatusCode};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use url::Url;

use crate::infrastructure::config::{defaults, ProbeConfig};
use crate::infrastructure::probe_error::{ConfigError, FetchError};

/// Transport settings for an [`HttpSession`]
#[derive(Debug, Clone)]
pub struct HttpSessionConfig {
    /// Total request timeout in seconds
    pub timeout_seconds: u64,
    pub user_agent: String,
    pub follow_redirects: bool,
    /// Skip TLS certificate validation
    pub accept_invalid_certs: bool,
}

impl HttpSessionConfig {
    /// Transport settings from a probe configuration
    pub fn from_probe_config(config: &ProbeConfig) -> Self {
        Self {
            timeout_seconds: config.request_timeout_seconds,
            user_agent: config.user_agent.clone(),
            follow_redirects: config.follow_redirects,
            accept_invalid_certs: config.skip_certificate_validation,
        }
    }
}

impl Default for HttpSessionConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: defaults::REQUEST_TIMEOUT_SECONDS,
            user_agent: defaults::user_agent(),
            follow_redirects: defaults::FOLLOW_REDIRECTS,
            accept_invalid_certs: false,
        }
    }
}

/// Transport plus cookie store owned by a single probe client
#[derive(Debug)]
pub struct HttpSession {
    client: Client,
}

impl HttpSession {
    /// Build the session. No network I/O happens here.
    pub fn new(config: &HttpSessionConfig) -> Result<Self, ConfigError> {
        if config.accept_invalid_certs {
            warn!("⚠️ TLS certificate validation is disabled for this session");
        }

        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(&config.user_agent)
            .cookie_store(true)
            .gzip(true)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .redirect(if config.follow_redirects {
                reqwest::redirect::Policy::limited(defaults::MAX_REDIRECTS)
            } else {
                reqwest::redirect::Policy::none()
            })
            .build()
            .map_err(|e| ConfigError::HttpClient {
                reason: e.to_string(),
            })?;

        Ok(Self { client })
    }

    /// GET `url` and return the body of a `200 OK` response.
    ///
    /// Any other status fails without reading the body.
    pub async fn fetch_page(&self, url: &Url) -> Result<String, FetchError> {
        let response = self.send_get(url).await?;
        Self::read_body(url, response).await
    }

    /// Same as [`fetch_page`](Self::fetch_page), aborting as soon as `token` is
    /// cancelled (before the request, while waiting for headers, or while
    /// reading the body).
    pub async fn fetch_page_with_cancellation(
        &self,
        url: &Url,
        token: &CancellationToken,
    ) -> Result<String, FetchError> {
        if token.is_cancelled() {
            return Err(FetchError::Cancelled);
        }

        let response = tokio::select! {
            result = self.send_get(url) => result?,
            () = token.cancelled() => {
                warn!("🛑 HTTP request cancelled for URL: {}", url);
                return Err(FetchError::Cancelled);
            }
        };

        tokio::select! {
            result = Self::read_body(url, response) => result,
            () = token.cancelled() => {
                warn!("🛑 Response reading cancelled for URL: {}", url);
                Err(FetchError::Cancelled)
            }
        }
    }

    async fn send_get(&self, url: &Url) -> Result<Response, FetchError> {
        info!("🌐 HTTP GET: {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FetchError::from_request(url.as_str(), &e))?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!("❌ Unexpected HTTP status {} from {}", status, url);
            return Err(FetchError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        debug!("HTTP {} from {} (final URL: {})", status, url, response.url());
        Ok(response)
    }

    async fn read_body(url: &Url, response: Response) -> Result<String, FetchError> {
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::from_body(url.as_str(), &e))?;
        debug!("Read {} bytes from {}", body.len(), url);
        Ok(body)
    }
}
