//! Error types for probe configuration, page fetching and status detection

use thiserror::Error;

/// Invalid or missing client configuration, raised before any network I/O
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("empty login")]
    EmptyLogin,

    #[error("empty password")]
    EmptyPassword,

    #[error("invalid url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("failed to build HTTP client: {reason}")]
    HttpClient { reason: String },

    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

/// Failure while retrieving or reading the probed page
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request to {url} failed: {reason}")]
    Request { url: String, reason: String },

    #[error("unexpected status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("failed to read response body from {url}: {reason}")]
    Body { url: String, reason: String },

    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("probe cancelled")]
    Cancelled,
}

impl FetchError {
    /// Classify a transport error from `reqwest`
    pub fn from_request(url: &str, error: &reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout {
                url: url.to_string(),
            }
        } else {
            Self::Request {
                url: url.to_string(),
                reason: error.to_string(),
            }
        }
    }

    /// Classify a body read error from `reqwest`
    pub fn from_body(url: &str, error: &reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout {
                url: url.to_string(),
            }
        } else {
            Self::Body {
                url: url.to_string(),
                reason: error.to_string(),
            }
        }
    }
}

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("more than one password input detected ({count} found)")]
    AmbiguousPage { count: usize },
}

impl ProbeError {
    /// Short category name used in logs
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Fetch(_) => "fetch",
            Self::AmbiguousPage { .. } => "ambiguous_page",
        }
    }
}

pub type ProbeResult<T> = Result<T, ProbeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_messages() {
        assert_eq!(ConfigError::EmptyLogin.to_string(), "empty login");
        assert_eq!(ConfigError::EmptyPassword.to_string(), "empty password");
        let err = ConfigError::InvalidUrl {
            url: "nope".to_string(),
            reason: "relative URL without a base".to_string(),
        };
        assert!(err.to_string().starts_with("invalid url"));
    }

    #[test]
    fn test_unexpected_status_message_carries_code() {
        let err = FetchError::UnexpectedStatus {
            status: 404,
            url: "http://localhost/".to_string(),
        };
        assert!(err.to_string().starts_with("unexpected status 404"));
    }

    #[test]
    fn test_probe_error_wraps_transparently() {
        let err: ProbeError = ConfigError::EmptyPassword.into();
        assert_eq!(err.to_string(), "empty password");
        assert_eq!(err.kind(), "config");

        let err: ProbeError = FetchError::Cancelled.into();
        assert_eq!(err.kind(), "fetch");

        assert_eq!(ProbeError::AmbiguousPage { count: 2 }.kind(), "ambiguous_page");
    }
}
