//! Validated probe configuration
//!
//! Turns a user supplied [`ProbeConfig`] into the settings a client runs with.
//! Validation happens once, at client construction.

use std::fmt;
use url::Url;

use crate::infrastructure::config::ProbeConfig;
use crate::infrastructure::http_session::HttpSessionConfig;
use crate::infrastructure::probe_error::ConfigError;

/// Probe settings that passed validation
///
/// Built once when a client is constructed and never modified afterwards.
/// Credentials are stored trimmed.
#[derive(Clone)]
pub struct ValidatedProbeConfig {
    base_url: Url,
    admin_login: String,
    admin_password: String,
    session: HttpSessionConfig,
}

impl ValidatedProbeConfig {
    /// Login and password must be non-blank after trimming and the base URL
    /// must parse as an absolute URL.
    pub fn from_probe_config(config: &ProbeConfig) -> Result<Self, ConfigError> {
        let admin_login = config.admin_login.trim();
        if admin_login.is_empty() {
            return Err(ConfigError::EmptyLogin);
        }

        let admin_password = config.admin_password.trim();
        if admin_password.is_empty() {
            return Err(ConfigError::EmptyPassword);
        }

        let base_url = Url::parse(config.base_url.trim()).map_err(|e| ConfigError::InvalidUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;

        let mut session = HttpSessionConfig::from_probe_config(config);
        // A zero timeout would fail every request
        session.timeout_seconds = session.timeout_seconds.max(1);

        Ok(Self {
            base_url,
            admin_login: admin_login.to_string(),
            admin_password: admin_password.to_string(),
            session,
        })
    }

    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn admin_login(&self) -> &str {
        &self.admin_login
    }

    pub fn admin_password(&self) -> &str {
        &self.admin_password
    }

    pub const fn session(&self) -> &HttpSessionConfig {
        &self.session
    }

    /// Log the effective settings (password excluded)
    pub fn log_config(&self) {
        tracing::info!("🔧 ValidatedProbeConfig applied:");
        tracing::info!("   base_url: {}", self.base_url);
        tracing::info!("   admin_login: {}", self.admin_login);
        tracing::info!("   request_timeout: {}s", self.session.timeout_seconds);
        tracing::info!("   skip_certificate_validation: {}", self.session.accept_invalid_certs);
        tracing::info!("   follow_redirects: {}", self.session.follow_redirects);
    }
}

impl fmt::Debug for ValidatedProbeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatedProbeConfig")
            .field("base_url", &self.base_url.as_str())
            .field("admin_login", &self.admin_login)
            .field("admin_password", &"<redacted>")
            .field("session", &self.session)
            .finish()
    }
}
