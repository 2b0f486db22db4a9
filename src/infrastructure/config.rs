//! Configuration infrastructure
//!
//! Probe configuration can be built in code or loaded with the `config` crate
//! from a file (TOML/JSON/YAML, picked by extension) layered with `YADMIN_`
//! environment variables. Nested keys use a double underscore, e.g.
//! `YADMIN_LOGGING__LEVEL=debug`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::infrastructure::probe_error::ConfigError;

/// Environment variable prefix for every configuration key
pub const ENV_PREFIX: &str = "YADMIN";

/// Client configuration for one probe target
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Absolute URL of the admin panel entry page
    pub base_url: String,

    pub admin_login: String,

    pub admin_password: String,

    /// Accept invalid or self-signed TLS certificates
    pub skip_certificate_validation: bool,

    /// Deadline for the whole request, body included
    pub request_timeout_seconds: u64,

    pub user_agent: String,

    /// Follow up to `defaults::MAX_REDIRECTS` redirects
    pub follow_redirects: bool,

    /// Logging configuration (used by the binary)
    pub logging: LoggingConfig,
}

impl ProbeConfig {
    /// Configuration with the required fields set and defaults elsewhere
    pub fn new(base_url: impl Into<String>, admin_login: impl Into<String>, admin_password: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            admin_login: admin_login.into(),
            admin_password: admin_password.into(),
            ..Self::default()
        }
    }

    pub fn with_skip_certificate_validation(mut self, skip: bool) -> Self {
        self.skip_certificate_validation = skip;
        self
    }

    pub fn with_request_timeout_seconds(mut self, seconds: u64) -> Self {
        self.request_timeout_seconds = seconds;
        self
    }

    /// Load from a configuration file, overridden by `YADMIN_*` variables
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        info!("📁 Loading probe configuration from {}", path.display());

        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(Self::environment())
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Load from `YADMIN_*` environment variables only
    pub fn from_env() -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .add_source(Self::environment())
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    /// Whether a probe target has been configured at all
    pub fn has_target(&self) -> bool {
        !self.base_url.trim().is_empty()
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            admin_login: String::new(),
            admin_password: String::new(),
            skip_certificate_validation: false,
            request_timeout_seconds: defaults::REQUEST_TIMEOUT_SECONDS,
            user_agent: defaults::user_agent(),
            follow_redirects: defaults::FOLLOW_REDIRECTS,
            logging: LoggingConfig::default(),
        }
    }
}

impl fmt::Debug for ProbeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProbeConfig")
            .field("base_url", &self.base_url)
            .field("admin_login", &self.admin_login)
            .field("admin_password", &"<redacted>")
            .field("skip_certificate_validation", &self.skip_certificate_validation)
            .field("request_timeout_seconds", &self.request_timeout_seconds)
            .field("user_agent", &self.user_agent)
            .field("follow_redirects", &self.follow_redirects)
            .field("logging", &self.logging)
            .finish()
    }
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "error", "warn", "info", "debug", "trace"
    pub level: String,

    /// Enable JSON formatted logs
    pub json_format: bool,

    /// Enable console output (stderr, stdout is reserved for the status)
    pub console_output: bool,

    /// Enable file output
    pub file_output: bool,

    /// Directory for the log file; defaults to `logs/` next to the executable
    pub log_directory: Option<PathBuf>,

    pub file_name: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::LOG_LEVEL.to_string(),
            json_format: defaults::LOG_JSON_FORMAT,
            console_output: defaults::LOG_CONSOLE_OUTPUT,
            file_output: defaults::LOG_FILE_OUTPUT,
            log_directory: None,
            file_name: defaults::LOG_FILE_NAME.to_string(),
        }
    }
}

/// Default values
pub mod defaults {
    /// Request deadline in seconds; an unreachable host must not block forever
    pub const REQUEST_TIMEOUT_SECONDS: u64 = 5;

    pub const FOLLOW_REDIRECTS: bool = true;

    pub const MAX_REDIRECTS: usize = 10;

    pub const LOG_LEVEL: &str = "info";
    pub const LOG_JSON_FORMAT: bool = false;
    pub const LOG_CONSOLE_OUTPUT: bool = true;
    pub const LOG_FILE_OUTPUT: bool = false;
    pub const LOG_FILE_NAME: &str = "yadmin-probe.log";

    pub fn user_agent() -> String {
        format!("yadmin-probe/{}", env!("CARGO_PKG_VERSION"))
    }
}
