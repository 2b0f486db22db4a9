//! Infrastructure layer for configuration, HTTP transport, HTML parsing and logging

pub mod config;
pub mod html_parser;
pub mod http_session;
pub mod logging;
pub mod probe_error;

// Re-export commonly used items
pub use self::config::{LoggingConfig, ProbeConfig};
pub use self::html_parser::parse_document;
pub use self::http_session::{HttpSession, HttpSessionConfig};
pub use self::logging::{get_log_directory, init_logging_with_config};
pub use self::probe_error::{ConfigError, FetchError, ProbeError, ProbeResult};
