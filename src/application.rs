//! Application layer: validated configuration and the status probe use case

pub mod session_probe;
pub mod validated_config;

pub use session_probe::ProbeClient;
pub use validated_config::ValidatedProbeConfig;
