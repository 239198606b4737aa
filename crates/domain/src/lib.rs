//! dnstest domain layer: fixture errors and companion-binary configuration
pub mod config;
pub mod errors;

pub use config::{CliOverrides, Config, ConfigError};
pub use errors::FixtureError;
