mod errors;
mod logging;
mod root;
mod zone;

pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use root::{CliOverrides, Config};
pub use zone::ZoneConfig;
