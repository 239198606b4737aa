use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ZoneConfig {
    /// Zone file served by the companion binary
    #[serde(default)]
    pub path: Option<String>,
}
