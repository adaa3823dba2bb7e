//! Configuration model loaded from external sources.

use serde::Deserialize;

fn default_request_timeout_secs() -> u64 {
    10
}

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    /// Base URL of the Birthy backend API.
    pub backend_url: String,
    pub templates_dir: String,
    /// Signing key for flash message cookies, at least 64 bytes.
    pub secret: String,
    /// File holding the persisted API key and cached admin flag.
    pub state_file: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}
