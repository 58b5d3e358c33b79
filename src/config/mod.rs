//! Configuration module for the WorkOn mock backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Static key expected in the `KeyId` header (auth disabled when unset)
    pub key_id: Option<String>,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Whether to preload the RBGA-1 sample record on startup
    pub sample_data: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let key_id = env::var("WORKON_KEY_ID").ok();

        // 5001 is the port the original mock published to its clients
        let bind_addr = env::var("WORKON_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:5001".to_string())
            .parse()
            .expect("Invalid WORKON_BIND_ADDR format");

        let log_level = env::var("WORKON_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let sample_data = env::var("WORKON_SAMPLE_DATA")
            .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
            .unwrap_or(true);

        Self {
            key_id,
            bind_addr,
            log_level,
            sample_data,
        }
    }
}
