// Configuration module entry point
// Manages application configuration and runtime state

mod state;
mod types;

use config::builder::{ConfigBuilder, DefaultState};
use std::net::{SocketAddr, ToSocketAddrs};

// Re-export public types
pub use state::AppState;
pub use types::Config;

/// Config file used when no path is given on the command line
pub const DEFAULT_CONFIG_PATH: &str = "config";

impl Config {
    /// Built-in values; every other layer is applied on top of these
    fn with_defaults() -> Result<ConfigBuilder<DefaultState>, config::ConfigError> {
        config::Config::builder()
            .set_default("server.host", "localhost")?
            .set_default("server.port", 9001)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.server_name", "product-server/0.1")?
            .set_default("http.max_body_size", 1_048_576)? // 1MB
            .set_default("store.seed", true)
    }

    /// Load configuration from specified file path (without extension)
    /// The file is optional; `SERVER_*` environment variables override it
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        Self::with_defaults()?
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("SERVER")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }

    /// Built-in defaults only, independent of files and the environment
    #[cfg(test)]
    pub fn defaults() -> Result<Self, config::ConfigError> {
        Self::with_defaults()?.build()?.try_deserialize()
    }

    /// Load from the path given as the first CLI argument, or `config.toml`
    pub fn load() -> Result<Self, config::ConfigError> {
        let path = std::env::args()
            .nth(1)
            .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(&path)
    }

    /// Resolve `host:port`; hostnames such as `localhost` go through the system resolver
    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.to_socket_addrs()
            .map_err(|e| format!("Invalid address '{addr}': {e}"))?
            .next()
            .ok_or_else(|| format!("Address '{addr}' resolved to nothing"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::defaults().unwrap();
        assert_eq!(cfg.server.host, "localhost");
        assert_eq!(cfg.server.port, 9001);
        assert!(cfg.server.workers.is_none());
        assert_eq!(cfg.logging.access_log_format, "combined");
        assert_eq!(cfg.http.max_body_size, 1_048_576);
        assert!(cfg.store.seed);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = std::env::temp_dir().join(format!("product-server-cfg-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("settings.toml");
        std::fs::write(&path, "[store]\nseed = false\n\n[http]\nserver_name = \"custom/1\"\n").unwrap();

        let base = dir.join("settings");
        let cfg = Config::load_from(&base.to_string_lossy()).unwrap();
        assert!(!cfg.store.seed);
        assert_eq!(cfg.http.server_name, "custom/1");
        assert_eq!(cfg.performance.read_timeout, 30);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_socket_addr_resolves_localhost() {
        let cfg = Config::defaults().unwrap();
        let addr = cfg.get_socket_addr().unwrap();
        assert_eq!(addr.port(), 9001);
        assert!(addr.ip().is_loopback());
    }

    #[test]
    fn test_debug_level() {
        let mut cfg = Config::defaults().unwrap();
        assert!(!cfg.logging.debug_enabled());
        cfg.logging.level = "DEBUG".to_string();
        assert!(cfg.logging.debug_enabled());
    }
}
