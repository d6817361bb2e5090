//! Runtime configuration from flags and environment variables.

use blogpost_core::default_log_level;
use clap::Parser;

/// Path value that selects a throwaway in-memory store.
pub const IN_MEMORY_DB: &str = ":memory:";

/// Blog posts and comments HTTP service.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "blogpost_server", version)]
pub struct ServerConfig {
    /// Address to bind.
    #[arg(long, env = "APP_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on.
    #[arg(long, env = "APP_PORT", default_value_t = 8080)]
    pub port: u16,

    /// SQLite database file, or `:memory:` for an ephemeral store.
    #[arg(long, env = "DB_LOCATION", default_value = "blogpost.sqlite3")]
    pub db_location: String,

    /// One of trace|debug|info|warn|error.
    #[arg(long, env = "LOG_LEVEL", default_value = default_log_level())]
    pub log_level: String,

    /// Absolute directory for rolling log files; stderr when unset.
    #[arg(long, env = "LOG_DIR")]
    pub log_dir: Option<String>,
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn uses_in_memory_db(&self) -> bool {
        self.db_location == IN_MEMORY_DB
    }
}

#[cfg(test)]
mod tests {
    use super::ServerConfig;
    use clap::Parser;

    #[test]
    fn flags_override_defaults() {
        let config = ServerConfig::try_parse_from([
            "blogpost_server",
            "--port",
            "9000",
            "--db-location",
            ":memory:",
            "--log-level",
            "warn",
        ])
        .unwrap();

        assert_eq!(config.bind_address(), "0.0.0.0:9000");
        assert!(config.uses_in_memory_db());
        assert_eq!(config.log_level, "warn");
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn invalid_port_is_rejected() {
        assert!(ServerConfig::try_parse_from(["blogpost_server", "--port", "http"]).is_err());
    }
}
