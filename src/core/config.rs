//! Configuration management for the tool hub.
//!
//! This module provides a centralized configuration structure that is
//! populated from defaults and then from `MCP_`-prefixed environment
//! variables (a `.env` file is honoured through `dotenvy`).

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use super::error::{Error, Result};
use crate::client::{RegistryOptions, ServersConfig, ToolNaming};

/// Default time allowed for launching a server, completing the handshake
/// and listing its tools.
pub const DEFAULT_STARTUP_TIMEOUT_SECS: u64 = 10;

/// Default time allowed for a single tool call.
pub const DEFAULT_CALL_TIMEOUT_SECS: u64 = 30;

/// Main configuration structure.
///
/// Shared by the server binaries (which only use `server` and `logging`) and
/// the client binary (which also uses `client` and `credentials`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Client registry configuration.
    pub client: ClientConfig,

    /// External API credentials configuration.
    pub credentials: CredentialsConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

/// Configuration for the tool client registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// JSON file mapping server names to launch configurations.
    /// If None, the bundled servers next to the running executable are used.
    pub servers_file: Option<PathBuf>,

    /// Seconds allowed for launch + handshake + tool listing per server,
    /// shared by the three steps.
    pub startup_timeout_secs: u64,

    /// Seconds allowed for a single tool call.
    pub call_timeout_secs: u64,

    /// How tool names from different servers are merged.
    pub tool_naming: ToolNaming,
}

/// Configuration for external API credentials.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct CredentialsConfig {
    /// API key for the language model driving the agent.
    pub model_api_key: Option<String>,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field(
                "model_api_key",
                &self.model_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            servers_file: None,
            startup_timeout_secs: DEFAULT_STARTUP_TIMEOUT_SECS,
            call_timeout_secs: DEFAULT_CALL_TIMEOUT_SECS,
            tool_naming: ToolNaming::default(),
        }
    }
}

impl ClientConfig {
    /// Registry options derived from this configuration.
    pub fn registry_options(&self) -> RegistryOptions {
        RegistryOptions {
            startup_timeout: Duration::from_secs(self.startup_timeout_secs),
            call_timeout: Duration::from_secs(self.call_timeout_secs),
            naming: self.tool_naming,
        }
    }

    /// Load the server map.
    ///
    /// Reads `servers_file` when set; otherwise points at the bundled
    /// `math-server` and `weather-server` binaries in the directory of the
    /// running executable.
    pub fn load_servers(&self) -> Result<ServersConfig> {
        match &self.servers_file {
            Some(path) => {
                info!("Loading server registry from {}", path.display());
                ServersConfig::from_file(path)
            }
            None => {
                let exe = std::env::current_exe()?;
                let dir = exe.parent().ok_or_else(|| {
                    Error::internal(format!("executable has no parent directory: {}", exe.display()))
                })?;
                debug!("Using bundled servers from {}", dir.display());
                Ok(ServersConfig::bundled(dir))
            }
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "mcp-tool-hub".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            client: ClientConfig::default(),
            credentials: CredentialsConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the reported server name.
    pub fn with_server_name(mut self, name: impl Into<String>) -> Self {
        self.server.name = name.into();
        self
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_LOG_LEVEL`, `MCP_CALL_TIMEOUT_SECS`.
    /// The model credential is read from `OPENAI_API_KEY`.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(timestamps) = std::env::var("MCP_LOG_TIMESTAMPS") {
            config.logging.with_timestamps = timestamps.to_lowercase() != "false" && timestamps != "0";
        }

        if let Ok(path) = std::env::var("MCP_SERVERS_FILE") {
            config.client.servers_file = Some(PathBuf::from(path));
        }

        if let Some(secs) = parse_env::<u64>("MCP_STARTUP_TIMEOUT_SECS")? {
            config.client.startup_timeout_secs = secs;
        }

        if let Some(secs) = parse_env::<u64>("MCP_CALL_TIMEOUT_SECS")? {
            config.client.call_timeout_secs = secs;
        }

        if let Some(naming) = parse_env::<ToolNaming>("MCP_TOOL_NAMING")? {
            config.client.tool_naming = naming;
        }

        if let Ok(api_key) = std::env::var("OPENAI_API_KEY") {
            config.credentials.model_api_key = Some(api_key);
        }

        Ok(config)
    }
}

/// Read and parse an optional environment variable.
fn parse_env<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| Error::config(format!("{key}={raw:?}: {e}"))),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_timeouts_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_CALL_TIMEOUT_SECS", "5");
            std::env::set_var("MCP_STARTUP_TIMEOUT_SECS", " 2 ");
        }
        let config = Config::from_env().unwrap();
        assert_eq!(config.client.call_timeout_secs, 5);
        assert_eq!(config.client.startup_timeout_secs, 2);
        let options = config.client.registry_options();
        assert_eq!(options.call_timeout, Duration::from_secs(5));
        unsafe {
            std::env::remove_var("MCP_CALL_TIMEOUT_SECS");
            std::env::remove_var("MCP_STARTUP_TIMEOUT_SECS");
        }
    }

    #[test]
    fn test_invalid_timeout_is_config_error() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_CALL_TIMEOUT_SECS", "soon");
        }
        let result = Config::from_env();
        unsafe {
            std::env::remove_var("MCP_CALL_TIMEOUT_SECS");
        }
        match result {
            Err(Error::Config(msg)) => assert!(msg.contains("MCP_CALL_TIMEOUT_SECS")),
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn test_tool_naming_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_TOOL_NAMING", "namespaced");
        }
        let config = Config::from_env().unwrap();
        unsafe {
            std::env::remove_var("MCP_TOOL_NAMING");
        }
        assert_eq!(config.client.tool_naming, ToolNaming::Namespaced);
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.client.call_timeout_secs, DEFAULT_CALL_TIMEOUT_SECS);
        assert_eq!(config.client.tool_naming, ToolNaming::Reject);
        assert!(config.client.servers_file.is_none());
        assert_eq!(config.with_server_name("Math").server.name, "Math");
    }

    #[test]
    fn test_credentials_redacted_in_debug() {
        let creds = CredentialsConfig {
            model_api_key: Some("super_secret_key".to_string()),
        };
        let debug_str = format!("{:?}", creds);
        assert!(debug_str.contains("REDACTED"));
        assert!(!debug_str.contains("super_secret_key"));
    }
}
