//! Server launch configuration.
//!
//! The registry file is a JSON object mapping server names to launch
//! configurations:
//!
//! ```json
//! {
//!     "Math": { "command": "math-server", "args": [], "transport": "stdio" },
//!     "Weather": { "command": "weather-server", "transport": "stdio" }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

use crate::core::error::{Error, Result};
use crate::domains::tools::ToolSet;

/// How the client talks to a server process.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    /// JSON-RPC over the child's stdin/stdout.
    #[default]
    Stdio,
}

/// How to launch one tool server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerLaunchConfig {
    /// Executable to run.
    pub command: String,

    /// Arguments, passed in order.
    #[serde(default)]
    pub args: Vec<String>,

    /// Transport used over the child's pipes.
    #[serde(default)]
    pub transport: TransportKind,

    /// Extra environment variables for the child.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,

    /// Working directory for the child.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwd: Option<PathBuf>,
}

impl ServerLaunchConfig {
    /// A stdio server launched as `command args...`.
    pub fn stdio<I, A>(command: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        Self {
            command: command.into(),
            args: args.into_iter().map(Into::into).collect(),
            transport: TransportKind::Stdio,
            env: BTreeMap::new(),
            cwd: None,
        }
    }

    /// Add an environment variable for the child.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Build the process command.
    ///
    /// The child is killed when its handle is dropped and its stderr is
    /// inherited so server logs reach the operator.
    pub fn to_command(&self) -> Command {
        let mut command = Command::new(&self.command);
        command
            .args(&self.args)
            .envs(&self.env)
            .stderr(Stdio::inherit())
            .kill_on_drop(true);
        if let Some(cwd) = &self.cwd {
            command.current_dir(cwd);
        }
        command
    }
}

/// Mapping of server name to launch configuration.
///
/// Server names are unique by construction. Iteration is in name order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServersConfig {
    servers: BTreeMap<String, ServerLaunchConfig>,
}

impl ServersConfig {
    /// An empty server map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a server.
    pub fn with_server(mut self, name: impl Into<String>, launch: ServerLaunchConfig) -> Self {
        self.insert(name, launch);
        self
    }

    /// Add (or replace) a server, returning the previous configuration.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        launch: ServerLaunchConfig,
    ) -> Option<ServerLaunchConfig> {
        self.servers.insert(name.into(), launch)
    }

    /// The bundled tool servers, expected as executables in `dir`.
    pub fn bundled(dir: &Path) -> Self {
        ToolSet::ALL.iter().fold(Self::new(), |config, set| {
            let exe = dir.join(format!("{}{}", set.binary_name(), std::env::consts::EXE_SUFFIX));
            config.with_server(
                set.server_name(),
                ServerLaunchConfig::stdio(exe.to_string_lossy(), Vec::<String>::new()),
            )
        })
    }

    /// Parse and validate a JSON server map.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| Error::config(format!("invalid server registry: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON server map file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("cannot read server registry {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    /// Reject blank server names and blank commands.
    pub fn validate(&self) -> Result<()> {
        for (name, launch) in &self.servers {
            if name.trim().is_empty() {
                return Err(Error::config("server name must not be empty"));
            }
            if launch.command.trim().is_empty() {
                return Err(Error::config(format!("server '{}' has an empty command", name)));
            }
        }
        Ok(())
    }

    /// Look up one server.
    pub fn get(&self, name: &str) -> Option<&ServerLaunchConfig> {
        self.servers.get(name)
    }

    /// Servers in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ServerLaunchConfig)> {
        self.servers.iter().map(|(name, launch)| (name.as_str(), launch))
    }

    pub fn len(&self) -> usize {
        self.servers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_python_launcher_entries() {
        let json = r#"{
            "Math": { "command": "python", "args": ["mathserver.py"], "transport": "stdio" },
            "Weather": { "command": "python", "args": ["weather.py"], "transport": "stdio" }
        }"#;
        let config = ServersConfig::from_json(json).unwrap();
        assert_eq!(config.len(), 2);

        let math = config.get("Math").unwrap();
        assert_eq!(math.command, "python");
        assert_eq!(math.args, vec!["mathserver.py"]);
        assert_eq!(math.transport, TransportKind::Stdio);
        assert!(math.env.is_empty());
    }

    #[test]
    fn test_defaults_for_optional_fields() {
        let config = ServersConfig::from_json(r#"{ "Weather": { "command": "weather-server" } }"#)
            .unwrap();
        let weather = config.get("Weather").unwrap();
        assert!(weather.args.is_empty());
        assert_eq!(weather.transport, TransportKind::Stdio);
        assert!(weather.cwd.is_none());
    }

    #[test]
    fn test_unknown_transport_rejected() {
        let err = ServersConfig::from_json(r#"{ "Math": { "command": "x", "transport": "sse" } }"#)
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_empty_command_rejected() {
        let err = ServersConfig::from_json(r#"{ "Math": { "command": "  " } }"#).unwrap_err();
        assert!(err.to_string().contains("Math"));
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "Math": {{ "command": "math-server", "env": {{ "MCP_LOG_LEVEL": "debug" }} }} }}"#)
            .unwrap();

        let config = ServersConfig::from_file(file.path()).unwrap();
        let math = config.get("Math").unwrap();
        assert_eq!(math.env.get("MCP_LOG_LEVEL").map(String::as_str), Some("debug"));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = ServersConfig::from_file(Path::new("/nonexistent/servers.json")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_bundled_servers() {
        let config = ServersConfig::bundled(Path::new("/opt/hub"));
        let names: Vec<_> = config.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Math", "Weather"]);
        assert!(config.get("Math").unwrap().command.contains("math-server"));
    }

    #[test]
    fn test_builder() {
        let launch = ServerLaunchConfig::stdio("math-server", ["--quiet"]).with_env("A", "1");
        let config = ServersConfig::new().with_server("Math", launch.clone());
        assert_eq!(config.get("Math"), Some(&launch));
        assert!(!config.is_empty());
    }
}
