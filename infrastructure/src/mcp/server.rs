//! Launch parameters for the MCP search server process.

use crate::config::{ConfigLoader, FileConfig};
use std::collections::BTreeMap;
use std::process::Stdio;
use tokio::process::Command;

/// How to start the search server.
///
/// The child inherits this process's environment with `env` layered on top.
#[derive(Debug, Clone, PartialEq)]
pub struct McpServerParams {
    pub command: String,
    pub args: Vec<String>,
    pub env: BTreeMap<String, String>,
}

impl Default for McpServerParams {
    fn default() -> Self {
        Self {
            command: "npx".to_string(),
            args: vec!["-y".to_string(), "tavily-mcp@latest".to_string()],
            env: BTreeMap::new(),
        }
    }
}

impl McpServerParams {
    pub fn new(command: impl Into<String>, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            command: command.into(),
            args: args.into_iter().map(Into::into).collect(),
            env: BTreeMap::new(),
        }
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn with_api_key(self, api_key: impl Into<String>) -> Self {
        self.with_env(ConfigLoader::API_KEY_ENV, api_key)
    }

    /// Build params from the `[server]` and `[tavily]` sections
    pub fn from_config(config: &FileConfig) -> Self {
        let mut params = Self {
            command: config.server.command.clone(),
            args: config.server.args.clone(),
            env: config.server.env.clone(),
        };
        if let Some(key) = config.tavily.api_key() {
            params = params.with_api_key(key);
        }
        params
    }

    /// Command line for logs; environment values are never shown
    pub fn display_command(&self) -> String {
        std::iter::once(self.command.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// A ready-to-spawn command with piped stdio
    pub(crate) fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.command);
        cmd.args(&self.args)
            .envs(&self.env)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        // Linux: request kernel to send SIGTERM to child when parent dies.
        // This catches cases where Drop doesn't run (SIGKILL, OOM kill).
        #[cfg(target_os = "linux")]
        unsafe {
            cmd.pre_exec(|| {
                libc::prctl(libc::PR_SET_PDEATHSIG, libc::SIGTERM);
                Ok(())
            });
        }

        cmd
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = McpServerParams::default();
        assert_eq!(params.display_command(), "npx -y tavily-mcp@latest");
        assert!(params.env.is_empty());
    }

    #[test]
    fn test_from_config_passes_api_key() {
        let mut config = FileConfig::default();
        config.tavily.api_key = Some(" tvly-abc ".to_string());
        config
            .server
            .env
            .insert("HTTPS_PROXY".to_string(), "http://proxy:3128".to_string());

        let params = McpServerParams::from_config(&config);
        assert_eq!(params.env["TAVILY_API_KEY"], "tvly-abc");
        assert_eq!(params.env["HTTPS_PROXY"], "http://proxy:3128");
        assert!(!params.display_command().contains("tvly-abc"));
    }

    #[test]
    fn test_from_config_without_key() {
        let params = McpServerParams::from_config(&FileConfig::default());
        assert!(!params.env.contains_key("TAVILY_API_KEY"));
        assert_eq!(params, McpServerParams::default());
    }
}
