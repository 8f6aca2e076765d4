//! Server configuration module

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Port to listen on
    pub port: u16,

    /// Data directory for the file-backed store; unset means registrations
    /// live in process memory only
    pub data_dir: Option<PathBuf>,

    /// The fixed identifier the one supported hook is stored under
    pub hook_id: String,

    /// Maximum request body size in bytes
    pub max_request_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 9292,
            data_dir: None,
            hook_id: "1234".to_string(),
            max_request_size: 64 * 1024, // registration documents are tiny
        }
    }
}

impl ServerConfig {
    /// Load configuration from CLI arguments, environment variables and an
    /// optional JSON config file. CLI arguments take precedence over
    /// environment variables, which take precedence over the file.
    pub fn from_cli_and_env(cli_args: crate::cli::CliArgs) -> Result<Self> {
        let mut config = if let Some(path) = &cli_args.config_file {
            let contents = std::fs::read_to_string(path)?;
            serde_json::from_str(&contents)?
        } else {
            Self::default()
        };

        if let Some(port) = cli_args.port {
            config.port = port;
        } else if let Ok(port) = env::var("HOOKPOINT_PORT") {
            config.port = port.parse()?;
        }

        if let Some(data_dir) = cli_args.data_dir {
            config.data_dir = Some(data_dir);
        } else if let Ok(data_dir) = env::var("HOOKPOINT_DATA_DIR") {
            config.data_dir = Some(PathBuf::from(data_dir));
        }

        if let Some(hook_id) = cli_args.hook_id {
            config.hook_id = hook_id;
        } else if let Ok(hook_id) = env::var("HOOKPOINT_HOOK_ID") {
            config.hook_id = hook_id;
        }

        if let Some(max_size) = cli_args.max_request_size {
            config.max_request_size = max_size;
        } else if let Ok(max_size) = env::var("HOOKPOINT_MAX_REQUEST_SIZE") {
            config.max_request_size = max_size.parse()?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the routing layer could never address.
    pub fn validate(&self) -> Result<()> {
        if self.hook_id.is_empty() || !self.hook_id.bytes().all(|b| b.is_ascii_digit()) {
            bail!(
                "hook id must be a non-empty string of digits, got {:?}",
                self.hook_id
            );
        }
        if self.max_request_size == 0 {
            bail!("max request size must be non-zero");
        }
        Ok(())
    }
}
