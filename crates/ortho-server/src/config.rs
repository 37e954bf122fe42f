//! Server configuration, loaded from a YAML file.

use crate::error::{JobError, JobResult};
use ortho_model::Checkpoints;
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

fn default_bind_addr() -> SocketAddr {
    // Local-only by default; expose deliberately.
    SocketAddr::from(([127, 0, 0, 1], 8800))
}

fn default_model_command() -> PathBuf {
    PathBuf::from("tgnet-infer")
}

fn default_checkpoints() -> Checkpoints {
    Checkpoints::new(
        PathBuf::from("ckpts/tgnet_fps.h5"),
        PathBuf::from("ckpts/tgnet_bdl.h5"),
    )
}

/// The external segmentation model: how to invoke it and which
/// checkpoints it loads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelConfig {
    /// The inference command, invoked once per scan.
    #[serde(default = "default_model_command")]
    pub command: PathBuf,
    /// Checkpoint files passed to the command.
    #[serde(default = "default_checkpoints")]
    pub checkpoints: Checkpoints,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            command: default_model_command(),
            checkpoints: default_checkpoints(),
        }
    }
}

/// Top-level daemon configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Address the WebSocket endpoint listens on.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,
    /// Segmentation model settings.
    #[serde(default)]
    pub model: ModelConfig,
    /// Accelerator device count override. `None` detects from the
    /// environment.
    #[serde(default)]
    pub devices: Option<u32>,
    /// Binary re-executed as the worker for dual-scan jobs. `None`
    /// means the current executable.
    #[serde(default)]
    pub worker_binary: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            model: ModelConfig::default(),
            devices: None,
            worker_binary: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// [`JobError::Config`] when the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> JobResult<Self> {
        let raw = fs::read_to_string(path).map_err(|e| JobError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        serde_yaml::from_str(&raw).map_err(|e| JobError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load from `path` when given, otherwise use defaults.
    ///
    /// # Errors
    ///
    /// [`JobError::Config`] when a given file cannot be loaded.
    pub fn load(path: Option<&Path>) -> JobResult<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }
}
