use std::path::PathBuf;
use thiserror::Error;

use crate::client::error::ClientError;
use crate::config::error::ConfigError;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("error running {binary:?}")]
    Spawn {
        binary: String,
        source: std::io::Error,
    },

    #[error("`{command}` failed with {status}")]
    Failed { command: String, status: String },

    #[error("error reading bytecode module {path:?}")]
    ModuleRead {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("coin max supply overflows u64: {max_supply} * 10^{decimals}")]
    MaxSupplyOverflow { max_supply: u64, decimals: u8 },

    #[error("serde json serialization error")]
    JsonSerialize { source: serde_json::Error },

    #[error(transparent)]
    BuildError(#[from] BuildError),

    #[error(transparent)]
    ConfigError(#[from] ConfigError),

    #[error(transparent)]
    ClientError(#[from] ClientError),
}

impl ProcessError {
    pub fn json(e: serde_json::Error) -> ProcessError {
        ProcessError::JsonSerialize { source: e }
    }
}
