//! Error types for sadb-core

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Configuration error: {0}")]
    Config(#[from] sadb_config::ConfigError),

    #[error(transparent)]
    Adb(#[from] sadb_process::AdbError),

    #[error("Device serial must not be empty")]
    EmptyDeviceId,

    #[error("Unexpected output from `{command}`: {output}")]
    UnexpectedOutput { command: String, output: String },
}

impl CoreError {
    /// The underlying adb failure, if this error is one
    pub fn as_adb(&self) -> Option<&sadb_process::AdbError> {
        match self {
            Self::Adb(e) => Some(e),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
