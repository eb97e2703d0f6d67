use std::result::Result as StdResult;

use thiserror::Error;

/// Unified error type for the cost model, the vehicle store and configuration.
#[derive(Error, Debug, PartialEq)]
pub enum CostError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("Degenerate horizon: {0}")]
    DivisionDegenerate(String),
    #[error("Vehicle not found: {0}")]
    VehicleNotFound(String),
    #[error("Vehicle already exists: {0}")]
    DuplicateVehicle(String),
    #[error("Persistence error: {0}")]
    StorageError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = StdResult<T, CostError>;

impl CostError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        CostError::InvalidParameter(message.into())
    }
}

/// User-facing CLI error wrapper.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] CostError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Command failed: {0}")]
    Command(String),
}

impl From<std::io::Error> for CostError {
    fn from(err: std::io::Error) -> Self {
        CostError::StorageError(err.to_string())
    }
}

impl From<serde_json::Error> for CostError {
    fn from(err: serde_json::Error) -> Self {
        CostError::StorageError(err.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Core(CostError::from(err))
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Input(err.to_string())
    }
}
