//! Crate-level error type

use crate::config::ConfigError;
use crate::directory::DirectoryError;
use thiserror::Error;

/// Errors from setting up or refreshing a hierarchy service.
///
/// Hierarchy queries themselves never fail.
#[derive(Error, Debug)]
pub enum OrgChartError {
    #[error("Directory error: {0}")]
    Directory(#[from] DirectoryError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

pub type OrgChartResult<T> = Result<T, OrgChartError>;
