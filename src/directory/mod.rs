//! Employee directory collaborator
//!
//! The hierarchy engine never owns employee data. A `DirectorySource` hands
//! over a complete snapshot on request; the engine indexes it and throws the
//! previous index away. Sources are never polled.

pub mod file;
pub mod memory;

pub use file::{FileDirectory, SnapshotFormat};
pub use memory::StaticDirectory;

use chrono::{DateTime, Utc};
use orgchart_hierarchy::Employee;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a directory snapshot
#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("I/O error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON snapshot error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML snapshot error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Cannot infer snapshot format of {}", .0.display())]
    UnsupportedFormat(PathBuf),
}

pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// A full set of employee records taken at one point in time
#[derive(Debug, Clone)]
pub struct DirectorySnapshot {
    pub employees: Vec<Employee>,
    /// Where the snapshot came from (file path, "static", ...)
    pub source: String,
    pub loaded_at: DateTime<Utc>,
}

impl DirectorySnapshot {
    pub fn new(employees: Vec<Employee>, source: impl Into<String>) -> Self {
        Self {
            employees,
            source: source.into(),
            loaded_at: Utc::now(),
        }
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }
}

/// Supplier of directory snapshots.
pub trait DirectorySource: Send + Sync {
    /// Produce a fresh, complete snapshot.
    fn load(&self) -> DirectoryResult<DirectorySnapshot>;

    /// Short label used in logs
    fn describe(&self) -> String;
}

impl<T: DirectorySource + ?Sized> DirectorySource for std::sync::Arc<T> {
    fn load(&self) -> DirectoryResult<DirectorySnapshot> {
        (**self).load()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
