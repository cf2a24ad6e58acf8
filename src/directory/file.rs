//! File-backed directory snapshots (JSON or YAML)
//!
//! A document is either a bare list of employees or an object with an
//! `employees` list. Unknown record fields are ignored.

use super::{DirectoryError, DirectoryResult, DirectorySnapshot, DirectorySource};
use crate::config::DirectoryConfig;
use orgchart_hierarchy::Employee;
use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Serialization format of a snapshot document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotFormat {
    Json,
    Yaml,
}

impl SnapshotFormat {
    /// Infer the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(SnapshotFormat::Json),
            "yaml" | "yml" => Some(SnapshotFormat::Yaml),
            _ => None,
        }
    }
}

/// Either a bare employee list or an object carrying an `employees` list.
///
/// The shape is chosen from the first token rather than by trial, so an
/// error inside a record keeps its position in the document.
struct SnapshotDocument(Vec<Employee>);

impl<'de> Deserialize<'de> for SnapshotDocument {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(SnapshotVisitor)
    }
}

struct SnapshotVisitor;

impl<'de> Visitor<'de> for SnapshotVisitor {
    type Value = SnapshotDocument;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a list of employees or an object with an `employees` list")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut employees = Vec::with_capacity(seq.size_hint().unwrap_or(0).min(4096));
        while let Some(employee) = seq.next_element()? {
            employees.push(employee);
        }
        Ok(SnapshotDocument(employees))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut employees = None;
        while let Some(key) = map.next_key::<String>()? {
            if key == "employees" {
                if employees.is_some() {
                    return Err(de::Error::duplicate_field("employees"));
                }
                employees = Some(map.next_value()?);
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }
        employees
            .map(SnapshotDocument)
            .ok_or_else(|| de::Error::missing_field("employees"))
    }
}

/// Parse a snapshot document from text.
pub fn parse_snapshot(text: &str, format: SnapshotFormat) -> DirectoryResult<Vec<Employee>> {
    let document: SnapshotDocument = match format {
        SnapshotFormat::Json => serde_json::from_str(text)?,
        SnapshotFormat::Yaml => serde_yaml::from_str(text)?,
    };
    Ok(document.0)
}

/// Directory read from a file on every load
#[derive(Debug, Clone)]
pub struct FileDirectory {
    path: PathBuf,
    format: Option<SnapshotFormat>,
}

impl FileDirectory {
    /// Format is inferred from the extension at load time.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            format: None,
        }
    }

    pub fn with_format(mut self, format: SnapshotFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Build from the `directory` config section; `None` when no path is set.
    pub fn from_config(config: &DirectoryConfig) -> Option<Self> {
        let path = config.path.as_ref()?;
        Some(Self {
            path: path.clone(),
            format: config.format,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn format(&self) -> DirectoryResult<SnapshotFormat> {
        self.format
            .or_else(|| SnapshotFormat::from_path(&self.path))
            .ok_or_else(|| DirectoryError::UnsupportedFormat(self.path.clone()))
    }
}

impl DirectorySource for FileDirectory {
    fn load(&self) -> DirectoryResult<DirectorySnapshot> {
        let format = self.format()?;
        let text = std::fs::read_to_string(&self.path).map_err(|source| DirectoryError::Io {
            path: self.path.clone(),
            source,
        })?;
        let employees = parse_snapshot(&text, format)?;
        debug!(path = %self.path.display(), ?format, employees = employees.len(), "snapshot read");
        Ok(DirectorySnapshot::new(employees, self.describe()))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
