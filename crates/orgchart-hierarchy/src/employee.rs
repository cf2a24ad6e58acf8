//! Employee record
//!
//! The engine only reads `id` and `manager_id`; every other field is carried
//! through untouched for display.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::common::display_name;

/// A single employee as supplied by the directory.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Employee {
    /// Unique identifier within a snapshot
    pub id: String,
    /// Missing or `null` reads as `""`
    #[cfg_attr(feature = "serde", serde(default, deserialize_with = "null_as_empty"))]
    pub first_name: String,
    #[cfg_attr(feature = "serde", serde(default, deserialize_with = "null_as_empty"))]
    pub last_name: String,
    /// Manager reference. `None` and `Some("")` both mean "no manager".
    #[cfg_attr(feature = "serde", serde(default, alias = "manager"))]
    pub manager_id: Option<String>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub department: Option<String>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub designation: Option<String>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub status: Option<String>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub email: Option<String>,
}

#[cfg(feature = "serde")]
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Employee {
    pub fn new(
        id: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Employee {
            id: id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            ..Default::default()
        }
    }

    pub fn with_manager(mut self, manager_id: impl Into<String>) -> Self {
        self.manager_id = Some(manager_id.into());
        self
    }

    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    pub fn with_designation(mut self, designation: impl Into<String>) -> Self {
        self.designation = Some(designation.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Manager id, or `None` when absent or empty.
    pub fn manager(&self) -> Option<&str> {
        self.manager_id.as_deref().filter(|m| !m.is_empty())
    }

    pub fn display_name(&self) -> String {
        display_name(&self.first_name, &self.last_name)
    }

    /// True when the record names itself as its own manager.
    pub fn is_self_managed(&self) -> bool {
        self.manager() == Some(self.id.as_str())
    }
}
