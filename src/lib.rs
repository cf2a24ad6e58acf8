//! OrgChart
//!
//! Turns a flat employee directory, where each record may name a manager,
//! into navigable reporting structures: the manager chain above an employee,
//! the team tree below them, and head-count rollups.
//!
//! Directory data is treated as untrusted. Self-managed employees, manager
//! cycles, dangling manager ids and duplicate ids all degrade to smaller
//! results instead of errors.
//!
//! # Layout
//!
//! - `orgchart-hierarchy`: the pure engine (index builder and navigator)
//! - `directory`: snapshot sources (JSON/YAML files, in-memory lists)
//! - `service`: refreshable service publishing immutable indices
//! - `config` / `logging`: YAML configuration and tracing setup
//!
//! ## Example Usage
//!
//! ```rust
//! use orgchart::{Employee, HierarchyService};
//!
//! let service = HierarchyService::from_employees(vec![
//!     Employee::new("M1", "Alice", "Root"),
//!     Employee::new("E1", "Bob", "Mid").with_manager("M1"),
//!     Employee::new("E2", "Carol", "Leaf").with_manager("E1"),
//! ]);
//!
//! let view = service.focus_view("E2").unwrap();
//! let chain: Vec<String> = view.ancestor_chain.iter().map(|e| e.display_name()).collect();
//! assert_eq!(chain, vec!["Alice Root", "Bob Mid"]);
//! assert!(view.subtree.children.is_empty());
//! ```

#![warn(clippy::all)]

pub mod config;
pub mod directory;
pub mod error;
pub mod logging;
pub mod service;

pub use config::{
    ConfigError, ConfigResult, DirectoryConfig, HierarchyConfig, LoggingConfig, OrgChartConfig,
};
pub use directory::{
    DirectoryError, DirectoryResult, DirectorySnapshot, DirectorySource, FileDirectory,
    SnapshotFormat, StaticDirectory,
};
pub use error::{OrgChartError, OrgChartResult};
pub use service::{HierarchyService, PublishedIndex};

// Engine types
pub use orgchart_hierarchy::{
    build_index, detect_cycles, display_name, team_summary, DirectoryIndex, Employee,
    HierarchyView, Navigator, TeamSummary, TreeNode,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
