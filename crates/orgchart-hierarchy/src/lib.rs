pub mod common;
pub mod employee;
pub mod index;
pub mod navigator;
pub mod rollup;
pub mod cycles;

pub use common::{display_name, VisitedSet};
pub use employee::Employee;
pub use index::{build_index, DirectoryIndex};
pub use navigator::{HierarchyView, Navigator, TreeNode};
pub use rollup::{team_summary, TeamSummary};
pub use cycles::detect_cycles;
