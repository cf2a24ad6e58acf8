//! Team rollups over a resolved subtree

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::navigator::TreeNode;
use std::collections::BTreeMap;

/// Head-count figures for the team under one manager.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TeamSummary {
    pub manager_id: String,
    pub direct_reports: usize,
    /// All descendants, the manager excluded
    pub total_reports: usize,
    /// Levels below the manager (0 for an individual contributor)
    pub max_depth: usize,
    /// Members per department, the manager included. Missing department is `""`.
    pub departments: BTreeMap<String, usize>,
}

/// Summarise a subtree. Counts are taken from the tree as resolved, so each
/// employee is counted once even if the directory contains cycles.
pub fn team_summary(tree: &TreeNode) -> TeamSummary {
    let mut departments: BTreeMap<String, usize> = BTreeMap::new();
    let mut members = 0;
    let mut max_depth = 0;

    for node in tree.iter() {
        members += 1;
        max_depth = max_depth.max(node.depth - tree.depth);
        let department = node.employee.department.clone().unwrap_or_default();
        *departments.entry(department).or_insert(0) += 1;
    }

    TeamSummary {
        manager_id: tree.employee.id.clone(),
        direct_reports: tree.children.len(),
        total_reports: members - 1,
        max_depth,
        departments,
    }
}
