//! Directory index builder
//!
//! Derives the two lookup structures every traversal runs on:
//! - `by_id`: id -> Employee, an insertion-ordered arena (last write wins)
//! - `reports_of`: manager id -> arena positions of direct reports, sorted
//!   by case-insensitive display name with id as tie-break
//!
//! Building never fails. Self-references, cycles and dangling manager ids
//! are stored exactly as the records state them.

use crate::common::sibling_key;
use crate::employee::Employee;
use indexmap::IndexMap;
use rustc_hash::{FxBuildHasher, FxHashMap};
use tracing::debug;

/// Immutable lookup structures built from one directory snapshot.
///
/// Safe to share between threads; a refreshed snapshot produces a new index
/// instead of mutating this one.
#[derive(Debug, Clone, Default)]
pub struct DirectoryIndex {
    /// Employee arena keyed by id, in first-seen order of each id
    by_id: IndexMap<String, Employee, FxBuildHasher>,
    /// Manager id -> positions in `by_id` of its direct reports
    reports_of: FxHashMap<String, Vec<usize>>,
    /// Records that replaced an earlier record with the same id
    duplicate_ids: usize,
}

/// Build a `DirectoryIndex` from any sequence of employees.
pub fn build_index<I>(employees: I) -> DirectoryIndex
where
    I: IntoIterator<Item = Employee>,
{
    let employees = employees.into_iter();
    let mut by_id: IndexMap<String, Employee, FxBuildHasher> =
        IndexMap::with_capacity_and_hasher(employees.size_hint().0, FxBuildHasher);
    let mut duplicate_ids = 0;

    for employee in employees {
        if by_id.insert(employee.id.clone(), employee).is_some() {
            duplicate_ids += 1;
        }
    }

    // Only surviving records are bucketed, so a replaced duplicate never shows up as a report.
    let mut reports_of: FxHashMap<String, Vec<usize>> = FxHashMap::default();
    for (pos, employee) in by_id.values().enumerate() {
        if let Some(manager) = employee.manager() {
            reports_of.entry(manager.to_string()).or_default().push(pos);
        }
    }

    for bucket in reports_of.values_mut() {
        bucket.sort_by_cached_key(|&pos| {
            let employee = &by_id[pos];
            sibling_key(&employee.display_name(), &employee.id)
        });
    }

    debug!(
        employees = by_id.len(),
        managers = reports_of.len(),
        duplicate_ids,
        "directory index built"
    );

    DirectoryIndex {
        by_id,
        reports_of,
        duplicate_ids,
    }
}

impl DirectoryIndex {
    /// Number of distinct employee ids
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&Employee> {
        self.by_id.get(id)
    }

    /// All employees in first-seen order.
    pub fn employees(&self) -> impl ExactSizeIterator<Item = &Employee> + '_ {
        self.by_id.values()
    }

    /// Direct reports of `manager_id` in sibling order. Empty when none.
    pub fn reports_of<'a>(
        &'a self,
        manager_id: &str,
    ) -> impl ExactSizeIterator<Item = &'a Employee> + 'a {
        self.report_positions(manager_id)
            .iter()
            .map(move |&pos| &self.by_id[pos])
    }

    /// Number of ids that have at least one direct report.
    pub fn manager_count(&self) -> usize {
        self.reports_of.len()
    }

    /// How many input records were overwritten by a later record with the same id.
    pub fn duplicate_count(&self) -> usize {
        self.duplicate_ids
    }

    pub(crate) fn report_positions(&self, manager_id: &str) -> &[usize] {
        self.reports_of
            .get(manager_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub(crate) fn position(&self, id: &str) -> Option<usize> {
        self.by_id.get_index_of(id)
    }

    pub(crate) fn at(&self, pos: usize) -> &Employee {
        &self.by_id[pos]
    }
}
