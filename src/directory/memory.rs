//! In-memory directory source

use super::{DirectoryResult, DirectorySnapshot, DirectorySource};
use orgchart_hierarchy::Employee;
use parking_lot::RwLock;

/// Directory held in memory. `replace` swaps in a new employee list, which
/// the next `load` (and therefore the next service refresh) picks up.
#[derive(Debug, Default)]
pub struct StaticDirectory {
    employees: RwLock<Vec<Employee>>,
}

impl StaticDirectory {
    pub fn new(employees: Vec<Employee>) -> Self {
        Self {
            employees: RwLock::new(employees),
        }
    }

    pub fn replace(&self, employees: Vec<Employee>) {
        *self.employees.write() = employees;
    }

    /// Copy of the current list. Never fails.
    pub fn snapshot(&self) -> DirectorySnapshot {
        DirectorySnapshot::new(self.employees.read().clone(), self.describe())
    }
}

impl DirectorySource for StaticDirectory {
    fn load(&self) -> DirectoryResult<DirectorySnapshot> {
        Ok(self.snapshot())
    }

    fn describe(&self) -> String {
        "static".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_returns_copy() {
        let source = StaticDirectory::new(vec![Employee::new("E1", "Ann", "Lee")]);
        let first = source.load().unwrap();

        source.replace(vec![]);
        let second = source.load().unwrap();

        assert_eq!(first.len(), 1);
        assert!(second.is_empty());
        assert_eq!(second.source, "static");
    }
}
