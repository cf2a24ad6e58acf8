//! Refreshable hierarchy service
//!
//! Holds the currently published index and rebuilds it from the directory
//! source on `refresh`. Publication swaps an `Arc`, so a reader that already
//! holds the previous snapshot keeps a complete, consistent index while new
//! readers see the new one.

use crate::config::{ConfigError, HierarchyConfig, OrgChartConfig};
use crate::directory::{
    DirectoryResult, DirectorySnapshot, DirectorySource, FileDirectory, StaticDirectory,
};
use crate::error::OrgChartResult;
use chrono::{DateTime, Utc};
use orgchart_hierarchy::{
    build_index, DirectoryIndex, Employee, HierarchyView, Navigator, TeamSummary, TreeNode,
};
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use tracing::{info, warn};

/// An index together with where and when its snapshot was loaded
#[derive(Debug)]
pub struct PublishedIndex {
    pub index: DirectoryIndex,
    pub source: String,
    pub loaded_at: DateTime<Utc>,
}

impl PublishedIndex {
    fn from_snapshot(snapshot: DirectorySnapshot) -> Self {
        Self {
            index: build_index(snapshot.employees),
            source: snapshot.source,
            loaded_at: snapshot.loaded_at,
        }
    }

    pub fn navigator(&self) -> Navigator<'_> {
        Navigator::new(&self.index)
    }
}

/// Directory source plus the most recently published index
pub struct HierarchyService {
    source: Box<dyn DirectorySource>,
    config: HierarchyConfig,
    current: RwLock<Arc<PublishedIndex>>,
    /// Held across load and publish so refreshes run one at a time
    refresh_guard: Mutex<()>,
}

impl HierarchyService {
    /// Load the first snapshot from `source` and publish it.
    pub fn new(
        source: impl DirectorySource + 'static,
        config: HierarchyConfig,
    ) -> DirectoryResult<Self> {
        let snapshot = source.load()?;
        Ok(Self::with_snapshot(Box::new(source), config, snapshot))
    }

    /// Service over a fixed in-memory employee list.
    pub fn from_employees(employees: Vec<Employee>) -> Self {
        let source = StaticDirectory::new(employees);
        let snapshot = source.snapshot();
        Self::with_snapshot(Box::new(source), HierarchyConfig::default(), snapshot)
    }

    fn with_snapshot(
        source: Box<dyn DirectorySource>,
        config: HierarchyConfig,
        snapshot: DirectorySnapshot,
    ) -> Self {
        let published = Arc::new(PublishedIndex::from_snapshot(snapshot));
        announce(&config, &published);
        Self {
            source,
            config,
            current: RwLock::new(published),
            refresh_guard: Mutex::new(()),
        }
    }

    /// Service reading the snapshot file named in `config.directory`.
    pub fn from_config(config: &OrgChartConfig) -> OrgChartResult<Self> {
        let source = FileDirectory::from_config(&config.directory).ok_or_else(|| {
            ConfigError::Invalid("directory.path is not set".to_string())
        })?;
        Ok(Self::new(source, config.hierarchy.clone())?)
    }

    /// Reload the directory and publish a freshly built index.
    ///
    /// On failure the previously published index stays current. Concurrent
    /// calls are serialized, so the last snapshot loaded is the one left
    /// published. Readers are never blocked by the load.
    pub fn refresh(&self) -> DirectoryResult<Arc<PublishedIndex>> {
        let _guard = self.refresh_guard.lock();
        let snapshot = self.source.load()?;
        Ok(self.publish(snapshot))
    }

    fn publish(&self, snapshot: DirectorySnapshot) -> Arc<PublishedIndex> {
        let published = Arc::new(PublishedIndex::from_snapshot(snapshot));
        announce(&self.config, &published);
        *self.current.write() = Arc::clone(&published);
        published
    }

    /// The currently published index. Holding the returned `Arc` pins that
    /// snapshot across later refreshes.
    pub fn current(&self) -> Arc<PublishedIndex> {
        Arc::clone(&self.current.read())
    }

    pub fn source(&self) -> String {
        self.source.describe()
    }

    pub fn focus_view(&self, focus_id: &str) -> Option<HierarchyView> {
        self.current().navigator().resolve_focus_view(focus_id)
    }

    pub fn focus_view_or_default(&self, focus_id: Option<&str>) -> Option<HierarchyView> {
        self.current().navigator().resolve_focus_view_or_default(focus_id)
    }

    pub fn ancestors(&self, focus_id: &str) -> Vec<Employee> {
        self.current().navigator().resolve_ancestors(focus_id)
    }

    pub fn subtree(&self, focus_id: &str) -> Option<TreeNode> {
        self.current().navigator().resolve_subtree(focus_id)
    }

    pub fn team_summary(&self, focus_id: &str) -> Option<TeamSummary> {
        self.current().navigator().team_summary(focus_id)
    }

    pub fn roots(&self) -> Vec<Employee> {
        self.current().navigator().roots()
    }

    pub fn cycles(&self) -> Vec<Vec<String>> {
        self.current().navigator().detect_cycles()
    }
}

fn announce(config: &HierarchyConfig, published: &PublishedIndex) {
    info!(
        source = %published.source,
        employees = published.index.len(),
        duplicates = published.index.duplicate_count(),
        "hierarchy index published"
    );
    if config.report_cycles {
        for cycle in published.navigator().detect_cycles() {
            warn!(members = ?cycle, "manager cycle in directory");
        }
    }
}

impl std::fmt::Debug for HierarchyService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HierarchyService")
            .field("source", &self.source.describe())
            .field("config", &self.config)
            .field("employees", &self.current.read().index.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::DirectoryError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FailingDirectory;

    impl DirectorySource for FailingDirectory {
        fn load(&self) -> DirectoryResult<DirectorySnapshot> {
            Err(DirectoryError::UnsupportedFormat("broken".into()))
        }

        fn describe(&self) -> String {
            "failing".to_string()
        }
    }

    /// Each load returns one more employee than the previous one.
    #[derive(Default)]
    struct GrowingDirectory {
        loads: AtomicUsize,
    }

    impl DirectorySource for GrowingDirectory {
        fn load(&self) -> DirectoryResult<DirectorySnapshot> {
            let size = self.loads.fetch_add(1, Ordering::SeqCst) + 1;
            let employees = (0..size)
                .map(|i| Employee::new(format!("E{}", i), "Emp", i.to_string()))
                .collect();
            std::thread::yield_now();
            Ok(DirectorySnapshot::new(employees, self.describe()))
        }

        fn describe(&self) -> String {
            "growing".to_string()
        }
    }

    #[test]
    fn test_concurrent_refreshes_publish_latest_load() {
        let service = HierarchyService::new(GrowingDirectory::default(), HierarchyConfig::default())
            .unwrap();
        let threads = 8;
        let rounds = 25;

        std::thread::scope(|scope| {
            for _ in 0..threads {
                scope.spawn(|| {
                    for _ in 0..rounds {
                        service.refresh().unwrap();
                    }
                });
            }
        });

        assert_eq!(service.current().index.len(), 1 + threads * rounds);
    }

    #[test]
    fn test_from_employees() {
        let service = HierarchyService::from_employees(vec![
            Employee::new("M1", "Alice", "Root"),
            Employee::new("E1", "Bob", "Mid").with_manager("M1"),
        ]);

        assert_eq!(service.current().index.len(), 2);
        assert_eq!(service.current().source, "static");
        assert_eq!(service.ancestors("E1")[0].id, "M1");
        assert_eq!(service.roots().len(), 1);
        assert!(service.focus_view("nobody").is_none());
    }

    #[test]
    fn test_initial_load_failure() {
        let result = HierarchyService::new(FailingDirectory, HierarchyConfig::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_from_config_requires_path() {
        let result = HierarchyService::from_config(&OrgChartConfig::default());
        assert!(matches!(
            result,
            Err(crate::error::OrgChartError::Config(ConfigError::Invalid(_)))
        ));
    }
}
