//! End-to-end hierarchy scenarios
//!
//! Exercises the engine through the public crate API:
//! - focus views over well-formed and malformed directories
//! - snapshot files in both supported formats
//! - refresh and index publication in the service

use orgchart::*;
use std::io::Write;
use std::sync::Arc;

fn alice_bob_carol() -> Vec<Employee> {
    vec![
        Employee::new("M1", "Alice", "Root"),
        Employee::new("E1", "Bob", "Mid").with_manager("M1"),
        Employee::new("E2", "Carol", "Leaf").with_manager("E1"),
    ]
}

fn names(employees: &[Employee]) -> Vec<String> {
    employees.iter().map(Employee::display_name).collect()
}

#[test]
fn test_focus_view_scenario() {
    let index = build_index(alice_bob_carol());
    let view = Navigator::new(&index).resolve_focus_view("E2").unwrap();

    assert_eq!(names(&view.ancestor_chain), vec!["Alice Root", "Bob Mid"]);
    assert_eq!(view.subtree.employee.display_name(), "Carol Leaf");
    assert!(view.subtree.children.is_empty());
}

#[test]
fn test_dangling_manager_scenario() {
    let mut employees = alice_bob_carol();
    employees.push(Employee::new("E404", "Orphan", "Report").with_manager("M404"));
    let index = build_index(employees);
    let nav = Navigator::new(&index);

    assert!(nav.resolve_ancestors("E404").is_empty());
    let view = nav.resolve_focus_view("E404").unwrap();
    assert!(view.ancestor_chain.is_empty());
    assert_eq!(view.subtree.size(), 1);

    let roots: Vec<String> = nav.roots().into_iter().map(|e| e.id).collect();
    assert_eq!(roots, vec!["M1", "E404"]);
}

#[test]
fn test_empty_directory() {
    let index = build_index(Vec::<Employee>::new());
    let nav = Navigator::new(&index);

    assert!(nav.resolve_ancestors("M1").is_empty());
    assert!(nav.resolve_subtree("M1").is_none());
    assert!(nav.resolve_focus_view("M1").is_none());
    assert!(nav.roots().is_empty());
    assert!(nav.detect_cycles().is_empty());
}

#[test]
fn test_self_reference_scenario() {
    let mut employees = alice_bob_carol();
    employees.push(Employee::new("S", "Sam", "Self").with_manager("S"));
    let index = build_index(employees);
    let nav = Navigator::new(&index);

    assert!(nav.resolve_ancestors("S").is_empty());
    assert_eq!(nav.resolve_subtree("S").unwrap().ids(), vec!["S"]);
    assert_eq!(nav.detect_cycles(), vec![vec!["S".to_string()]]);
}

#[test]
fn test_sibling_ordering_example() {
    let index = build_index(vec![
        Employee::new("M", "Mgr", ""),
        Employee::new("E2", "bob", "").with_manager("M"),
        Employee::new("E1", "Bob", "").with_manager("M"),
    ]);
    let tree = Navigator::new(&index).resolve_subtree("M").unwrap();
    let order: Vec<&str> = tree.children.iter().map(|c| c.employee.id.as_str()).collect();
    assert_eq!(order, vec!["E1", "E2"]);
}

#[test]
fn test_rebuilt_index_gives_identical_views() {
    let mut employees = alice_bob_carol();
    employees.push(Employee::new("X", "Xa", "").with_manager("Y"));
    employees.push(Employee::new("Y", "Ya", "").with_manager("X"));

    let first = build_index(employees.clone());
    let second = build_index(employees.clone());
    for employee in &employees {
        assert_eq!(
            Navigator::new(&first).resolve_focus_view(&employee.id),
            Navigator::new(&second).resolve_focus_view(&employee.id)
        );
    }
}

#[test]
fn test_json_and_yaml_snapshots_load_identically() {
    let json = r#"{"employees": [
        {"id": "EMP003", "firstName": "Robert", "lastName": "Manager", "managerId": null, "department": "Engineering"},
        {"id": "EMP001", "firstName": "John", "lastName": "Doe", "managerId": "EMP003", "department": "Engineering"},
        {"id": "EMP002", "firstName": "Jane", "lastName": "Smith", "manager": "EMP003", "department": "Human Resources"}
    ]}"#;
    let yaml = "
- id: EMP003
  firstName: Robert
  lastName: Manager
  department: Engineering
- id: EMP001
  firstName: John
  lastName: Doe
  managerId: EMP003
  department: Engineering
- id: EMP002
  firstName: Jane
  lastName: Smith
  manager: EMP003
  department: Human Resources
";

    let mut json_file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    json_file.write_all(json.as_bytes()).unwrap();
    let mut yaml_file = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
    yaml_file.write_all(yaml.as_bytes()).unwrap();

    let from_json = HierarchyService::new(FileDirectory::new(json_file.path()), HierarchyConfig::default()).unwrap();
    let from_yaml = HierarchyService::new(FileDirectory::new(yaml_file.path()), HierarchyConfig::default()).unwrap();

    assert_eq!(from_json.focus_view("EMP003"), from_yaml.focus_view("EMP003"));

    let team = from_json.team_summary("EMP003").unwrap();
    assert_eq!(team.direct_reports, 2);
    assert_eq!(team.departments.get("Engineering"), Some(&2));
    assert_eq!(team.departments.get("Human Resources"), Some(&1));
}

#[test]
fn test_refresh_publishes_new_index_without_disturbing_readers() {
    let directory = Arc::new(StaticDirectory::new(alice_bob_carol()));
    let service = HierarchyService::new(Arc::clone(&directory), HierarchyConfig::default()).unwrap();

    let before = service.current();
    assert_eq!(before.index.len(), 3);

    // Carol moves under Alice directly and a new hire joins
    directory.replace(vec![
        Employee::new("M1", "Alice", "Root"),
        Employee::new("E1", "Bob", "Mid").with_manager("M1"),
        Employee::new("E2", "Carol", "Leaf").with_manager("M1"),
        Employee::new("E3", "Dan", "New").with_manager("E2"),
    ]);
    let published = service.refresh().unwrap();

    assert_eq!(published.index.len(), 4);
    assert_eq!(service.current().index.len(), 4);
    assert_eq!(service.ancestors("E2").len(), 1);
    assert_eq!(service.ancestors("E3").len(), 2);

    // The earlier snapshot is untouched
    assert_eq!(before.index.len(), 3);
    assert_eq!(before.navigator().manager_chain_ids("E2"), vec!["M1", "E1"]);
}

#[test]
fn test_failed_refresh_keeps_current_index() {
    let file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    std::fs::write(file.path(), r#"[{"id": "A"}]"#).unwrap();

    let service = HierarchyService::new(FileDirectory::new(file.path()), HierarchyConfig::default()).unwrap();
    std::fs::write(file.path(), "not json").unwrap();

    assert!(matches!(service.refresh(), Err(DirectoryError::Json(_))));
    assert_eq!(service.current().index.len(), 1);
}

#[test]
fn test_service_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = dir.path().join("staff.data");
    std::fs::write(&snapshot, "- id: A\n- id: B\n  managerId: A\n").unwrap();

    let yaml = format!(
        "directory:\n  path: {}\n  format: yaml\nhierarchy:\n  report_cycles: false\n",
        snapshot.display()
    );
    let config = OrgChartConfig::from_yaml_str(&yaml).unwrap();
    let service = HierarchyService::from_config(&config).unwrap();

    assert_eq!(service.subtree("A").unwrap().ids(), vec!["A", "B"]);
    assert_eq!(service.focus_view_or_default(None).unwrap().focus.id, "A");
}

#[test]
fn test_concurrent_readers_share_one_index() {
    let mut employees = vec![Employee::new("R", "Root", "")];
    for i in 0..200 {
        employees.push(Employee::new(format!("E{}", i), "Emp", i.to_string()).with_manager("R"));
    }
    let service = Arc::new(HierarchyService::from_employees(employees));

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let service = Arc::clone(&service);
            std::thread::spawn(move || {
                for i in (t..200).step_by(4) {
                    let view = service.focus_view(&format!("E{}", i)).unwrap();
                    assert_eq!(view.ancestor_chain.len(), 1);
                }
                service.subtree("R").unwrap().size()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 201);
    }
}
