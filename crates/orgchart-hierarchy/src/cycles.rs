//! Manager-cycle detection
//!
//! Every employee has at most one manager, so the reporting graph is a
//! functional graph and each cycle can be found by walking manager links
//! until a node repeats. Used for diagnostics only; traversals never depend
//! on it.

use crate::index::DirectoryIndex;

#[derive(Clone, Copy, PartialEq)]
enum Mark {
    Unseen,
    OnPath,
    Done,
}

/// Cycles in the manager graph, each as its member ids.
///
/// Members are listed along manager links starting from the smallest id;
/// cycles are ordered by that first id. A self-managed employee is a cycle
/// of one.
pub fn detect_cycles(index: &DirectoryIndex) -> Vec<Vec<String>> {
    let mut marks = vec![Mark::Unseen; index.len()];
    let mut cycles = Vec::new();

    for start in 0..index.len() {
        if marks[start] != Mark::Unseen {
            continue;
        }

        let mut path: Vec<usize> = Vec::new();
        let mut current = Some(start);
        while let Some(pos) = current {
            match marks[pos] {
                Mark::Done => break,
                Mark::OnPath => {
                    if let Some(entry) = path.iter().position(|&p| p == pos) {
                        cycles.push(normalize(index, &path[entry..]));
                    }
                    break;
                }
                Mark::Unseen => {
                    marks[pos] = Mark::OnPath;
                    path.push(pos);
                    current = index.at(pos).manager().and_then(|m| index.position(m));
                }
            }
        }

        for pos in path {
            marks[pos] = Mark::Done;
        }
    }

    cycles.sort();
    cycles
}

/// Rotate so the smallest id comes first.
fn normalize(index: &DirectoryIndex, members: &[usize]) -> Vec<String> {
    let mut ids: Vec<String> = members.iter().map(|&p| index.at(p).id.clone()).collect();
    if let Some(min) = ids
        .iter()
        .enumerate()
        .min_by(|a, b| a.1.cmp(b.1))
        .map(|(i, _)| i)
    {
        ids.rotate_left(min);
    }
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::employee::Employee;
    use crate::index::build_index;

    #[test]
    fn test_no_cycles_in_tree() {
        let index = build_index(vec![
            Employee::new("M1", "Alice", ""),
            Employee::new("E1", "Bob", "").with_manager("M1"),
            Employee::new("E2", "Carol", "").with_manager("M404"),
        ]);
        assert!(detect_cycles(&index).is_empty());
    }

    #[test]
    fn test_cycles_reported_once() {
        let index = build_index(vec![
            Employee::new("C", "Cat", "").with_manager("A"),
            Employee::new("A", "Ann", "").with_manager("B"),
            Employee::new("B", "Ben", "").with_manager("C"),
            // tail leading into the cycle
            Employee::new("T", "Tail", "").with_manager("B"),
            Employee::new("S", "Solo", "").with_manager("S"),
        ]);

        assert_eq!(
            detect_cycles(&index),
            vec![
                vec!["A".to_string(), "B".to_string(), "C".to_string()],
                vec!["S".to_string()],
            ]
        );
    }
}
