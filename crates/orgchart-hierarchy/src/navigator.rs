//! Hierarchy navigation
//!
//! Read-only queries over a `DirectoryIndex`: the manager chain above an
//! employee, the reporting subtree below them, and both at once.
//!
//! The reporting graph is untrusted input. Every traversal threads an explicit
//! visited-set so each employee id is emitted at most once per call, which is
//! what makes cycles and self-references terminate.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::common::{sibling_key, VisitedSet};
use crate::cycles::detect_cycles;
use crate::employee::Employee;
use crate::index::DirectoryIndex;
use crate::rollup::{team_summary, TeamSummary};
use tracing::debug;

/// One node of a reporting subtree.
///
/// `Clone`, `PartialEq` and `Drop` walk the tree with an explicit stack, so a
/// chain of any length can be copied, compared and freed. Serialization still
/// recurses once per level.
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TreeNode {
    pub employee: Employee,
    /// Distance from the subtree root (the root itself is 0)
    pub depth: usize,
    /// Direct reports, in sibling order
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Number of nodes in this subtree, including itself.
    pub fn size(&self) -> usize {
        self.iter().count()
    }

    /// Pre-order iterator over this node and all descendants.
    pub fn iter(&self) -> impl Iterator<Item = &TreeNode> + '_ {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }

    /// Employee ids in pre-order.
    pub fn ids(&self) -> Vec<&str> {
        self.iter().map(|n| n.employee.id.as_str()).collect()
    }

    pub fn find(&self, id: &str) -> Option<&TreeNode> {
        self.iter().find(|n| n.employee.id == id)
    }

    /// Depth of the deepest descendant relative to this node.
    pub fn height(&self) -> usize {
        self.iter()
            .map(|n| n.depth - self.depth)
            .max()
            .unwrap_or(0)
    }
}

impl Clone for TreeNode {
    fn clone(&self) -> Self {
        // Pre-order listing with each node's parent slot
        let mut order: Vec<(&TreeNode, usize)> = Vec::new();
        let mut stack = vec![(self, 0)];
        while let Some((node, parent)) = stack.pop() {
            let slot = order.len();
            order.push((node, parent));
            stack.extend(node.children.iter().rev().map(|child| (child, slot)));
        }

        // Later slots finish first; siblings arrive last-to-first.
        let mut built: Vec<Vec<TreeNode>> = Vec::with_capacity(order.len());
        built.resize_with(order.len(), Vec::new);
        for slot in (1..order.len()).rev() {
            let (node, parent) = order[slot];
            let mut children = std::mem::take(&mut built[slot]);
            children.reverse();
            built[parent].push(TreeNode {
                employee: node.employee.clone(),
                depth: node.depth,
                children,
            });
        }

        let mut children = std::mem::take(&mut built[0]);
        children.reverse();
        TreeNode {
            employee: self.employee.clone(),
            depth: self.depth,
            children,
        }
    }
}

impl PartialEq for TreeNode {
    fn eq(&self, other: &Self) -> bool {
        let mut stack = vec![(self, other)];
        while let Some((a, b)) = stack.pop() {
            if a.depth != b.depth
                || a.employee != b.employee
                || a.children.len() != b.children.len()
            {
                return false;
            }
            stack.extend(a.children.iter().zip(&b.children));
        }
        true
    }
}

impl Eq for TreeNode {}

impl Drop for TreeNode {
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.children);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.children);
        }
    }
}

/// Everything a caller needs to render one focused employee.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct HierarchyView {
    pub focus: Employee,
    /// Top-most resolvable ancestor first, immediate manager last
    pub ancestor_chain: Vec<Employee>,
    pub subtree: TreeNode,
}

/// Stateless query engine bound to one index snapshot.
///
/// The focused id is always supplied by the caller.
#[derive(Debug, Clone, Copy)]
pub struct Navigator<'a> {
    index: &'a DirectoryIndex,
}

/// Subtree node awaiting assembly: arena position, depth, child slots.
struct PendingNode {
    position: usize,
    depth: usize,
    children: Vec<usize>,
}

/// Descent cursor: which pending node, and the next report to consider.
struct Frame {
    slot: usize,
    cursor: usize,
}

impl<'a> Navigator<'a> {
    pub fn new(index: &'a DirectoryIndex) -> Self {
        Self { index }
    }

    pub fn index(&self) -> &'a DirectoryIndex {
        self.index
    }

    /// Manager chain above `focus_id`, top-most ancestor first.
    ///
    /// Stops at a missing manager, a dangling manager id, or the first id
    /// already seen (cycle). Unknown focus yields an empty chain.
    pub fn resolve_ancestors(&self, focus_id: &str) -> Vec<Employee> {
        self.ancestor_refs(focus_id).into_iter().cloned().collect()
    }

    /// Ids of the manager chain, top-most first.
    pub fn manager_chain_ids(&self, focus_id: &str) -> Vec<String> {
        self.ancestor_refs(focus_id)
            .into_iter()
            .map(|e| e.id.clone())
            .collect()
    }

    /// Whether `manager_id` sits anywhere above `employee_id`.
    pub fn is_in_chain_of(&self, manager_id: &str, employee_id: &str) -> bool {
        self.ancestor_refs(employee_id)
            .iter()
            .any(|e| e.id == manager_id)
    }

    fn ancestor_refs(&self, focus_id: &str) -> Vec<&'a Employee> {
        let index = self.index;
        let Some(focus) = index.get(focus_id) else {
            return Vec::new();
        };

        let mut visited = VisitedSet::default();
        visited.insert(focus.id.as_str());

        let mut chain = Vec::new();
        let mut current = focus;
        while let Some(manager_id) = current.manager() {
            if !visited.insert(manager_id) {
                debug!(focus = focus_id, repeated = manager_id, "manager cycle, chain truncated");
                break;
            }
            let Some(manager) = index.get(manager_id) else {
                break;
            };
            chain.push(manager);
            current = manager;
        }

        chain.reverse();
        chain
    }

    /// Reporting subtree rooted at `focus_id`, or `None` when unknown.
    ///
    /// A single visited-set spans the whole call; a report already visited is
    /// skipped, so each id contributes at most one node. The descent keeps
    /// its own stack instead of recursing.
    pub fn resolve_subtree(&self, focus_id: &str) -> Option<TreeNode> {
        let index = self.index;
        let root = index.position(focus_id)?;

        let mut visited = VisitedSet::default();
        visited.insert(index.at(root).id.as_str());

        let mut pending = vec![PendingNode {
            position: root,
            depth: 0,
            children: Vec::new(),
        }];
        let mut stack = vec![Frame { slot: 0, cursor: 0 }];

        while let Some(frame) = stack.last_mut() {
            let parent = frame.slot;
            let parent_id = index.at(pending[parent].position).id.as_str();
            let Some(&child) = index.report_positions(parent_id).get(frame.cursor) else {
                stack.pop();
                continue;
            };
            frame.cursor += 1;

            let child_id = index.at(child).id.as_str();
            if !visited.insert(child_id) {
                debug!(focus = focus_id, repeated = child_id, "report already visited, pruned");
                continue;
            }

            let slot = pending.len();
            pending.push(PendingNode {
                position: child,
                depth: pending[parent].depth + 1,
                children: Vec::new(),
            });
            pending[parent].children.push(slot);
            stack.push(Frame { slot, cursor: 0 });
        }

        // Children always occupy later slots than their parent, so assembling
        // back to front sees every child finished before its parent.
        let mut built: Vec<Option<TreeNode>> = Vec::with_capacity(pending.len());
        built.resize_with(pending.len(), || None);
        for slot in (0..pending.len()).rev() {
            let children = std::mem::take(&mut pending[slot].children)
                .into_iter()
                .filter_map(|c| built[c].take())
                .collect();
            built[slot] = Some(TreeNode {
                employee: index.at(pending[slot].position).clone(),
                depth: pending[slot].depth,
                children,
            });
        }

        built.into_iter().next().flatten()
    }

    /// Focus employee together with their manager chain and subtree.
    pub fn resolve_focus_view(&self, focus_id: &str) -> Option<HierarchyView> {
        let focus = self.index.get(focus_id)?;
        Some(HierarchyView {
            focus: focus.clone(),
            ancestor_chain: self.resolve_ancestors(focus_id),
            subtree: self.resolve_subtree(focus_id)?,
        })
    }

    /// First employee of the snapshot, used when no focus is given.
    pub fn default_focus(&self) -> Option<&'a Employee> {
        self.index.employees().next()
    }

    /// Like `resolve_focus_view`, falling back to `default_focus` when the
    /// requested id is missing or does not resolve.
    pub fn resolve_focus_view_or_default(&self, focus_id: Option<&str>) -> Option<HierarchyView> {
        match focus_id.filter(|id| self.index.contains(id)) {
            Some(id) => self.resolve_focus_view(id),
            None => {
                let fallback = self.default_focus()?;
                self.resolve_focus_view(&fallback.id)
            }
        }
    }

    /// Employees with no manager or a manager id that does not resolve.
    ///
    /// Members of a closed manager cycle are never roots.
    pub fn roots(&self) -> Vec<Employee> {
        let index = self.index;
        let mut roots: Vec<&Employee> = index
            .employees()
            .filter(|e| e.manager().map_or(true, |m| !index.contains(m)))
            .collect();
        roots.sort_by_cached_key(|e| sibling_key(&e.display_name(), &e.id));
        roots.into_iter().cloned().collect()
    }

    /// Head-count rollup over the subtree of `focus_id`.
    pub fn team_summary(&self, focus_id: &str) -> Option<TeamSummary> {
        self.resolve_subtree(focus_id).map(|tree| team_summary(&tree))
    }

    /// Manager cycles present in the snapshot (diagnostics only).
    pub fn detect_cycles(&self) -> Vec<Vec<String>> {
        detect_cycles(self.index)
    }
}
