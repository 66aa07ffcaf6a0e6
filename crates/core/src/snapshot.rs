// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Point-in-time organization snapshot reconstruction.
//!
//! Builds the hierarchical department tree populated with the employees
//! whose interval was valid on a reference date. All functions here are
//! pure; the persistence layer supplies the flat interval rows and the
//! full department table.

use crate::error::CoreError;
use orghist_domain::{AssignmentFacts, Department, DepartmentKind, DomainError, EmployeeNumber};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use time::Date;
use tracing::warn;

/// A flat, joined assignment row valid at some reference date.
///
/// This is the row shape shared by the snapshot reconstructor and the
/// snapshot differ: one row per employee with display fields resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentRecord {
    /// The employee's canonical identifier.
    pub employee_id: i64,
    /// The employee number.
    pub employee_number: EmployeeNumber,
    /// The employee's name.
    pub employee_name: String,
    /// The assigned department.
    pub department_id: i64,
    /// The assigned department's code.
    pub department_code: String,
    /// The assigned department's name.
    pub department_name: String,
    /// The assigned position.
    pub position_id: i64,
    /// The assigned position's title.
    pub position_title: String,
    /// The assigned position's code.
    pub position_code: String,
    /// The assigned rank, if any.
    pub rank_id: Option<i64>,
    /// The assigned rank's name, if any.
    pub rank_name: Option<String>,
    /// The assigned rank's code, if any.
    pub rank_code: Option<String>,
    /// Whether the employee manages the department.
    pub is_manager: bool,
}

impl AssignmentRecord {
    /// Returns the comparable facts of this record.
    #[must_use]
    pub const fn facts(&self) -> AssignmentFacts {
        AssignmentFacts::new(
            self.department_id,
            self.position_id,
            self.rank_id,
            self.is_manager,
        )
    }
}

/// An employee slot within a reconstructed department node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeSlot {
    /// The employee's canonical identifier.
    pub employee_id: i64,
    /// The employee number (sort key).
    pub employee_number: EmployeeNumber,
    /// The employee's name.
    pub name: String,
    /// The assigned position's title.
    pub position_title: String,
    /// The assigned position's code.
    pub position_code: String,
    /// The assigned rank's name, if any.
    pub rank_name: Option<String>,
    /// The assigned rank's code, if any.
    pub rank_code: Option<String>,
    /// Whether the employee manages the department.
    pub is_manager: bool,
}

/// A department node in a reconstructed organization tree.
///
/// Built fresh per query; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentNode {
    /// The department's canonical identifier. Zero for a synthetic root.
    pub department_id: i64,
    /// The department code.
    pub code: String,
    /// The department name.
    pub name: String,
    /// The structural kind.
    pub kind: DepartmentKind,
    /// Depth from the hierarchy root (root = 0).
    pub level: u32,
    /// The parent department, if any.
    pub parent_department_id: Option<i64>,
    /// Employees assigned to this department on the reference date.
    pub employees: Vec<EmployeeSlot>,
    /// Child departments.
    pub children: Vec<DepartmentNode>,
}

/// Which strategy of the root-resolution decision table produced the
/// returned tree root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootResolution {
    /// Exactly one populated root existed.
    SingleRoot,
    /// A populated root of `Company` kind absorbed the other roots.
    CompanyRoot,
    /// The designated root from the full department table (independent
    /// of the populated set) absorbed the other roots.
    DesignatedRoot,
    /// No real root could be resolved; a virtual root was synthesized.
    /// Indicates a data-quality problem, not normal operation.
    SyntheticRoot,
}

impl RootResolution {
    /// Converts this resolution to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SingleRoot => "single_root",
            Self::CompanyRoot => "company_root",
            Self::DesignatedRoot => "designated_root",
            Self::SyntheticRoot => "synthetic_root",
        }
    }
}

/// A reconstructed point-in-time organization snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganizationSnapshot {
    /// The reference date the snapshot is valid for.
    pub reference_date: Date,
    /// Total departments in the tree (post-order count).
    pub total_departments: u32,
    /// Total employees in the tree (post-order count).
    pub total_employees: u32,
    /// Which strategy resolved the tree root.
    pub root_resolution: RootResolution,
    /// The tree root.
    pub organization: DepartmentNode,
}

/// Computes each department's level by walking parent chains over an
/// id-indexed arena.
///
/// A department whose parent id cannot be resolved is treated as a root
/// (level 0); the gap surfaces later during root resolution. A cycle in
/// the parent chain is a fatal configuration error.
fn compute_levels(departments: &[Department]) -> Result<HashMap<i64, u32>, CoreError> {
    let by_id: HashMap<i64, &Department> = departments
        .iter()
        .filter_map(|dept| dept.department_id.map(|id| (id, dept)))
        .collect();

    let mut levels: HashMap<i64, u32> = HashMap::new();

    for &id in by_id.keys() {
        if levels.contains_key(&id) {
            continue;
        }

        // Walk up until a root, an already-levelled ancestor, or a
        // missing parent; a repeat visit within one walk is a cycle.
        let mut path: Vec<i64> = Vec::new();
        let mut visited: HashSet<i64> = HashSet::new();
        let mut cursor: i64 = id;
        let base_level: u32 = loop {
            if !visited.insert(cursor) {
                return Err(CoreError::DomainViolation(DomainError::DepartmentCycle {
                    department_id: cursor,
                }));
            }
            if let Some(&level) = levels.get(&cursor) {
                break level + 1;
            }
            path.push(cursor);
            match by_id.get(&cursor).and_then(|dept| dept.parent_department_id) {
                Some(parent) if by_id.contains_key(&parent) => {
                    if let Some(&level) = levels.get(&parent) {
                        break level + 1;
                    }
                    cursor = parent;
                }
                // Parentless, or the parent row is missing entirely:
                // this walk bottomed out at a root.
                _ => break 0,
            }
        };

        // `path` holds the walked chain deepest-first from `id` up to
        // (and including) the last unlevelled ancestor.
        let depth: u32 = u32::try_from(path.len().saturating_sub(1)).unwrap_or(u32::MAX);
        let mut level: u32 = base_level.saturating_add(depth);
        for dept_id in path {
            levels.insert(dept_id, level);
            level = level.saturating_sub(1);
        }
    }

    Ok(levels)
}

/// Sorts a sibling list by `(level, code)` and each node's employees by
/// employee number, recursively.
fn sort_tree(nodes: &mut [DepartmentNode]) {
    nodes.sort_by(|a, b| a.level.cmp(&b.level).then_with(|| a.code.cmp(&b.code)));
    for node in nodes {
        node.employees
            .sort_by(|a, b| a.employee_number.cmp(&b.employee_number));
        sort_tree(&mut node.children);
    }
}

/// Post-order traversal summing department and employee counts.
fn count_tree(node: &DepartmentNode) -> (u32, u32) {
    let mut departments: u32 = 1;
    let mut employees: u32 = u32::try_from(node.employees.len()).unwrap_or(u32::MAX);
    for child in &node.children {
        let (child_departments, child_employees) = count_tree(child);
        departments += child_departments;
        employees += child_employees;
    }
    (departments, employees)
}

/// Builds a node for a department out of the full-table metadata.
fn node_for(dept: &Department, id: i64, levels: &HashMap<i64, u32>) -> DepartmentNode {
    DepartmentNode {
        department_id: id,
        code: dept.code.clone(),
        name: dept.name.clone(),
        kind: dept.kind,
        level: levels.get(&id).copied().unwrap_or(0),
        parent_department_id: dept.parent_department_id,
        employees: Vec::new(),
        children: Vec::new(),
    }
}

/// Builds the organization snapshot valid at `reference_date`.
///
/// # Arguments
///
/// * `reference_date` - The date the rows were selected for
/// * `rows` - Assignment rows valid on the reference date, exception
///   departments already excluded
/// * `departments` - The full department table (used for levels, parent
///   links, and node display fields)
/// * `designated_root` - The designated organizational root from the
///   full table, if one exists (parentless `Company` department),
///   independent of whether it is populated
///
/// # Errors
///
/// Returns `DomainError::DepartmentCycle` (fatal) if the department
/// parent chain loops.
#[allow(clippy::too_many_lines)]
pub fn build_snapshot(
    reference_date: Date,
    rows: &[AssignmentRecord],
    departments: &[Department],
    designated_root: Option<&Department>,
) -> Result<OrganizationSnapshot, CoreError> {
    let levels: HashMap<i64, u32> = compute_levels(departments)?;
    let dept_by_id: HashMap<i64, &Department> = departments
        .iter()
        .filter_map(|dept| dept.department_id.map(|id| (id, dept)))
        .collect();

    // Group rows into populated department nodes. BTreeMap keeps node
    // creation order deterministic independent of row order.
    let mut populated: BTreeMap<i64, DepartmentNode> = BTreeMap::new();
    for row in rows {
        if let Some(&dept) = dept_by_id.get(&row.department_id) {
            if dept.is_exception {
                continue;
            }
            let node = populated
                .entry(row.department_id)
                .or_insert_with(|| node_for(dept, row.department_id, &levels));
            node.employees.push(EmployeeSlot {
                employee_id: row.employee_id,
                employee_number: row.employee_number.clone(),
                name: row.employee_name.clone(),
                position_title: row.position_title.clone(),
                position_code: row.position_code.clone(),
                rank_name: row.rank_name.clone(),
                rank_code: row.rank_code.clone(),
                is_manager: row.is_manager,
            });
        }
    }

    // Attach children to parents; unresolvable parents produce extra
    // roots handled by the resolution table below.
    let mut roots: Vec<DepartmentNode> = Vec::new();
    let mut attach_order: Vec<i64> = populated.keys().copied().collect();
    // Attach deepest levels first so parents still sit in the map.
    attach_order.sort_by_key(|id| std::cmp::Reverse(levels.get(id).copied().unwrap_or(0)));
    for id in attach_order {
        let Some(node) = populated.remove(&id) else {
            continue;
        };
        match node.parent_department_id {
            Some(parent_id) if populated.contains_key(&parent_id) => {
                if let Some(parent) = populated.get_mut(&parent_id) {
                    parent.children.push(node);
                }
            }
            _ => roots.push(node),
        }
    }

    let (root_resolution, mut organization) = resolve_root(roots, designated_root, &levels);

    sort_tree(std::slice::from_mut(&mut organization));
    let (total_departments, total_employees) = count_tree(&organization);

    Ok(OrganizationSnapshot {
        reference_date,
        total_departments,
        total_employees,
        root_resolution,
        organization,
    })
}

/// The root-resolution decision table.
///
/// Ordered strategies: single root as-is; populated `Company` root
/// absorbing the rest; designated full-table root absorbing the rest;
/// synthetic virtual root as the logged last resort.
fn resolve_root(
    mut roots: Vec<DepartmentNode>,
    designated_root: Option<&Department>,
    levels: &HashMap<i64, u32>,
) -> (RootResolution, DepartmentNode) {
    if roots.len() == 1 {
        let Some(root) = roots.pop() else {
            unreachable!("length was checked above");
        };
        return (RootResolution::SingleRoot, root);
    }

    // Strategy 2: a populated root of Company kind adopts the others.
    if let Some(index) = roots
        .iter()
        .position(|node| matches!(node.kind, DepartmentKind::Company))
    {
        let mut company = roots.swap_remove(index);
        company.children.extend(roots);
        return (RootResolution::CompanyRoot, company);
    }

    // Strategy 3: the designated root from the full department table,
    // even if nothing is directly assigned to it.
    if let Some(designated) = designated_root
        && let Some(designated_id) = designated.department_id
    {
        let mut root = node_for(designated, designated_id, levels);
        let (own, others): (Vec<DepartmentNode>, Vec<DepartmentNode>) = roots
            .into_iter()
            .partition(|node| node.department_id == designated_id);
        for node in own {
            // The designated root was itself a populated root; keep its
            // employees and children rather than duplicating the node.
            root.employees.extend(node.employees);
            root.children.extend(node.children);
        }
        root.children.extend(others);
        return (RootResolution::DesignatedRoot, root);
    }

    // Last resort: synthesize a virtual root. This indicates incomplete
    // department metadata, not normal operation.
    warn!(
        root_count = roots.len(),
        "no organizational root could be resolved; synthesizing a virtual root"
    );
    let synthetic = DepartmentNode {
        department_id: 0,
        code: String::from("ROOT"),
        name: String::from("Organization"),
        kind: DepartmentKind::Company,
        level: 0,
        parent_department_id: None,
        employees: Vec::new(),
        children: roots,
    };
    (RootResolution::SyntheticRoot, synthetic)
}
