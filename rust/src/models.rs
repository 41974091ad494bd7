//! Core data types for the CPM engine.

use pyo3::prelude::*;
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;

use crate::input::parse_predecessors;

/// An activity to be scheduled.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Activity {
    #[pyo3(get, set)]
    pub id: String,
    /// Duration in whole time units. Must be positive to pass validation.
    #[pyo3(get, set)]
    pub duration: i64,
    /// Ids of activities that must finish before this one starts.
    #[pyo3(get, set)]
    pub predecessors: Vec<String>,
}

impl Activity {
    pub fn new<S: Into<String>>(id: S, duration: i64, predecessors: &[&str]) -> Self {
        Self {
            id: id.into(),
            duration,
            predecessors: predecessors.iter().map(|p| p.to_string()).collect(),
        }
    }
}

#[pymethods]
impl Activity {
    #[new]
    #[pyo3(signature = (id, duration, predecessors=None))]
    fn py_new(id: String, duration: i64, predecessors: Option<Vec<String>>) -> Self {
        Self {
            id,
            duration,
            predecessors: predecessors.unwrap_or_default(),
        }
    }

    /// Build an activity from raw form fields.
    ///
    /// `predecessors` is a comma separated list; blank items are ignored.
    #[staticmethod]
    pub fn from_text(id: &str, duration: i64, predecessors: &str) -> Self {
        Self {
            id: id.trim().to_string(),
            duration,
            predecessors: parse_predecessors(predecessors),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "Activity(id={:?}, duration={}, predecessors={:?})",
            self.id, self.duration, self.predecessors
        )
    }
}

/// Computed timing for one activity.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduleEntry {
    #[pyo3(get)]
    pub id: String,
    #[pyo3(get)]
    pub duration: i64,
    #[pyo3(get)]
    pub est: i64,
    #[pyo3(get)]
    pub eft: i64,
    #[pyo3(get)]
    pub lst: i64,
    #[pyo3(get)]
    pub lft: i64,
    #[pyo3(get)]
    pub float: i64,
    #[pyo3(get)]
    pub critical: bool,
}

#[pymethods]
impl ScheduleEntry {
    fn __repr__(&self) -> String {
        format!(
            "ScheduleEntry(id={:?}, est={}, eft={}, lst={}, lft={}, float={}, critical={})",
            self.id, self.est, self.eft, self.lst, self.lft, self.float, self.critical
        )
    }
}

/// Complete schedule for one activity network.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduleResult {
    /// Entries in the order the activities were supplied.
    #[pyo3(get)]
    pub entries: Vec<ScheduleEntry>,
    /// Critical activity ids by ascending est, ties in input order.
    #[pyo3(get)]
    pub critical_path: Vec<String>,
    #[pyo3(get)]
    pub project_duration: i64,
    positions: FxHashMap<String, usize>,
}

impl ScheduleResult {
    pub(crate) fn new(
        entries: Vec<ScheduleEntry>,
        critical_path: Vec<String>,
        project_duration: i64,
    ) -> Self {
        let positions = entries
            .iter()
            .enumerate()
            .map(|(pos, entry)| (entry.id.clone(), pos))
            .collect();
        Self {
            entries,
            critical_path,
            project_duration,
            positions,
        }
    }

    /// Borrowing lookup by activity id.
    pub fn get(&self, id: &str) -> Option<&ScheduleEntry> {
        self.positions.get(id).map(|&pos| &self.entries[pos])
    }
}

#[pymethods]
impl ScheduleResult {
    /// Entry for an activity id, if present.
    pub fn entry(&self, id: &str) -> Option<ScheduleEntry> {
        self.get(id).cloned()
    }

    /// Activity ids grouped by earliest start, ascending.
    ///
    /// Ids within a layer are sorted lexicographically. Diagram renderers use
    /// each layer as one column.
    pub fn layers(&self) -> Vec<(i64, Vec<String>)> {
        let mut grouped: BTreeMap<i64, Vec<String>> = BTreeMap::new();
        for entry in &self.entries {
            grouped.entry(entry.est).or_default().push(entry.id.clone());
        }
        grouped
            .into_iter()
            .map(|(est, mut ids)| {
                ids.sort();
                (est, ids)
            })
            .collect()
    }

    /// Critical path joined with arrows, e.g. `A → C → D`.
    pub fn critical_path_label(&self) -> String {
        self.critical_path.join(" → ")
    }

    fn __len__(&self) -> usize {
        self.entries.len()
    }

    fn __repr__(&self) -> String {
        format!(
            "ScheduleResult(activities={}, project_duration={}, critical_path={:?})",
            self.entries.len(),
            self.project_duration,
            self.critical_path
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_entry(id: &str, est: i64, duration: i64, float: i64) -> ScheduleEntry {
        ScheduleEntry {
            id: id.to_string(),
            duration,
            est,
            eft: est + duration,
            lst: est + float,
            lft: est + float + duration,
            float,
            critical: float == 0,
        }
    }

    fn sample_result() -> ScheduleResult {
        ScheduleResult::new(
            vec![
                make_entry("A", 0, 3, 0),
                make_entry("C", 3, 4, 0),
                make_entry("B", 3, 2, 2),
                make_entry("D", 7, 1, 0),
            ],
            vec!["A".to_string(), "C".to_string(), "D".to_string()],
            8,
        )
    }

    #[test]
    fn test_lookup_by_id() {
        let result = sample_result();
        assert_eq!(result.get("B").map(|e| e.float), Some(2));
        assert_eq!(result.entry("D").map(|e| e.est), Some(7));
        assert!(result.get("Z").is_none());
    }

    #[test]
    fn test_layers_group_by_est_and_sort_ids() {
        let result = sample_result();
        assert_eq!(
            result.layers(),
            vec![
                (0, vec!["A".to_string()]),
                (3, vec!["B".to_string(), "C".to_string()]),
                (7, vec!["D".to_string()]),
            ]
        );
    }

    #[test]
    fn test_critical_path_label() {
        assert_eq!(sample_result().critical_path_label(), "A → C → D");
    }

    #[test]
    fn test_activity_from_text() {
        let activity = Activity::from_text(" D ", 1, "B, C ,,");
        assert_eq!(activity, Activity::new("D", 1, &["B", "C"]));
    }
}
