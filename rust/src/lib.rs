//! Critical Path Method scheduling engine with Python bindings.
//!
//! Validates an activity-on-node network, orders it topologically, and runs
//! the forward and backward passes to produce earliest/latest times, float,
//! the critical path and the total project duration.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use pyo3::prelude::*;

mod config;
pub mod critical_path;
mod input;
pub mod interner;
pub mod logging;
mod models;
pub mod network;

pub use config::EngineConfig;
pub use critical_path::{
    calculate_timings, evaluate, schedule, ActivityTiming, EvaluationError, NetworkTimings,
    ScheduleError,
};
pub use input::parse_predecessors;
pub use models::{Activity, ScheduleEntry, ScheduleResult};
pub use network::{collect_violations, validate, Network, ValidationError, ValidationErrorKind};

/// Compute the CPM schedule for a list of activities.
///
/// # Arguments
/// * `activities` - Activities in input order (ties are broken by this order)
/// * `config` - Engine configuration (verbosity, activity cap)
///
/// # Returns
/// * ScheduleResult with per-activity timings, critical path and duration
///
/// # Raises
/// * ValueError if the activities do not form a valid network
/// * RuntimeError on an internal evaluation failure
#[pyfunction]
#[pyo3(signature = (activities, config=None))]
fn compute_schedule(
    activities: Vec<Activity>,
    config: Option<EngineConfig>,
) -> PyResult<ScheduleResult> {
    let config = config.unwrap_or_default();

    match schedule(&activities, &config) {
        Ok(result) => Ok(result),
        Err(ScheduleError::Validation(e)) => {
            Err(pyo3::exceptions::PyValueError::new_err(e.to_string()))
        }
        Err(e @ ScheduleError::Evaluation(_)) => {
            Err(pyo3::exceptions::PyRuntimeError::new_err(e.to_string()))
        }
    }
}

/// List every validation problem in a set of activities.
///
/// # Returns
/// * List of (kind, detail) pairs; empty when the activities are valid
#[pyfunction]
#[pyo3(signature = (activities, config=None))]
fn check_activities(
    activities: Vec<Activity>,
    config: Option<EngineConfig>,
) -> Vec<(String, String)> {
    let config = config.unwrap_or_default();
    collect_violations(&activities, &config)
        .into_iter()
        .map(|e| (e.kind.as_str().to_string(), e.detail))
        .collect()
}

/// Split a comma separated predecessor field into trimmed ids.
#[pyfunction]
#[pyo3(name = "parse_predecessors")]
fn py_parse_predecessors(text: &str) -> Vec<String> {
    parse_predecessors(text)
}

/// The aon_cpm.rust Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Data types
    m.add_class::<Activity>()?;
    m.add_class::<ScheduleEntry>()?;
    m.add_class::<ScheduleResult>()?;

    // Config types
    m.add_class::<EngineConfig>()?;

    // Engine
    m.add_function(wrap_pyfunction!(compute_schedule, m)?)?;
    m.add_function(wrap_pyfunction!(check_activities, m)?)?;
    m.add_function(wrap_pyfunction!(py_parse_predecessors, m)?)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_input_to_schedule() {
        // Raw form rows as the input collector hands them over
        let activities = vec![
            Activity::from_text("A", 3, ""),
            Activity::from_text("B", 2, "A"),
            Activity::from_text("C", 4, " A "),
            Activity::from_text("D", 1, "B, C"),
        ];

        let result = schedule(&activities, &EngineConfig::default()).unwrap();
        assert_eq!(result.project_duration, 8);
        assert_eq!(result.critical_path_label(), "A → C → D");
    }

    #[test]
    fn test_check_activities_lists_kinds() {
        let activities = vec![Activity::new("A", 0, &["Z"])];
        let problems = check_activities(activities, None);
        let kinds: Vec<&str> = problems.iter().map(|(kind, _)| kind.as_str()).collect();
        assert_eq!(kinds, vec!["InvalidDuration", "UnknownPredecessor"]);
    }
}
