//! One-call scheduling: validate then evaluate.

use thiserror::Error;

use crate::config::EngineConfig;
use crate::models::{Activity, ScheduleResult};
use crate::network::{validate, ValidationError};

use super::calculation::{evaluate, EvaluationError};

/// Errors that can occur while scheduling an activity list.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// The input was rejected; the caller should fix it and resubmit.
    #[error("Invalid activity network: {0}")]
    Validation(#[from] ValidationError),
    /// Engine defect on a network that passed validation.
    #[error("Internal scheduling error: {0}")]
    Evaluation(#[from] EvaluationError),
}

/// Validate `activities` and compute their CPM schedule.
pub fn schedule(
    activities: &[Activity],
    config: &EngineConfig,
) -> Result<ScheduleResult, ScheduleError> {
    let network = validate(activities, config)?;
    Ok(evaluate(&network, config)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::ValidationErrorKind;

    fn make_activity(id: &str, duration: i64, preds: &[&str]) -> Activity {
        Activity::new(id, duration, preds)
    }

    fn validation_kind(activities: &[Activity]) -> ValidationErrorKind {
        match schedule(activities, &EngineConfig::default()) {
            Err(ScheduleError::Validation(err)) => err.kind,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_diamond_network() {
        let result = schedule(
            &[
                make_activity("A", 3, &[]),
                make_activity("B", 2, &["A"]),
                make_activity("C", 4, &["A"]),
                make_activity("D", 1, &["B", "C"]),
            ],
            &EngineConfig::default(),
        )
        .unwrap();

        assert_eq!(result.project_duration, 8);
        assert_eq!(result.critical_path, vec!["A", "C", "D"]);
        assert_eq!(result.critical_path_label(), "A → C → D");
        assert_eq!(result.get("B").unwrap().float, 2);
    }

    #[test]
    fn test_two_chains_of_equal_length() {
        let result = schedule(
            &[
                make_activity("A", 2, &[]),
                make_activity("B", 4, &[]),
                make_activity("C", 2, &["A"]),
            ],
            &EngineConfig::default(),
        )
        .unwrap();

        assert!(result.entries.iter().all(|e| e.critical));
        assert_eq!(result.get("B").unwrap().eft, 4);
        assert_eq!(result.get("C").unwrap().eft, 4);
        assert_eq!(result.critical_path, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_cycle_is_rejected() {
        let kind = validation_kind(&[
            make_activity("A", 1, &["B"]),
            make_activity("B", 1, &["A"]),
        ]);
        assert_eq!(kind, ValidationErrorKind::CycleDetected);
    }

    #[test]
    fn test_dangling_predecessor_is_rejected() {
        let kind = validation_kind(&[make_activity("A", 1, &["Z"])]);
        assert_eq!(kind, ValidationErrorKind::UnknownPredecessor);
    }

    #[test]
    fn test_each_invalid_input_has_its_kind() {
        assert_eq!(
            validation_kind(&[make_activity("A", 1, &[]), make_activity("A", 1, &[])]),
            ValidationErrorKind::DuplicateId
        );
        assert_eq!(
            validation_kind(&[make_activity("A", 0, &[])]),
            ValidationErrorKind::InvalidDuration
        );
        assert_eq!(
            validation_kind(&[make_activity("A", 1, &["A"])]),
            ValidationErrorKind::SelfPredecessor
        );
    }

    #[test]
    fn test_error_message_names_the_layer() {
        let err = schedule(&[make_activity("A", -2, &[])], &EngineConfig::default()).unwrap_err();
        assert!(err
            .to_string()
            .starts_with("Invalid activity network: InvalidDuration"));
    }
}
