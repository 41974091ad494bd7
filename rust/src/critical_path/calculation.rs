//! Critical path calculation using forward and backward passes.

use thiserror::Error;

use crate::config::EngineConfig;
use crate::interner::ActivityIdx;
use crate::models::{ScheduleEntry, ScheduleResult};
use crate::network::Network;
use crate::{log_passes, log_summary};

use super::path::critical_sequence;
use super::types::{ActivityTiming, NetworkTimings};

/// Internal invariant violations during evaluation.
///
/// A validated network never produces these; they indicate an engine defect
/// rather than bad input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvaluationError {
    #[error("Activity '{activity}' was not reached by the evaluation order")]
    IncompleteOrder { activity: String },
    #[error("Activity '{activity}' has negative float {float}")]
    NegativeFloat { activity: String, float: i64 },
    #[error("Finish time of activity '{activity}' overflows")]
    DurationOverflow { activity: String },
}

/// Run both passes over a validated network.
pub fn calculate_timings(
    network: &Network,
    verbosity: u8,
) -> Result<NetworkTimings, EvaluationError> {
    check_order_complete(network)?;

    let earliest = forward_pass(network, verbosity)?;
    let project_duration = earliest.iter().map(|&(_, eft)| eft).max().unwrap_or(0);
    let latest = backward_pass(network, project_duration, verbosity)?;

    let mut timings = Vec::with_capacity(network.len());
    for (idx, (&(earliest_start, earliest_finish), &(latest_start, latest_finish))) in
        earliest.iter().zip(latest.iter()).enumerate()
    {
        let float = latest_start - earliest_start;
        if float < 0 {
            return Err(EvaluationError::NegativeFloat {
                activity: network.id(idx as ActivityIdx).to_string(),
                float,
            });
        }
        timings.push(ActivityTiming {
            earliest_start,
            earliest_finish,
            latest_start,
            latest_finish,
            float,
        });
    }

    Ok(NetworkTimings {
        timings,
        project_duration,
    })
}

/// Evaluate a validated network into a full schedule.
pub fn evaluate(
    network: &Network,
    config: &EngineConfig,
) -> Result<ScheduleResult, EvaluationError> {
    let NetworkTimings {
        timings,
        project_duration,
    } = calculate_timings(network, config.verbosity)?;

    let entries: Vec<ScheduleEntry> = network
        .activities()
        .iter()
        .zip(timings.iter())
        .map(|(activity, timing)| ScheduleEntry {
            id: activity.id.clone(),
            duration: activity.duration,
            est: timing.earliest_start,
            eft: timing.earliest_finish,
            lst: timing.latest_start,
            lft: timing.latest_finish,
            float: timing.float,
            critical: timing.is_critical(),
        })
        .collect();

    let critical_path: Vec<String> = critical_sequence(&timings)
        .into_iter()
        .map(|idx| network.id(idx).to_string())
        .collect();

    log_summary!(config.verbosity, "Project duration: {}", project_duration);
    log_summary!(
        config.verbosity,
        "Critical path: {}",
        critical_path.join(" → ")
    );

    Ok(ScheduleResult::new(entries, critical_path, project_duration))
}

/// The topological order must list every activity exactly once.
fn check_order_complete(network: &Network) -> Result<(), EvaluationError> {
    let mut seen = vec![false; network.len()];
    for &idx in network.topological_order() {
        if let Some(slot) = seen.get_mut(idx as usize) {
            *slot = true;
        }
    }
    match seen.iter().position(|&reached| !reached) {
        Some(missing) => Err(EvaluationError::IncompleteOrder {
            activity: network.id(missing as ActivityIdx).to_string(),
        }),
        None => Ok(()),
    }
}

/// Earliest (start, finish) per activity, in topological order.
fn forward_pass(network: &Network, verbosity: u8) -> Result<Vec<(i64, i64)>, EvaluationError> {
    let mut earliest: Vec<Option<(i64, i64)>> = vec![None; network.len()];

    for &idx in network.topological_order() {
        // Earliest start = latest finish among predecessors
        let mut earliest_start = 0;
        for &pred in network.predecessors(idx) {
            let (_, pred_finish) =
                earliest[pred as usize].ok_or_else(|| EvaluationError::IncompleteOrder {
                    activity: network.id(pred).to_string(),
                })?;
            earliest_start = earliest_start.max(pred_finish);
        }

        let earliest_finish = earliest_start
            .checked_add(network.duration(idx))
            .ok_or_else(|| EvaluationError::DurationOverflow {
                activity: network.id(idx).to_string(),
            })?;

        log_passes!(
            verbosity,
            "forward {}: est={} eft={}",
            network.id(idx),
            earliest_start,
            earliest_finish
        );
        earliest[idx as usize] = Some((earliest_start, earliest_finish));
    }

    collect_pass(network, earliest)
}

/// Latest (start, finish) per activity, in reverse topological order.
fn backward_pass(
    network: &Network,
    project_duration: i64,
    verbosity: u8,
) -> Result<Vec<(i64, i64)>, EvaluationError> {
    let mut latest: Vec<Option<(i64, i64)>> = vec![None; network.len()];

    for &idx in network.topological_order().iter().rev() {
        // Latest finish = earliest latest-start among successors
        let mut latest_finish = project_duration;
        for &succ in network.successors(idx) {
            let (succ_start, _) =
                latest[succ as usize].ok_or_else(|| EvaluationError::IncompleteOrder {
                    activity: network.id(succ).to_string(),
                })?;
            latest_finish = latest_finish.min(succ_start);
        }

        let latest_start = latest_finish - network.duration(idx);

        log_passes!(
            verbosity,
            "backward {}: lst={} lft={}",
            network.id(idx),
            latest_start,
            latest_finish
        );
        latest[idx as usize] = Some((latest_start, latest_finish));
    }

    collect_pass(network, latest)
}

fn collect_pass(
    network: &Network,
    values: Vec<Option<(i64, i64)>>,
) -> Result<Vec<(i64, i64)>, EvaluationError> {
    values
        .into_iter()
        .enumerate()
        .map(|(idx, value)| {
            value.ok_or_else(|| EvaluationError::IncompleteOrder {
                activity: network.id(idx as ActivityIdx).to_string(),
            })
        })
        .collect()
}
