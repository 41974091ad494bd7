//! Activity network validation and construction.
//!
//! Validation checks, in order:
//! 1. Non-empty input with non-blank ids (and within the configured cap)
//! 2. No duplicate ids
//! 3. Positive durations
//! 4. Predecessors refer to supplied activities
//! 5. No activity lists itself as a predecessor
//! 6. The predecessor graph is acyclic
//!
//! A successful validation yields a [`Network`]: the activities with their
//! resolved predecessor and successor index lists and a deterministic
//! topological order.

use rustc_hash::FxHashSet;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt;
use thiserror::Error;

use crate::config::EngineConfig;
use crate::interner::{ActivityIdx, ActivityIndex};
use crate::models::Activity;
use crate::{log_debug, log_summary};

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorKind {
    /// No activities were supplied.
    EmptyNetwork,
    /// An activity id is empty or whitespace.
    InvalidId,
    /// More activities than `EngineConfig::max_activities` allows.
    TooManyActivities,
    /// Two activities share the same id.
    DuplicateId,
    /// A duration is zero or negative.
    InvalidDuration,
    /// A predecessor id does not match any supplied activity.
    UnknownPredecessor,
    /// An activity lists itself as a predecessor.
    SelfPredecessor,
    /// The predecessor graph contains a cycle.
    CycleDetected,
}

impl ValidationErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmptyNetwork => "EmptyNetwork",
            Self::InvalidId => "InvalidId",
            Self::TooManyActivities => "TooManyActivities",
            Self::DuplicateId => "DuplicateId",
            Self::InvalidDuration => "InvalidDuration",
            Self::UnknownPredecessor => "UnknownPredecessor",
            Self::SelfPredecessor => "SelfPredecessor",
            Self::CycleDetected => "CycleDetected",
        }
    }
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rejected activity network.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}: {detail}")]
pub struct ValidationError {
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub detail: String,
    /// Offending activity ids (empty when the error concerns the whole input).
    pub ids: Vec<String>,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, detail: impl Into<String>, ids: Vec<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
            ids,
        }
    }
}

/// A validated, acyclic activity network.
///
/// All per-activity vectors are indexed by [`ActivityIdx`], which is the
/// activity's position in the supplied list.
#[derive(Debug, Clone)]
pub struct Network {
    pub(crate) activities: Vec<Activity>,
    pub(crate) index: ActivityIndex,
    pub(crate) predecessors: Vec<Vec<ActivityIdx>>,
    pub(crate) successors: Vec<Vec<ActivityIdx>>,
    pub(crate) topo_order: Vec<ActivityIdx>,
}

impl Network {
    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    /// Activities in input order.
    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    pub fn index_of(&self, id: &str) -> Option<ActivityIdx> {
        self.index.get(id)
    }

    pub fn id(&self, idx: ActivityIdx) -> &str {
        &self.activities[idx as usize].id
    }

    pub fn duration(&self, idx: ActivityIdx) -> i64 {
        self.activities[idx as usize].duration
    }

    /// Distinct direct predecessors, in the order first listed.
    pub fn predecessors(&self, idx: ActivityIdx) -> &[ActivityIdx] {
        &self.predecessors[idx as usize]
    }

    /// Direct successors, ascending by input position.
    pub fn successors(&self, idx: ActivityIdx) -> &[ActivityIdx] {
        &self.successors[idx as usize]
    }

    /// Evaluation order: every activity appears after all its predecessors.
    pub fn topological_order(&self) -> &[ActivityIdx] {
        &self.topo_order
    }

    pub fn topological_ids(&self) -> Vec<&str> {
        self.topo_order.iter().map(|&idx| self.id(idx)).collect()
    }
}

/// Validate activities and build the network, stopping at the first violation.
pub fn validate(
    activities: &[Activity],
    config: &EngineConfig,
) -> Result<Network, ValidationError> {
    fn first(errors: Vec<ValidationError>) -> Result<(), ValidationError> {
        match errors.into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    first(check_shape(activities, config))?;
    let (index, duplicates) = index_activities(activities);
    first(duplicates)?;
    first(check_durations(activities))?;
    let resolved = resolve_predecessors(activities, &index);
    first(resolved.unknown)?;
    first(resolved.self_references)?;

    let network = build_network(activities, index, resolved.predecessors, config)?;
    log_summary!(
        config.verbosity,
        "Validated network: {} activities",
        network.len()
    );
    Ok(network)
}

/// Run every check and return all violations found.
///
/// Cycle detection only runs when the structural checks pass, since a cycle
/// is not well defined over duplicate or dangling ids.
pub fn collect_violations(
    activities: &[Activity],
    config: &EngineConfig,
) -> Vec<ValidationError> {
    let mut errors = check_shape(activities, config);
    let (index, duplicates) = index_activities(activities);
    errors.extend(duplicates);
    errors.extend(check_durations(activities));
    let resolved = resolve_predecessors(activities, &index);
    errors.extend(resolved.unknown);
    errors.extend(resolved.self_references);

    if errors.is_empty() {
        if let Err(err) = build_network(activities, index, resolved.predecessors, config) {
            errors.push(err);
        }
    }
    errors
}

fn check_shape(activities: &[Activity], config: &EngineConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if activities.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyNetwork,
            "No activities supplied",
            vec![],
        ));
    }

    if let Some(max) = config.max_activities {
        if activities.len() > max {
            errors.push(ValidationError::new(
                ValidationErrorKind::TooManyActivities,
                format!("{} activities supplied, at most {} allowed", activities.len(), max),
                vec![],
            ));
        }
    }

    for (pos, activity) in activities.iter().enumerate() {
        if activity.id.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidId,
                format!("Activity #{} has an empty id", pos + 1),
                vec![activity.id.clone()],
            ));
        }
    }

    errors
}

/// Intern ids in input order; later occurrences of an id are duplicates.
fn index_activities(activities: &[Activity]) -> (ActivityIndex, Vec<ValidationError>) {
    let mut index = ActivityIndex::with_capacity(activities.len());
    let mut errors = Vec::new();

    for (pos, activity) in activities.iter().enumerate() {
        if let Err(first) = index.insert(&activity.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!(
                    "Duplicate activity id '{}' (activities #{} and #{})",
                    activity.id,
                    first + 1,
                    pos + 1
                ),
                vec![activity.id.clone()],
            ));
        }
    }

    (index, errors)
}

fn check_durations(activities: &[Activity]) -> Vec<ValidationError> {
    activities
        .iter()
        .filter(|a| a.duration <= 0)
        .map(|a| {
            ValidationError::new(
                ValidationErrorKind::InvalidDuration,
                format!(
                    "Activity '{}' has duration {}, durations must be positive",
                    a.id, a.duration
                ),
                vec![a.id.clone()],
            )
        })
        .collect()
}

struct ResolvedPredecessors {
    predecessors: Vec<Vec<ActivityIdx>>,
    unknown: Vec<ValidationError>,
    self_references: Vec<ValidationError>,
}

/// Resolve predecessor ids to indices, dropping repeats within one list.
fn resolve_predecessors(activities: &[Activity], index: &ActivityIndex) -> ResolvedPredecessors {
    let mut predecessors = Vec::with_capacity(activities.len());
    let mut unknown = Vec::new();
    let mut self_references = Vec::new();

    for activity in activities {
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        let mut resolved = Vec::with_capacity(activity.predecessors.len());

        for pred_id in &activity.predecessors {
            if !seen.insert(pred_id.as_str()) {
                continue;
            }
            if *pred_id == activity.id {
                self_references.push(ValidationError::new(
                    ValidationErrorKind::SelfPredecessor,
                    format!("Activity '{}' lists itself as a predecessor", activity.id),
                    vec![activity.id.clone()],
                ));
                continue;
            }
            match index.get(pred_id) {
                Some(pred_idx) => resolved.push(pred_idx),
                None => unknown.push(ValidationError::new(
                    ValidationErrorKind::UnknownPredecessor,
                    format!(
                        "Activity '{}' references unknown predecessor '{}'",
                        activity.id, pred_id
                    ),
                    vec![activity.id.clone(), pred_id.clone()],
                )),
            }
        }

        predecessors.push(resolved);
    }

    ResolvedPredecessors {
        predecessors,
        unknown,
        self_references,
    }
}

fn build_network(
    activities: &[Activity],
    index: ActivityIndex,
    predecessors: Vec<Vec<ActivityIdx>>,
    config: &EngineConfig,
) -> Result<Network, ValidationError> {
    let mut successors: Vec<Vec<ActivityIdx>> = vec![Vec::new(); activities.len()];
    // Iterating successors in ascending index keeps each list sorted
    for (idx, preds) in predecessors.iter().enumerate() {
        for &pred in preds {
            successors[pred as usize].push(idx as ActivityIdx);
        }
    }

    let topo_order = match topological_sort(&predecessors, &successors, config.verbosity) {
        Ok(order) => order,
        Err(cycle) => {
            let ids: Vec<String> = cycle
                .iter()
                .map(|&idx| activities[idx as usize].id.clone())
                .collect();
            let mut path = ids.clone();
            if let Some(first) = ids.first() {
                path.push(first.clone());
            }
            let detail = format!("Circular dependency: {}", path.join(" → "));
            return Err(ValidationError::new(
                ValidationErrorKind::CycleDetected,
                detail,
                ids,
            ));
        }
    };

    Ok(Network {
        activities: activities.to_vec(),
        index,
        predecessors,
        successors,
        topo_order,
    })
}

/// Kahn's algorithm with ties broken by input position.
///
/// Among activities whose predecessors are all ordered, the one supplied
/// first is emitted first. Each activity enters the ready heap exactly once,
/// so the loop runs at most `n` times. On failure, returns the members of
/// one cycle in dependency order, starting from its lowest input position.
fn topological_sort(
    predecessors: &[Vec<ActivityIdx>],
    successors: &[Vec<ActivityIdx>],
    verbosity: u8,
) -> Result<Vec<ActivityIdx>, Vec<ActivityIdx>> {
    let n = predecessors.len();
    let mut pending: Vec<usize> = predecessors.iter().map(Vec::len).collect();

    let mut ready: BinaryHeap<Reverse<ActivityIdx>> = (0..n)
        .filter(|&idx| pending[idx] == 0)
        .map(|idx| Reverse(idx as ActivityIdx))
        .collect();

    let mut order: Vec<ActivityIdx> = Vec::with_capacity(n);

    while let Some(Reverse(idx)) = ready.pop() {
        log_debug!(verbosity, "order #{}: activity index {}", order.len(), idx);
        order.push(idx);

        for &succ in &successors[idx as usize] {
            let count = &mut pending[succ as usize];
            *count -= 1;
            if *count == 0 {
                ready.push(Reverse(succ));
            }
        }
    }

    if order.len() == n {
        return Ok(order);
    }

    Err(find_cycle(predecessors, &pending))
}

/// Locate one cycle among activities left unordered by the sort.
///
/// Every unordered activity has at least one unordered predecessor, so
/// walking predecessors from any of them must revisit an activity.
fn find_cycle(predecessors: &[Vec<ActivityIdx>], pending: &[usize]) -> Vec<ActivityIdx> {
    let unordered = |idx: ActivityIdx| pending[idx as usize] > 0;

    let Some(start) = (0..pending.len() as ActivityIdx).find(|&idx| unordered(idx)) else {
        return Vec::new();
    };

    let mut walk: Vec<ActivityIdx> = Vec::new();
    let mut position: Vec<Option<usize>> = vec![None; pending.len()];
    let mut current = start;

    while position[current as usize].is_none() {
        position[current as usize] = Some(walk.len());
        walk.push(current);
        match predecessors[current as usize]
            .iter()
            .copied()
            .filter(|&p| unordered(p))
            .min()
        {
            Some(next) => current = next,
            None => return walk,
        }
    }

    let cycle_start = position[current as usize].unwrap_or(0);
    // The walk follows edges backwards; flip into dependency order
    let mut cycle: Vec<ActivityIdx> = walk[cycle_start..].iter().rev().copied().collect();
    if let Some(lowest) = cycle
        .iter()
        .enumerate()
        .min_by_key(|&(_, idx)| *idx)
        .map(|(pos, _)| pos)
    {
        cycle.rotate_left(lowest);
    }
    cycle
}
