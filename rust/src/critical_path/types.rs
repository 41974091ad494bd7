//! Types for critical path calculation.

/// Per-activity timing produced by the forward and backward passes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ActivityTiming {
    /// Earliest possible start time (from forward pass).
    pub earliest_start: i64,
    /// Earliest possible finish time (from forward pass).
    pub earliest_finish: i64,
    /// Latest allowable start time (from backward pass).
    pub latest_start: i64,
    /// Latest allowable finish time (from backward pass).
    pub latest_finish: i64,
    /// Float = latest_start - earliest_start.
    pub float: i64,
}

impl ActivityTiming {
    pub fn is_critical(&self) -> bool {
        self.float == 0
    }
}

/// Timing table for a whole network, indexed by activity position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetworkTimings {
    pub timings: Vec<ActivityTiming>,
    /// Largest earliest finish over all activities.
    pub project_duration: i64,
}
