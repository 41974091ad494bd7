//! Critical Path Method evaluation.
//!
//! Runs the forward pass (earliest start/finish) in topological order and the
//! backward pass (latest start/finish) in reverse order over a validated
//! [`Network`](crate::network::Network), then derives float, criticality and
//! a single ordered critical path.

mod calculation;
mod path;
mod scheduler;
mod types;

pub use calculation::{calculate_timings, evaluate, EvaluationError};
pub use path::critical_sequence;
pub use scheduler::{schedule, ScheduleError};
pub use types::{ActivityTiming, NetworkTimings};
