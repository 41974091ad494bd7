//! Critical path extraction.

use crate::interner::ActivityIdx;

use super::types::ActivityTiming;

/// Critical activities ordered by earliest start.
///
/// Activities sharing an earliest start (parallel critical branches) keep
/// their input order. The result is one sequence even when the network has
/// several alternative critical paths.
pub fn critical_sequence(timings: &[ActivityTiming]) -> Vec<ActivityIdx> {
    let mut critical: Vec<ActivityIdx> = timings
        .iter()
        .enumerate()
        .filter(|(_, timing)| timing.is_critical())
        .map(|(idx, _)| idx as ActivityIdx)
        .collect();
    critical.sort_by_key(|&idx| (timings[idx as usize].earliest_start, idx));
    critical
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timing(earliest_start: i64, float: i64) -> ActivityTiming {
        ActivityTiming {
            earliest_start,
            earliest_finish: earliest_start + 1,
            latest_start: earliest_start + float,
            latest_finish: earliest_start + float + 1,
            float,
        }
    }

    #[test]
    fn test_orders_by_earliest_start() {
        let timings = vec![timing(5, 0), timing(0, 0), timing(2, 1), timing(3, 0)];
        assert_eq!(critical_sequence(&timings), vec![1, 3, 0]);
    }

    #[test]
    fn test_equal_starts_keep_input_order() {
        let timings = vec![timing(4, 0), timing(0, 0), timing(4, 0), timing(0, 0)];
        assert_eq!(critical_sequence(&timings), vec![1, 3, 0, 2]);
    }

    #[test]
    fn test_no_critical_activities() {
        let timings = vec![timing(0, 2), timing(1, 1)];
        assert!(critical_sequence(&timings).is_empty());
    }
}
