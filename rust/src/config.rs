//! Configuration for the CPM engine.

use pyo3::prelude::*;

/// Engine configuration shared by validation and evaluation.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Verbosity level: 0=silent, 1=summary, 2=passes, 3=debug.
    #[pyo3(get, set)]
    pub verbosity: u8,
    /// Upper bound on the number of activities accepted (None = unbounded).
    #[pyo3(get, set)]
    pub max_activities: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            verbosity: crate::logging::VERBOSITY_SILENT,
            max_activities: None,
        }
    }
}

#[pymethods]
impl EngineConfig {
    #[new]
    #[pyo3(signature = (verbosity=None, max_activities=None))]
    fn new(verbosity: Option<u8>, max_activities: Option<usize>) -> Self {
        let defaults = Self::default();
        Self {
            verbosity: verbosity.unwrap_or(defaults.verbosity),
            max_activities: max_activities.or(defaults.max_activities),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "EngineConfig(verbosity={}, max_activities={:?})",
            self.verbosity, self.max_activities
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.verbosity, 0);
        assert_eq!(config.max_activities, None);
    }

    #[test]
    fn test_constructor_fills_missing_from_defaults() {
        let config = EngineConfig::new(Some(2), None);
        assert_eq!(config.verbosity, 2);
        assert_eq!(config.max_activities, None);

        let capped = EngineConfig::new(None, Some(50));
        assert_eq!(capped.verbosity, 0);
        assert_eq!(capped.max_activities, Some(50));
    }
}
