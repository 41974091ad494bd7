//! Verbosity-gated diagnostics for the CPM engine.
//!
//! Output goes to stderr and costs nothing at verbosity 0.
//! - 0: SILENT
//! - 1: SUMMARY (project duration, critical path)
//! - 2: PASSES (per-activity forward/backward results)
//! - 3: DEBUG (topological ordering decisions)

pub const VERBOSITY_SILENT: u8 = 0;
pub const VERBOSITY_SUMMARY: u8 = 1;
pub const VERBOSITY_PASSES: u8 = 2;
pub const VERBOSITY_DEBUG: u8 = 3;

/// Log at SUMMARY level (verbosity >= 1).
#[macro_export]
macro_rules! log_summary {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_SUMMARY {
            eprintln!("[cpm] {}", format_args!($($arg)*));
        }
    };
}

/// Log at PASSES level (verbosity >= 2).
#[macro_export]
macro_rules! log_passes {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_PASSES {
            eprintln!("[cpm]   {}", format_args!($($arg)*));
        }
    };
}

/// Log at DEBUG level (verbosity >= 3).
#[macro_export]
macro_rules! log_debug {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_DEBUG {
            eprintln!("[cpm]     {}", format_args!($($arg)*));
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_are_ordered() {
        assert!(VERBOSITY_SILENT < VERBOSITY_SUMMARY);
        assert!(VERBOSITY_SUMMARY < VERBOSITY_PASSES);
        assert!(VERBOSITY_PASSES < VERBOSITY_DEBUG);
    }

    #[test]
    fn test_silent_macros_do_not_format() {
        // A silent verbosity must not evaluate into output
        let verbosity = VERBOSITY_SILENT;
        log_summary!(verbosity, "duration {}", 8);
        log_passes!(verbosity, "{} est={}", "A", 0);
        log_debug!(verbosity, "heap {:?}", [0u32, 1]);
    }
}
