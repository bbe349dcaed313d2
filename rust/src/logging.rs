//! Logging macros with verbosity level control.
//!
//! Logging is free when disabled (verbosity=0). Each config struct carries its
//! own `verbosity` so selection, scheduling and ranking can be traced
//! independently:
//! - 0: SILENT (only errors)
//! - 1: CHANGES (chosen options, emitted slots, ranking winners)
//! - 2: CHECKS (filter outcomes, diversity relaxation, reused times)
//! - 3: DEBUG (sampling weights and draws)

/// Verbosity level constants.
pub const VERBOSITY_SILENT: u8 = 0;
pub const VERBOSITY_CHANGES: u8 = 1;
pub const VERBOSITY_CHECKS: u8 = 2;
pub const VERBOSITY_DEBUG: u8 = 3;

/// Log at CHANGES level (verbosity >= 1).
///
/// Used for: selected options, emitted slots, ranking winners.
#[macro_export]
macro_rules! log_changes {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_CHANGES {
            eprintln!($($arg)*);
        }
    };
}

/// Log at CHECKS level (verbosity >= 2).
///
/// Used for: objective/diversity filter results, fallbacks, reused times.
#[macro_export]
macro_rules! log_checks {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_CHECKS {
            eprintln!($($arg)*);
        }
    };
}

/// Log at DEBUG level (verbosity >= 3).
///
/// Used for: sampling weights, spread offsets, per-day slot probing.
#[macro_export]
macro_rules! log_debug {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_DEBUG {
            eprintln!($($arg)*);
        }
    };
}
