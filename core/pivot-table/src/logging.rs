//! FILENAME: core/pivot-table/src/logging.rs
// PURPOSE: Category-tagged logging macros routed through the `log` facade.

// ============================================================================
// MACRO DEFINITIONS & EXPORTS
// ============================================================================

// The category becomes the `log` target, so sinks can filter on "PIVOT".

macro_rules! log_debug {
    ($cat:expr, $($arg:tt)*) => {
        ::log::debug!(target: $cat, $($arg)*)
    };
}

macro_rules! log_warn {
    ($cat:expr, $($arg:tt)*) => {
        ::log::warn!(target: $cat, $($arg)*)
    };
}

macro_rules! log_enter {
    ($cat:expr, $func:expr) => {
        ::log::trace!(target: $cat, "ENTER {}", $func)
    };
    ($cat:expr, $func:expr, $($arg:tt)*) => {
        ::log::trace!(target: $cat, "ENTER {} {}", $func, format_args!($($arg)*))
    };
}

macro_rules! log_exit {
    ($cat:expr, $func:expr) => {
        ::log::trace!(target: $cat, "EXIT {}", $func)
    };
    ($cat:expr, $func:expr, $($arg:tt)*) => {
        ::log::trace!(target: $cat, "EXIT {} {}", $func, format_args!($($arg)*))
    };
}

/// Log category used by every render pass.
pub const CATEGORY: &str = "PIVOT";
