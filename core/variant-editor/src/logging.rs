//! FILENAME: core/variant-editor/src/logging.rs
// PURPOSE: Category-tagged logging macros for editor commands.
// CONTEXT: Every line carries a category (e.g. "DRAFT") as its `log` target,
//          so a host can filter editor traffic. The host installs the logger.

// ============================================================================
// MACRO DEFINITIONS & EXPORTS
// ============================================================================

#[macro_export]
macro_rules! log_debug {
    ($cat:expr, $($arg:tt)*) => {
        ::log::debug!(target: $cat, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_info {
    ($cat:expr, $($arg:tt)*) => {
        ::log::info!(target: $cat, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($cat:expr, $($arg:tt)*) => {
        ::log::warn!(target: $cat, $($arg)*)
    };
}

// ENTER/EXIT macros for command tracing

#[macro_export]
macro_rules! log_enter {
    ($cat:expr, $func:expr) => {
        ::log::debug!(target: $cat, "ENTER {}", $func)
    };
    ($cat:expr, $func:expr, $($arg:tt)*) => {
        ::log::debug!(target: $cat, "ENTER {} {}", $func, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_exit {
    ($cat:expr, $func:expr) => {
        ::log::debug!(target: $cat, "EXIT {}", $func)
    };
    ($cat:expr, $func:expr, $($arg:tt)*) => {
        ::log::debug!(target: $cat, "EXIT {} {}", $func, format_args!($($arg)*))
    };
}
