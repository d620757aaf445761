//! Tracing and logging (shared setup).

/// Initialize process-wide logging with JSON output.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

pub use self::tracing::{init_with, LogFormat};

/// Tracing configuration (filters, formats).
pub mod tracing;
