//! Tracing/logging setup shared by binaries and test harnesses.

/// Tracing configuration (filters, layers).
pub mod tracing;

/// Initialize process-wide logging.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

/// Initialize human-readable logging (for the demo shell and local debugging).
pub fn init_pretty() {
    tracing::init_pretty();
}
