//! Tracing and logging setup shared by HRMS binaries.

/// Initialize process-wide structured logging (JSON to stderr).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(tracing::LogFormat::Json);
}

/// Tracing configuration (filters, layers).
pub mod tracing;
