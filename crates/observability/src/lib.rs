//! Process-wide tracing setup shared by every binary and test harness.

/// Initialize structured logging with the default filter (`info`).
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(tracing::DEFAULT_FILTER);
}

/// Tracing configuration (filters, formatter).
pub mod tracing;
