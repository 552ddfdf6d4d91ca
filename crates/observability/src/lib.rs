//! Tracing/logging setup for processes embedding the clone engine.
//!
//! The library crates only emit via `tracing` and never install a
//! subscriber; a host process (or a bench harness) calls [`init`] once.

/// Initialize process-wide observability (tracing/logging).
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

/// Tracing configuration (filters, output format).
pub mod tracing;
