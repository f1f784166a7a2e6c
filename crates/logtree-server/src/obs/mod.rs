//! The server's own metrics, declared as logtree containers.
//!
//! These flow through the same sink and flush loop as any attached
//! container, so the exporter reports on itself.

pub mod metrics;

pub use metrics::{FlushMetrics, HttpMetrics};
