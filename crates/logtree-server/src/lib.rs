//! logtree server library entry.
//!
//! Wires config, sink, registry, and the server's own containers into an
//! exporter that flushes records periodically and serves the metrics tree
//! over HTTP. Consumed by the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod flush;
pub mod obs;
pub mod router;
pub mod sink;
