use logtree_core::container::{slot, Container};
use logtree_core::{Counter, Elapsed, Slot, Success};

/// Request tracking for the HTTP surface.
#[derive(Default)]
pub struct HttpMetrics {
    pub requests: Counter,
    pub latency: Elapsed,
    /// Success means a 2xx or 3xx status.
    pub handled: Success,
}

impl Container for HttpMetrics {
    const ADDRESS: &'static [&'static str] = &["http"];

    fn slots(&self) -> Vec<(&'static str, &dyn Slot)> {
        vec![
            slot("requests", &self.requests),
            slot("latency", &self.latency),
            slot("handled", &self.handled),
        ]
    }
}

/// Flush loop tracking.
#[derive(Default)]
pub struct FlushMetrics {
    pub cycles: Success,
    pub duration: Elapsed,
}

impl Container for FlushMetrics {
    const ADDRESS: &'static [&'static str] = &["flush"];

    fn slots(&self) -> Vec<(&'static str, &dyn Slot)> {
        vec![slot("cycles", &self.cycles), slot("duration", &self.duration)]
    }
}
