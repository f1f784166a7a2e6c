//! Sink construction from config.

use std::sync::Arc;

use logtree_core::sink::{JsonLineSink, MemorySink, NullSink, Sink, TracingSink};

use crate::config::SinkKind;

pub fn build_sink(kind: SinkKind) -> Arc<dyn Sink> {
    match kind {
        SinkKind::Stdout => Arc::new(JsonLineSink::stdout()),
        SinkKind::Tracing => Arc::new(TracingSink),
        SinkKind::Memory => Arc::new(MemorySink::new()),
        SinkKind::Null => Arc::new(NullSink),
    }
}
