//! Record delivery targets.
//!
//! A sink receives one fully resolved record per emission. Delivery failures
//! stay inside the sink: the caller never blocks on, or retries, a delivery.

use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use crate::record::Record;

/// Delivery target for resolved records.
pub trait Sink: Send + Sync {
    fn emit(&self, record: Record);
}

/// Writes each record as one JSON line.
pub struct JsonLineSink<W> {
    out: Mutex<W>,
}

impl<W: Write + Send> JsonLineSink<W> {
    pub fn new(out: W) -> Self {
        Self { out: Mutex::new(out) }
    }

    /// Consume the sink and return the writer.
    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl JsonLineSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> Sink for JsonLineSink<W> {
    fn emit(&self, record: Record) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        let res = serde_json::to_writer(&mut *out, &record)
            .map_err(io::Error::from)
            .and_then(|()| out.write_all(b"\n"))
            .and_then(|()| out.flush());
        if let Err(e) = res {
            tracing::warn!(error = %e, "json line sink write failed; record dropped");
        }
    }
}

/// Emits each record as a `tracing` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl Sink for TracingSink {
    fn emit(&self, record: Record) {
        tracing::info!(target: "logtree::record", record = %record);
    }
}

/// Keeps every record in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<Record>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything emitted so far.
    pub fn records(&self) -> Vec<Record> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Drain everything emitted so far.
    pub fn take(&self) -> Vec<Record> {
        std::mem::take(&mut *self.records.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Sink for MemorySink {
    fn emit(&self, record: Record) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record);
    }
}

/// Discards every record.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl Sink for NullSink {
    fn emit(&self, _record: Record) {}
}
