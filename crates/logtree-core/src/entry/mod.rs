//! Metric entries.
//!
//! An [`Entry`] is declared unbound as a container slot, bound exactly once
//! when its container is built, and mutated under its own lock afterwards.
//! Three kinds exist:
//! - [`Counter`]: integer count
//! - [`Elapsed`]: accumulated wall-clock time, rendered in seconds
//! - [`Success`]: `{count, succeed, fail}` outcome record
//!
//! Locks are per entry; unrelated entries never contend. Rendering a record
//! is not synchronized with concurrent mutation, so an emitted value may be
//! stale by the time it is delivered.

pub mod counter;
pub mod elapsed;
pub mod success;

use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use serde::Serialize;

use crate::address::Address;
use crate::error::{LogTreeError, Result};
use crate::record::{Frame, Record};
use crate::sink::Sink;

pub use counter::{Count, Counter};
pub use elapsed::{Accumulated, Elapsed, Timer};
pub use success::{Attempt, Outcomes, Success};

/// Value type held by an entry.
pub trait Metric: Serialize + Default + Send + 'static {
    /// Kind name reported in metric listings.
    const KIND: &'static str;
}

struct Binding {
    address: Address,
    sink: Arc<dyn Sink>,
    frame: OnceLock<Frame>,
}

/// A single named metric.
pub struct Entry<V> {
    binding: OnceLock<Binding>,
    value: Mutex<V>,
}

impl<V: Metric> Default for Entry<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Metric> Entry<V> {
    pub fn new() -> Self {
        Self::with_initial(V::default())
    }

    pub fn with_initial(initial: V) -> Self {
        Self {
            binding: OnceLock::new(),
            value: Mutex::new(initial),
        }
    }

    /// Attach this entry to `address` and `sink`. Fails if already bound.
    pub fn bind(&self, sink: Arc<dyn Sink>, address: Address) -> Result<()> {
        let binding = Binding {
            address,
            sink,
            frame: OnceLock::new(),
        };
        self.binding.set(binding).map_err(|rejected| {
            let address = self.address().cloned().unwrap_or(rejected.address);
            LogTreeError::AlreadyBound { address }
        })?;
        if let Some(address) = self.address() {
            tracing::debug!(%address, kind = V::KIND, "entry bound");
        }
        Ok(())
    }

    pub fn address(&self) -> Option<&Address> {
        self.binding.get().map(|b| &b.address)
    }

    pub fn is_bound(&self) -> bool {
        self.binding.get().is_some()
    }

    /// Render the address and current value as a nested record.
    pub fn record(&self) -> Result<Record> {
        let binding = self.binding.get().ok_or(LogTreeError::Unbound)?;
        let frame = binding.frame.get_or_init(|| Frame::new(&binding.address));
        let value = serde_json::to_value(&*self.lock())
            .map_err(|e| LogTreeError::Internal(format!("serialize {} failed: {e}", V::KIND)))?;
        Ok(frame.fill(value))
    }

    /// Resolve the record and hand it to the bound sink.
    pub fn emit(&self) -> Result<()> {
        let record = self.record()?;
        if let Some(binding) = self.binding.get() {
            binding.sink.emit(record);
        }
        Ok(())
    }

    /// Run `f` on the value while holding the lock.
    pub(crate) fn update<R>(&self, f: impl FnOnce(&mut V) -> R) -> R {
        f(&mut self.lock())
    }

    // A panic while holding the lock cannot leave a plain counter half-written.
    fn lock(&self) -> MutexGuard<'_, V> {
        self.value.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Type-erased view of an entry, as listed by a container.
pub trait Slot: Send + Sync {
    fn kind(&self) -> &'static str;
    fn bind(&self, sink: Arc<dyn Sink>, address: Address) -> Result<()>;
    fn address(&self) -> Option<&Address>;
    fn record(&self) -> Result<Record>;
    fn emit(&self) -> Result<()>;
}

impl<V: Metric> Slot for Entry<V> {
    fn kind(&self) -> &'static str {
        V::KIND
    }

    fn bind(&self, sink: Arc<dyn Sink>, address: Address) -> Result<()> {
        Entry::bind(self, sink, address)
    }

    fn address(&self) -> Option<&Address> {
        Entry::address(self)
    }

    fn record(&self) -> Result<Record> {
        Entry::record(self)
    }

    fn emit(&self) -> Result<()> {
        Entry::emit(self)
    }
}
