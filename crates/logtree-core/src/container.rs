//! Containers: declaring units that own and address entries.
//!
//! A container type names its address prefix and lists its entry slots
//! explicitly. Building a container binds every slot to
//! `prefix + slot name` and to the shared sink.
//!
//! ```ignore
//! #[derive(Default)]
//! struct Svc {
//!     requests: Counter,
//!     latency: Elapsed,
//! }
//!
//! impl Container for Svc {
//!     const ADDRESS: &'static [&'static str] = &["svc"];
//!
//!     fn slots(&self) -> Vec<(&'static str, &dyn Slot)> {
//!         vec![slot("requests", &self.requests), slot("latency", &self.latency)]
//!     }
//! }
//! ```

use std::collections::HashSet;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::address::Address;
use crate::combine::combine;
use crate::entry::Slot;
use crate::error::{LogTreeError, Result};
use crate::record::Record;
use crate::sink::Sink;

/// Pair a slot name with its entry, as returned from [`Container::slots`].
pub fn slot<'a>(name: &'static str, entry: &'a dyn Slot) -> (&'static str, &'a dyn Slot) {
    (name, entry)
}

pub trait Container: Default + Send + Sync + 'static {
    /// Address prefix shared by every slot of this type.
    const ADDRESS: &'static [&'static str];

    /// Declared slots as `(name, entry)` pairs. Order is not observable.
    fn slots(&self) -> Vec<(&'static str, &dyn Slot)>;

    fn address() -> Address {
        Address::from_static(Self::ADDRESS)
    }

    /// Create an instance and bind all of its slots to `sink`.
    fn build(sink: Arc<dyn Sink>) -> Result<Self> {
        let container = Self::default();
        container.bind(sink)?;
        Ok(container)
    }

    /// Bind every slot. Fails on a repeated slot name before binding
    /// anything, then on the first slot that is already bound.
    fn bind(&self, sink: Arc<dyn Sink>) -> Result<()> {
        let prefix = Self::address();
        let slots = self.slots();
        let mut seen = HashSet::with_capacity(slots.len());
        if let Some((name, _)) = slots.iter().find(|(name, _)| !seen.insert(*name)) {
            return Err(LogTreeError::DuplicateSlot {
                address: prefix.child(name),
            });
        }
        for (name, slot) in slots {
            slot.bind(Arc::clone(&sink), prefix.child(name))?;
        }
        tracing::debug!(prefix = %prefix, container = std::any::type_name::<Self>(), "container bound");
        Ok(())
    }

    /// One record per slot.
    fn records(&self) -> Result<Vec<Record>> {
        self.slots().into_iter().map(|(_, slot)| slot.record()).collect()
    }

    /// Every slot record merged into one tree.
    fn snapshot(&self) -> Result<Value> {
        Ok(combine(self.records()?))
    }

    /// Emit every slot to the bound sink.
    fn emit_all(&self) -> Result<()> {
        for (_, slot) in self.slots() {
            slot.emit()?;
        }
        Ok(())
    }

    /// Type-level listing: the prefix tree with each slot mapped to its kind.
    fn metric_list() -> Value {
        let declared = Self::default();
        let kinds: Map<String, Value> = declared
            .slots()
            .into_iter()
            .map(|(name, slot)| (name.to_string(), Value::from(slot.kind())))
            .collect();
        Self::address().nest(Value::Object(kinds))
    }
}

/// Object-safe handle over any built container, for flushing a mixed set.
pub trait Flush: Send + Sync {
    fn prefix(&self) -> Address;
    fn tree(&self) -> Result<Value>;
    fn flush(&self) -> Result<()>;
}

impl<C: Container> Flush for C {
    fn prefix(&self) -> Address {
        C::address()
    }

    fn tree(&self) -> Result<Value> {
        self.snapshot()
    }

    fn flush(&self) -> Result<()> {
        self.emit_all()
    }
}
