//! Registry of container types.
//!
//! Populated by explicit [`Registry::register`] calls at startup. The
//! duplicate-address check is a separate whole-system pass, not a guard run
//! on every registration.

use std::any::TypeId;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use serde_json::Value;

use crate::address::Address;
use crate::combine::combine;
use crate::container::Container;
use crate::error::{Collision, LogTreeError, Result};

/// Descriptor of one registered container type.
#[derive(Debug, Clone)]
pub struct ContainerInfo {
    pub type_id: TypeId,
    pub type_name: &'static str,
    pub address: Address,
    metric_list: fn() -> Value,
    seq: u64,
}

impl ContainerInfo {
    pub fn of<C: Container>() -> Self {
        Self {
            type_id: TypeId::of::<C>(),
            type_name: std::any::type_name::<C>(),
            address: C::address(),
            metric_list: C::metric_list,
            seq: 0,
        }
    }

    pub fn metric_list(&self) -> Value {
        (self.metric_list)()
    }
}

#[derive(Default)]
pub struct Registry {
    by_address: DashMap<Address, Vec<ContainerInfo>>,
    seq: AtomicU64,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record container type `C`. Returns false if it was already registered.
    pub fn register<C: Container>(&self) -> bool {
        let mut info = ContainerInfo::of::<C>();
        let mut bucket = self.by_address.entry(info.address.clone()).or_insert_with(Vec::new);
        if bucket.iter().any(|i| i.type_id == info.type_id) {
            return false;
        }
        info.seq = self.seq.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(address = %info.address, container = info.type_name, "container type registered");
        bucket.push(info);
        true
    }

    /// Fail with every address prefix claimed by more than one type.
    pub fn validate_no_duplicate_addresses(&self) -> Result<()> {
        let mut collisions: Vec<Collision> = self
            .by_address
            .iter()
            .filter(|e| e.value().len() > 1)
            .map(|e| Collision {
                address: e.key().clone(),
                claimants: e.value().iter().map(|i| i.type_name).collect(),
            })
            .collect();
        if collisions.is_empty() {
            return Ok(());
        }
        collisions.sort_by(|a, b| a.address.cmp(&b.address));
        let err = LogTreeError::DuplicateAddress(collisions);
        tracing::error!(error = %err, "metric address validation failed");
        Err(err)
    }

    /// Validate, then merge the metric listing of every registered type.
    pub fn metric_list(&self) -> Result<Value> {
        self.validate_no_duplicate_addresses()?;
        Ok(combine(self.infos().iter().map(ContainerInfo::metric_list)))
    }

    /// Registered descriptors in registration order.
    pub fn infos(&self) -> Vec<ContainerInfo> {
        let mut infos: Vec<ContainerInfo> = self
            .by_address
            .iter()
            .flat_map(|e| e.value().clone())
            .collect();
        infos.sort_by_key(|i| i.seq);
        infos
    }

    /// Distinct registered prefixes, sorted.
    pub fn addresses(&self) -> Vec<Address> {
        let mut out: Vec<Address> = self.by_address.iter().map(|e| e.key().clone()).collect();
        out.sort();
        out
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.by_address.iter().map(|e| e.value().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.by_address.clear();
    }
}
