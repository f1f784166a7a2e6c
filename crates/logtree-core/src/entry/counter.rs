use serde::Serialize;

use super::{Entry, Metric};

/// Integer count. Serializes as a bare number.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Count(pub u64);

impl Metric for Count {
    const KIND: &'static str = "counter";
}

pub type Counter = Entry<Count>;

impl Entry<Count> {
    /// Increment by 1.
    pub fn inc(&self) {
        self.increment(1);
    }

    /// Add `delta` to the count.
    pub fn increment(&self, delta: u64) {
        self.update(|c| c.0 = c.0.saturating_add(delta));
    }

    pub fn value(&self) -> u64 {
        self.update(|c| c.0)
    }
}
