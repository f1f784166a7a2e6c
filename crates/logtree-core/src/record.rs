//! Nested record rendering.

use serde_json::Value;

use crate::address::Address;

/// Nested mapping mirroring an entry's address, leaf holding its value.
pub type Record = Value;

/// Resolved nesting for one address: the skeleton record plus the pointer
/// to its attachment point (the innermost slot).
#[derive(Debug, Clone)]
pub(crate) struct Frame {
    skeleton: Value,
    leaf: String,
}

impl Frame {
    pub(crate) fn new(address: &Address) -> Self {
        Self {
            skeleton: address.nest(Value::Null),
            leaf: address.json_pointer(),
        }
    }

    /// Copy of the skeleton with `value` written into the attachment point.
    pub(crate) fn fill(&self, value: Value) -> Record {
        let mut out = self.skeleton.clone();
        if let Some(slot) = out.pointer_mut(&self.leaf) {
            *slot = value;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn fill_reuses_skeleton() {
        let frame = Frame::new(&Address::new(["svc", "requests"]));
        assert_eq!(frame.fill(json!(1)), json!({"svc": {"requests": 1}}));
        assert_eq!(frame.fill(json!(2)), json!({"svc": {"requests": 2}}));
    }
}
