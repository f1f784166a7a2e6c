//! Tree addresses of metric entries.

use std::fmt;

use serde_json::{Map, Value};

/// Ordered path segments locating one entry in the metrics tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(Vec<String>);

impl Address {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// Address of a container-declared prefix.
    pub fn from_static(segments: &[&'static str]) -> Self {
        Self::new(segments.iter().copied())
    }

    /// Extend this address by one trailing segment.
    pub fn child(&self, segment: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.to_string());
        Self(segments)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// RFC 6901 pointer to the innermost slot of [`Address::nest`].
    pub fn json_pointer(&self) -> String {
        self.0
            .iter()
            .map(|s| format!("/{}", s.replace('~', "~0").replace('/', "~1")))
            .collect()
    }

    /// Wrap `leaf` in one single-key object per segment, innermost last.
    ///
    /// `(a, b, c)` with leaf `5` becomes `{"a": {"b": {"c": 5}}}`.
    pub fn nest(&self, leaf: Value) -> Value {
        self.0.iter().rev().fold(leaf, |inner, key| {
            let mut m = Map::with_capacity(1);
            m.insert(key.clone(), inner);
            Value::Object(m)
        })
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use serde_json::json;

    #[test]
    fn nest_wraps_innermost_last() {
        let a = Address::new(["a", "b", "c"]);
        assert_eq!(a.nest(json!(5)), json!({"a": {"b": {"c": 5}}}));
    }

    #[test]
    fn empty_address_is_the_leaf_itself() {
        assert_eq!(Address::default().nest(json!(1)), json!(1));
        assert_eq!(Address::default().json_pointer(), "");
    }

    #[test]
    fn pointer_escapes_reserved_chars() {
        let a = Address::new(["x/y", "m~n"]);
        assert_eq!(a.json_pointer(), "/x~1y/m~0n");
        let v = a.nest(json!(true));
        assert_eq!(v.pointer(&a.json_pointer()), Some(&json!(true)));
    }

    #[test]
    fn child_and_display() {
        let a = Address::from_static(&["svc"]).child("requests");
        assert_eq!(a.len(), 2);
        assert_eq!(a.to_string(), "svc.requests");
    }
}
