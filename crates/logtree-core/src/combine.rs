//! Deep merge of JSON mappings.
//!
//! Later values override earlier ones key by key. When both sides hold an
//! object under the same key the merge recurses instead of replacing.

use serde_json::{Map, Value};

/// Merge `src` into `dst`.
pub fn merge_into(dst: &mut Value, src: Value) {
    match (dst, src) {
        (Value::Object(d), Value::Object(s)) => {
            for (k, v) in s {
                match d.get_mut(&k) {
                    Some(existing) => merge_into(existing, v),
                    None => {
                        d.insert(k, v);
                    }
                }
            }
        }
        (dst, src) => *dst = src,
    }
}

/// Merge every value in order into one mapping (empty object for no input).
pub fn combine<I>(values: I) -> Value
where
    I: IntoIterator<Item = Value>,
{
    let mut out = Value::Object(Map::new());
    for v in values {
        merge_into(&mut out, v);
    }
    out
}
