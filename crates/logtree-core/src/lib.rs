//! logtree core: addressed metric entries, their containers, and sinks.
//!
//! Containers declare a prefix and a fixed list of entry slots. Building a
//! container binds each slot to `prefix + slot name` and to a shared
//! [`Sink`]; entries then render themselves as nested JSON records such as
//! `{"svc": {"requests": 1}}`. A [`Registry`] of container types checks that
//! no two types claim the same prefix.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here.
//! All fallible paths surface as `LogTreeError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod address;
pub mod combine;
pub mod container;
pub mod entry;
pub mod error;
pub mod record;
pub mod registry;
pub mod sink;

pub use address::Address;
pub use container::{slot, Container, Flush};
pub use entry::{Counter, Elapsed, Entry, Outcomes, Slot, Success};
pub use error::{LogTreeError, Result};
pub use record::Record;
pub use registry::Registry;
pub use sink::Sink;
