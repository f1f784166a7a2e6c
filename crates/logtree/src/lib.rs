//! Top-level facade crate for logtree.
//!
//! Re-exports the metrics core and the server library so users can depend on a single crate.

pub mod core {
    pub use logtree_core::*;
}

pub mod server {
    pub use logtree_server::*;
}
