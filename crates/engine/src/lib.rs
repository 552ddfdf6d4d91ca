//! `snapgraph-engine` — topology-preserving deep clone of value graphs.
//!
//! One public operation, [`deep_clone`]: given any
//! [`Value`](snapgraph_core::Value), produce an independent copy in which
//! every reachable composite is freshly allocated and the source's sharing
//! topology — diamonds and cycles included — is reproduced exactly. The
//! source graph is never written to.

pub mod clone;

pub use clone::deep_clone;
