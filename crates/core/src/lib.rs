//! `snapgraph-core` — value-graph foundation building blocks.
//!
//! The value model shared by the rest of the workspace: a closed tagged
//! union over primitive leaves and shared composite handles ([`Value`]),
//! pointer identity for composites ([`CompositeId`]), and cycle-aware
//! structural comparison ([`structural_eq`]).
//!
//! Composites are `Rc`-backed handles with interior mutability, so a value
//! graph can alias and even reference itself. Handles are `!Send`; a graph
//! belongs to one thread. A cyclic graph keeps itself alive until the caller
//! breaks one of its edges.

pub mod eq;
pub mod error;
pub mod identity;
pub mod record;
pub mod sequence;
pub mod value;

pub use eq::structural_eq;
pub use error::{GraphError, GraphResult};
pub use identity::CompositeId;
pub use record::{Entries, Record};
pub use sequence::Sequence;
pub use value::Value;
