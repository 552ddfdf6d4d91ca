//! Deep clone of a value graph, preserving its sharing topology.
//!
//! The traversal never mutates the source. Visited composites are tracked
//! in a registry keyed by allocation identity, and each composite's clone
//! is registered *before* its children are walked, so a child that
//! circularly references an ancestor resolves to the ancestor's in-progress
//! clone instead of descending again. An explicit worklist drives the walk,
//! so depth is bounded by heap rather than call stack.

use std::collections::HashMap;

use snapgraph_core::{CompositeId, GraphResult, Record, Sequence, Value};

/// Pattern for the per-call correlation token attached to log events.
const TOKEN_PATTERN: &str = "xxxx-xxxx";

/// Deep clone `source`.
///
/// Every composite transitively reachable from `source` is reallocated;
/// every primitive leaf is carried over (`Text` by value, `Opaque` by
/// reference). Aliasing is preserved: where the source reaches the same
/// composite over several paths, the clone reaches one freshly allocated
/// composite over the same paths, and cyclic references close onto the
/// clone instead of the source.
///
/// The walk is a single synchronous pass in depth-first, first-discovered
/// key order. Fails with [`NodeBusy`](snapgraph_core::GraphError::NodeBusy)
/// when a reachable composite is mutably borrowed; on failure the source is
/// untouched and the partially built clone is discarded wholesale.
pub fn deep_clone(source: &Value) -> GraphResult<Value> {
    let op = snapgraph_ident::generate(TOKEN_PATTERN);
    tracing::debug!(op = %op, kind = source.kind(), "deep clone started");

    let mut session = CloneSession::default();
    let result = session.run(source);

    match &result {
        Ok(_) => tracing::debug!(
            op = %op,
            composites = session.registry.len(),
            shared_hits = session.shared_hits,
            "deep clone finished"
        ),
        Err(err) => tracing::debug!(op = %op, error = %err, "deep clone failed"),
    }

    result
}

/// One fill task: a source composite and the empty clone to populate.
enum Task {
    Sequence { source: Sequence, clone: Sequence },
    Record { source: Record, clone: Record },
}

/// Registry entry for one visited source composite.
///
/// Keeps a handle to the source alongside the clone so the source
/// allocation — and with it the `CompositeId` key — stays alive for the
/// whole traversal.
struct Visited {
    _source: Value,
    clone: Value,
}

#[derive(Default)]
struct CloneSession {
    registry: HashMap<CompositeId, Visited>,
    pending: Vec<Task>,
    shared_hits: usize,
}

impl CloneSession {
    fn run(&mut self, source: &Value) -> GraphResult<Value> {
        let root = self.enter(source);
        self.drain()?;
        Ok(root)
    }

    /// Resolve one value: primitives copy, composites resolve through the
    /// registry, allocating and scheduling a fresh clone on first visit.
    fn enter(&mut self, value: &Value) -> Value {
        match value {
            Value::Sequence(source) => {
                let id = source.identity();
                if let Some(seen) = self.registry.get(&id) {
                    self.shared_hits += 1;
                    return seen.clone.clone();
                }
                let fresh = Sequence::new();
                self.pending.push(Task::Sequence {
                    source: source.clone(),
                    clone: fresh.clone(),
                });
                self.register(id, value.clone(), Value::Sequence(fresh.clone()));
                Value::Sequence(fresh)
            }
            Value::Record(source) => {
                let id = source.identity();
                if let Some(seen) = self.registry.get(&id) {
                    self.shared_hits += 1;
                    return seen.clone.clone();
                }
                let fresh = Record::new();
                self.pending.push(Task::Record {
                    source: source.clone(),
                    clone: fresh.clone(),
                });
                self.register(id, value.clone(), Value::Record(fresh.clone()));
                Value::Record(fresh)
            }
            leaf => leaf.clone(),
        }
    }

    fn register(&mut self, id: CompositeId, source: Value, clone: Value) {
        self.registry.insert(
            id,
            Visited {
                _source: source,
                clone,
            },
        );
    }

    /// Fill scheduled clones until none remain.
    ///
    /// Children are snapshotted out of the source cell before any are
    /// entered, so no source borrow is held while the session works. Tasks
    /// discovered while filling one node are reversed in place, so the next
    /// pop continues with that node's first-discovered child: the walk
    /// stays depth-first in discovery order.
    fn drain(&mut self) -> GraphResult<()> {
        while let Some(task) = self.pending.pop() {
            let mark = self.pending.len();
            match task {
                Task::Sequence { source, clone } => {
                    for child in source.snapshot()? {
                        let cloned = self.enter(&child);
                        clone.push(cloned)?;
                    }
                }
                Task::Record { source, clone } => {
                    for (key, child) in source.snapshot()? {
                        let cloned = self.enter(&child);
                        clone.insert(key, cloned)?;
                    }
                }
            }
            self.pending[mark..].reverse();
        }
        Ok(())
    }
}
