//! Pointer-derived identity for composites.

/// Identity of a composite allocation.
///
/// Two handles map to the same `CompositeId` iff they alias the same cell,
/// so this is the key type for any "have I seen this node" bookkeeping over
/// a value graph.
///
/// A `CompositeId` is only meaningful while some handle keeps the
/// allocation alive. A map keyed by `CompositeId` must also hold a handle
/// to each composite it refers to, otherwise a freed allocation could be
/// reused and two unrelated composites would collide.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct CompositeId(usize);

impl CompositeId {
    pub(crate) fn from_ptr(ptr: *const ()) -> Self {
        Self(ptr as usize)
    }
}
