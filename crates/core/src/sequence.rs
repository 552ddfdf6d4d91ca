//! Ordered list composite.

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use crate::error::{GraphError, GraphResult};
use crate::identity::CompositeId;
use crate::value::Value;

/// Handle to a shared, mutable, ordered list of values.
///
/// Cloning a `Sequence` clones the handle: both handles alias the same
/// underlying cell. Every accessor that crosses the cell boundary returns
/// [`GraphResult`], so a borrow held elsewhere (e.g. inside
/// [`with_mut`](Sequence::with_mut)) surfaces as
/// [`GraphError::NodeBusy`] instead of a panic.
#[derive(Clone)]
pub struct Sequence {
    items: Rc<RefCell<Vec<Value>>>,
}

impl Sequence {
    pub fn new() -> Self {
        Self {
            items: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn of(items: impl IntoIterator<Item = Value>) -> Self {
        Self {
            items: Rc::new(RefCell::new(items.into_iter().collect())),
        }
    }

    /// Identity of the underlying allocation; equal iff two handles alias.
    pub fn identity(&self) -> CompositeId {
        CompositeId::from_ptr(Rc::as_ptr(&self.items) as *const ())
    }

    /// Whether `self` and `other` alias the same cell.
    pub fn ptr_eq(&self, other: &Sequence) -> bool {
        Rc::ptr_eq(&self.items, &other.items)
    }

    pub fn len(&self) -> GraphResult<usize> {
        Ok(self.cell()?.len())
    }

    pub fn is_empty(&self) -> GraphResult<bool> {
        Ok(self.cell()?.is_empty())
    }

    /// Element at `index`, aliased. `None` when out of range.
    pub fn get(&self, index: usize) -> GraphResult<Option<Value>> {
        Ok(self.cell()?.get(index).cloned())
    }

    /// Replace the element at `index`.
    pub fn set(&self, index: usize, value: Value) -> GraphResult<()> {
        let mut items = self.cell_mut()?;
        let len = items.len();
        match items.get_mut(index) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(GraphError::out_of_bounds(index, len)),
        }
    }

    pub fn push(&self, value: Value) -> GraphResult<()> {
        self.cell_mut()?.push(value);
        Ok(())
    }

    /// Ordered snapshot of the children. The returned values alias the
    /// originals; no borrow is held once this returns.
    pub fn snapshot(&self) -> GraphResult<Vec<Value>> {
        Ok(self.cell()?.clone())
    }

    /// Read access to the elements while the borrow is held.
    pub fn with<R>(&self, f: impl FnOnce(&[Value]) -> R) -> GraphResult<R> {
        let items = self.cell()?;
        Ok(f(&items))
    }

    /// Mutable access to the elements while the borrow is held. Re-entering
    /// this sequence through another handle inside `f` reports
    /// [`GraphError::NodeBusy`].
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut Vec<Value>) -> R) -> GraphResult<R> {
        let mut items = self.cell_mut()?;
        Ok(f(&mut items))
    }

    fn cell(&self) -> GraphResult<Ref<'_, Vec<Value>>> {
        self.items.try_borrow().map_err(|_| GraphError::busy("sequence"))
    }

    fn cell_mut(&self) -> GraphResult<RefMut<'_, Vec<Value>>> {
        self.items
            .try_borrow_mut()
            .map_err(|_| GraphError::busy("sequence"))
    }
}

impl Default for Sequence {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_get_preserve_order() {
        let seq = Sequence::new();
        seq.push(Value::Int(1)).unwrap();
        seq.push(Value::Int(2)).unwrap();

        assert_eq!(seq.len().unwrap(), 2);
        assert!(matches!(seq.get(0).unwrap(), Some(Value::Int(1))));
        assert!(matches!(seq.get(1).unwrap(), Some(Value::Int(2))));
        assert!(seq.get(2).unwrap().is_none());
    }

    #[test]
    fn set_replaces_in_place_and_rejects_out_of_range() {
        let seq = Sequence::of([Value::Int(1), Value::Int(2)]);
        seq.set(1, Value::Bool(true)).unwrap();
        assert!(matches!(seq.get(1).unwrap(), Some(Value::Bool(true))));

        let err = seq.set(5, Value::Null).unwrap_err();
        assert_eq!(err, GraphError::out_of_bounds(5, 2));
    }

    #[test]
    fn cloned_handles_alias_the_same_cell() {
        let seq = Sequence::new();
        let alias = seq.clone();
        alias.push(Value::Int(7)).unwrap();

        assert!(seq.ptr_eq(&alias));
        assert_eq!(seq.identity(), alias.identity());
        assert_eq!(seq.len().unwrap(), 1);
    }

    #[test]
    fn distinct_sequences_have_distinct_identities() {
        assert_ne!(Sequence::new().identity(), Sequence::new().identity());
    }

    #[test]
    fn reentrant_access_inside_with_mut_reports_busy() {
        let seq = Sequence::new();
        let alias = seq.clone();

        let inner = seq.with_mut(|_| alias.len()).unwrap();
        assert_eq!(inner.unwrap_err(), GraphError::busy("sequence"));
    }

    #[test]
    fn snapshot_releases_the_borrow() {
        let seq = Sequence::of([Value::Int(1)]);
        let snapshot = seq.snapshot().unwrap();

        // The cell is free again once the snapshot exists.
        seq.push(Value::Int(2)).unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(seq.len().unwrap(), 2);
    }
}
