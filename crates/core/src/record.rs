//! String-keyed composite with insertion-ordered entries.

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use crate::error::{GraphError, GraphResult};
use crate::identity::CompositeId;
use crate::value::Value;

/// Insertion-ordered entry storage behind a [`Record`].
///
/// A pair vector with linear lookup. Records hold few keys in practice, and
/// entry order is part of the contract; key position survives in-place
/// updates.
#[derive(Default)]
pub struct Entries {
    pairs: Vec<(String, Value)>,
}

impl Entries {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Insert or replace. An existing key keeps its position; the previous
    /// value is returned.
    pub fn insert(&mut self, key: String, value: Value) -> Option<Value> {
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.pairs.push((key, value));
                None
            }
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let index = self.pairs.iter().position(|(k, _)| k == key)?;
        Some(self.pairs.remove(index).1)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Handle to a shared, mutable, insertion-ordered string map of values.
///
/// Cloning a `Record` clones the handle: both handles alias the same
/// underlying cell. Accessors that cross the cell boundary return
/// [`GraphResult`]; a borrow held elsewhere surfaces as
/// [`GraphError::NodeBusy`].
#[derive(Clone)]
pub struct Record {
    entries: Rc<RefCell<Entries>>,
}

impl Record {
    pub fn new() -> Self {
        Self {
            entries: Rc::new(RefCell::new(Entries::default())),
        }
    }

    pub fn of<K: Into<String>>(entries: impl IntoIterator<Item = (K, Value)>) -> Self {
        let mut inner = Entries::default();
        for (key, value) in entries {
            inner.insert(key.into(), value);
        }
        Self {
            entries: Rc::new(RefCell::new(inner)),
        }
    }

    /// Identity of the underlying allocation; equal iff two handles alias.
    pub fn identity(&self) -> CompositeId {
        CompositeId::from_ptr(Rc::as_ptr(&self.entries) as *const ())
    }

    /// Whether `self` and `other` alias the same cell.
    pub fn ptr_eq(&self, other: &Record) -> bool {
        Rc::ptr_eq(&self.entries, &other.entries)
    }

    pub fn len(&self) -> GraphResult<usize> {
        Ok(self.cell()?.len())
    }

    pub fn is_empty(&self) -> GraphResult<bool> {
        Ok(self.cell()?.is_empty())
    }

    /// Value under `key`, aliased. `None` when absent.
    pub fn get(&self, key: &str) -> GraphResult<Option<Value>> {
        Ok(self.cell()?.get(key).cloned())
    }

    /// Insert or replace. An existing key keeps its position; the previous
    /// value is returned.
    pub fn insert(&self, key: impl Into<String>, value: Value) -> GraphResult<Option<Value>> {
        Ok(self.cell_mut()?.insert(key.into(), value))
    }

    pub fn remove(&self, key: &str) -> GraphResult<Option<Value>> {
        Ok(self.cell_mut()?.remove(key))
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> GraphResult<Vec<String>> {
        Ok(self.cell()?.iter().map(|(k, _)| k.to_string()).collect())
    }

    /// Ordered snapshot of the entries. The returned values alias the
    /// originals; no borrow is held once this returns.
    pub fn snapshot(&self) -> GraphResult<Vec<(String, Value)>> {
        Ok(self
            .cell()?
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect())
    }

    /// Read access to the entries while the borrow is held.
    pub fn with<R>(&self, f: impl FnOnce(&Entries) -> R) -> GraphResult<R> {
        let entries = self.cell()?;
        Ok(f(&entries))
    }

    /// Mutable access to the entries while the borrow is held. Re-entering
    /// this record through another handle inside `f` reports
    /// [`GraphError::NodeBusy`].
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut Entries) -> R) -> GraphResult<R> {
        let mut entries = self.cell_mut()?;
        Ok(f(&mut entries))
    }

    fn cell(&self) -> GraphResult<Ref<'_, Entries>> {
        self.entries.try_borrow().map_err(|_| GraphError::busy("record"))
    }

    fn cell_mut(&self) -> GraphResult<RefMut<'_, Entries>> {
        self.entries
            .try_borrow_mut()
            .map_err(|_| GraphError::busy("record"))
    }
}

impl Default for Record {
    fn default() -> Self {
        Self::new()
    }
}
