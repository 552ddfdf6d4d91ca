//! The value model: a closed union over primitive leaves and composites.

use std::any::Any;
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use crate::identity::CompositeId;
use crate::record::Record;
use crate::sequence::Sequence;

/// A node in a value graph.
///
/// `Clone` is shallow: composite variants clone the handle and keep aliasing
/// the same cell, primitives copy, opaque leaves clone the `Rc`. Producing
/// an independent copy of a whole graph is the engine's `deep_clone`.
#[derive(Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    /// Non-composite special leaf (native resource, callback handle, ...).
    /// Carried by reference and never descended into.
    Opaque(Rc<dyn Any>),
    Sequence(Sequence),
    Record(Record),
}

impl Value {
    /// Wrap an arbitrary leaf payload as an opaque value.
    pub fn opaque<T: Any>(leaf: T) -> Self {
        Value::Opaque(Rc::new(leaf))
    }

    pub fn is_composite(&self) -> bool {
        matches!(self, Value::Sequence(_) | Value::Record(_))
    }

    /// Static name of the variant, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::Opaque(_) => "opaque",
            Value::Sequence(_) => "sequence",
            Value::Record(_) => "record",
        }
    }

    /// Identity of the composite behind this value, if it is one.
    pub fn identity(&self) -> Option<CompositeId> {
        match self {
            Value::Sequence(seq) => Some(seq.identity()),
            Value::Record(record) => Some(record.identity()),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&Sequence> {
        match self {
            Value::Sequence(seq) => Some(seq),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<Sequence> for Value {
    fn from(v: Sequence) -> Self {
        Value::Sequence(v)
    }
}

impl From<Record> for Value {
    fn from(v: Record) -> Self {
        Value::Record(v)
    }
}

// Derived Debug would recurse forever on a cyclic graph, so the impl walks
// with the current path in hand: re-entered composites print as <cycle>,
// composites whose cell is mutably borrowed print as <busy>.
impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut on_path = HashSet::new();
        fmt_value(self, f, &mut on_path)
    }
}

fn fmt_value(
    value: &Value,
    f: &mut fmt::Formatter<'_>,
    on_path: &mut HashSet<CompositeId>,
) -> fmt::Result {
    match value {
        Value::Null => f.write_str("null"),
        Value::Bool(v) => write!(f, "{v}"),
        Value::Int(v) => write!(f, "{v}"),
        Value::Float(v) => write!(f, "{v:?}"),
        Value::Text(v) => write!(f, "{v:?}"),
        Value::Opaque(_) => f.write_str("<opaque>"),
        Value::Sequence(seq) => {
            let id = seq.identity();
            if !on_path.insert(id) {
                return f.write_str("<cycle>");
            }
            let result = match seq.snapshot() {
                Ok(items) => {
                    f.write_str("[")?;
                    for (i, item) in items.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        fmt_value(item, f, on_path)?;
                    }
                    f.write_str("]")
                }
                Err(_) => f.write_str("<busy>"),
            };
            on_path.remove(&id);
            result
        }
        Value::Record(record) => {
            let id = record.identity();
            if !on_path.insert(id) {
                return f.write_str("<cycle>");
            }
            let result = match record.snapshot() {
                Ok(entries) => {
                    f.write_str("{")?;
                    for (i, (key, item)) in entries.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{key}: ")?;
                        fmt_value(item, f, on_path)?;
                    }
                    f.write_str("}")
                }
                Err(_) => f.write_str("<busy>"),
            };
            on_path.remove(&id);
            result
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names_every_variant() {
        assert_eq!(Value::Null.kind(), "null");
        assert_eq!(Value::from(true).kind(), "bool");
        assert_eq!(Value::from(1i64).kind(), "int");
        assert_eq!(Value::from(1.5f64).kind(), "float");
        assert_eq!(Value::from("x").kind(), "text");
        assert_eq!(Value::opaque(0u8).kind(), "opaque");
        assert_eq!(Value::from(Sequence::new()).kind(), "sequence");
        assert_eq!(Value::from(Record::new()).kind(), "record");
    }

    #[test]
    fn only_composites_have_an_identity() {
        assert!(Value::Int(1).identity().is_none());
        assert!(Value::opaque("leaf").identity().is_none());
        assert!(Value::from(Sequence::new()).identity().is_some());
        assert!(Value::from(Record::new()).identity().is_some());
    }

    #[test]
    fn shallow_clone_aliases_composites() {
        let record = Record::of([("n", Value::Int(1))]);
        let value = Value::Record(record.clone());
        let alias = value.clone();

        assert_eq!(value.identity(), alias.identity());
        alias.as_record().unwrap().insert("n", Value::Int(2)).unwrap();
        assert!(matches!(record.get("n").unwrap(), Some(Value::Int(2))));
    }

    #[test]
    fn debug_renders_nested_structure() {
        let value = Value::Record(Record::of([
            ("name", Value::from("app")),
            ("tags", Value::from(Sequence::of([Value::Int(1), Value::Int(2)]))),
        ]));

        assert_eq!(format!("{value:?}"), r#"{name: "app", tags: [1, 2]}"#);
    }

    #[test]
    fn debug_terminates_on_cycles() {
        let node = Record::new();
        node.insert("own", Value::Record(node.clone())).unwrap();

        let rendered = format!("{:?}", Value::Record(node));
        assert_eq!(rendered, "{own: <cycle>}");
    }

    #[test]
    fn debug_renders_shared_but_acyclic_nodes_in_full() {
        let shared = Sequence::of([Value::Int(1)]);
        let value = Value::Record(Record::of([
            ("a", Value::Sequence(shared.clone())),
            ("b", Value::Sequence(shared)),
        ]));

        assert_eq!(format!("{value:?}"), "{a: [1], b: [1]}");
    }
}
