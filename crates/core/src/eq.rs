//! Cycle-aware structural comparison of value graphs.

use std::collections::HashSet;
use std::rc::Rc;

use crate::error::GraphResult;
use crate::identity::CompositeId;
use crate::value::Value;

/// Structural equality over two value graphs.
///
/// Primitives compare by value (`Float` with plain `f64` equality, so `NaN`
/// is not equal to itself), opaque leaves by handle identity, composites
/// recursively by shape and content. Records compare as keyed mappings:
/// entry order does not affect equality. A pair of composites that is
/// re-encountered while already under comparison is taken as equal, which
/// terminates the walk on cyclic graphs.
///
/// Fails with [`NodeBusy`](crate::GraphError::NodeBusy) when a composite on
/// either side is mutably borrowed.
pub fn structural_eq(a: &Value, b: &Value) -> GraphResult<bool> {
    let mut compared = HashSet::new();
    eq_inner(a, b, &mut compared)
}

fn eq_inner(
    a: &Value,
    b: &Value,
    compared: &mut HashSet<(CompositeId, CompositeId)>,
) -> GraphResult<bool> {
    match (a, b) {
        (Value::Null, Value::Null) => Ok(true),
        (Value::Bool(x), Value::Bool(y)) => Ok(x == y),
        (Value::Int(x), Value::Int(y)) => Ok(x == y),
        (Value::Float(x), Value::Float(y)) => Ok(x == y),
        (Value::Text(x), Value::Text(y)) => Ok(x == y),
        (Value::Opaque(x), Value::Opaque(y)) => Ok(Rc::ptr_eq(x, y)),
        (Value::Sequence(x), Value::Sequence(y)) => {
            if x.ptr_eq(y) {
                return Ok(true);
            }
            if !compared.insert((x.identity(), y.identity())) {
                return Ok(true);
            }
            let xs = x.snapshot()?;
            let ys = y.snapshot()?;
            if xs.len() != ys.len() {
                return Ok(false);
            }
            for (xi, yi) in xs.iter().zip(&ys) {
                if !eq_inner(xi, yi, compared)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        (Value::Record(x), Value::Record(y)) => {
            if x.ptr_eq(y) {
                return Ok(true);
            }
            if !compared.insert((x.identity(), y.identity())) {
                return Ok(true);
            }
            let xs = x.snapshot()?;
            let ys = y.snapshot()?;
            if xs.len() != ys.len() {
                return Ok(false);
            }
            for (key, xi) in &xs {
                let Some((_, yi)) = ys.iter().find(|(k, _)| k == key) else {
                    return Ok(false);
                };
                if !eq_inner(xi, yi, compared)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        _ => Ok(false),
    }
}
