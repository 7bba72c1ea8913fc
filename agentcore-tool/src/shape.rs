//! Shape trees — structural descriptions of observed/declared return
//! values, and the merge rules that let a [`Shape`] widen as new
//! payloads are observed.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A primitive leaf type in a shape tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Primitive {
    /// UTF-8 string.
    String,
    /// Integer (a JSON number with no fractional part).
    Integer,
    /// Floating-point number.
    Number,
    /// Boolean.
    Boolean,
    /// No type could be determined, or two incompatible primitives merged.
    Unknown,
}

/// A structural description of a value: primitive, object-of-fields,
/// or array-of-items, with a per-node optionality flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    /// The shape's structural kind.
    pub kind: ShapeKind,
    /// Whether this shape has been observed absent (`null`) at least once.
    #[serde(default)]
    pub optional: bool,
}

/// The structural kind of a [`Shape`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShapeKind {
    /// A scalar leaf.
    Primitive(Primitive),
    /// An object, fields kept in first-seen order.
    Object(Vec<(String, Shape)>),
    /// A homogeneous array; `None` item shape means no element has been seen.
    Array(Option<Box<Shape>>),
}

impl Shape {
    /// A required primitive shape.
    pub fn primitive(kind: Primitive) -> Self {
        Self {
            kind: ShapeKind::Primitive(kind),
            optional: false,
        }
    }

    /// Infer a shape tree from a concrete JSON value (object key order preserved).
    pub fn infer(value: &Value) -> Self {
        let kind = match value {
            Value::Null => ShapeKind::Primitive(Primitive::Unknown),
            Value::Bool(_) => ShapeKind::Primitive(Primitive::Boolean),
            Value::Number(n) => {
                if n.is_i64() || n.is_u64() {
                    ShapeKind::Primitive(Primitive::Integer)
                } else {
                    ShapeKind::Primitive(Primitive::Number)
                }
            }
            Value::String(_) => ShapeKind::Primitive(Primitive::String),
            Value::Array(items) => {
                let item = items
                    .iter()
                    .map(Shape::infer)
                    .reduce(Shape::merge)
                    .map(Box::new);
                ShapeKind::Array(item)
            }
            Value::Object(map) => {
                ShapeKind::Object(map.iter().map(|(k, v)| (k.clone(), Shape::infer(v))).collect())
            }
        };
        Self {
            kind,
            optional: matches!(value, Value::Null),
        }
    }

    /// Merge two shapes per the widening rules: same-type primitives
    /// stay precise, mismatched primitives fall back to `Unknown`,
    /// objects union their field sets (fields on only one side become
    /// optional), arrays merge their item shapes, and a shape merged
    /// with an absent/null counterpart becomes optional.
    pub fn merge(a: Shape, b: Shape) -> Shape {
        let optional = a.optional || b.optional;
        let kind = match (a.kind, b.kind) {
            (ShapeKind::Primitive(x), ShapeKind::Primitive(y)) => {
                ShapeKind::Primitive(if x == y { x } else { Primitive::Unknown })
            }
            (ShapeKind::Array(x), ShapeKind::Array(y)) => {
                let merged = match (x, y) {
                    (Some(x), Some(y)) => Some(Box::new(Shape::merge(*x, *y))),
                    (Some(x), None) | (None, Some(x)) => Some(x),
                    (None, None) => None,
                };
                ShapeKind::Array(merged)
            }
            (ShapeKind::Object(x), ShapeKind::Object(y)) => {
                let mut fields: BTreeMap<String, (Option<Shape>, Option<Shape>)> = BTreeMap::new();
                let mut order: Vec<String> = Vec::new();
                for (name, shape) in x {
                    if !fields.contains_key(&name) {
                        order.push(name.clone());
                    }
                    fields.entry(name).or_default().0 = Some(shape);
                }
                for (name, shape) in y {
                    if !fields.contains_key(&name) {
                        order.push(name.clone());
                    }
                    fields.entry(name).or_insert((None, None)).1 = Some(shape);
                }
                let merged = order
                    .into_iter()
                    .map(|name| {
                        let (left, right) = fields.remove(&name).unwrap();
                        let present_both = left.is_some() && right.is_some();
                        let mut shape = match (left, right) {
                            (Some(l), Some(r)) => Shape::merge(l, r),
                            (Some(s), None) | (None, Some(s)) => s,
                            (None, None) => unreachable!(),
                        };
                        if !present_both {
                            shape.optional = true;
                        }
                        (name, shape)
                    })
                    .collect();
                ShapeKind::Object(merged)
            }
            // Structural mismatch (e.g. object vs primitive): widen to unknown.
            _ => ShapeKind::Primitive(Primitive::Unknown),
        };
        Shape { kind, optional }
    }
}
