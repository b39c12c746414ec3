//! Conversion between [`serde_yaml::Value`] and the document model.
//!
//! Parsing goes through `serde_yaml::Value` first so anchors and aliases are
//! already resolved by the time a [`Node`] tree exists. Custom tags are
//! dropped and their inner value kept.

use serde_yaml::{Number, Value};

use crate::error::{TypeError, TypeResult};
use crate::node::{Mapping, Node};
use crate::scalar::{Float, Scalar};

impl TryFrom<Value> for Node {
    type Error = TypeError;

    fn try_from(value: Value) -> TypeResult<Self> {
        Ok(match value {
            Value::Null => Node::Scalar(Scalar::Null),
            Value::Bool(b) => Node::Scalar(Scalar::Bool(b)),
            Value::Number(n) => Node::Scalar(scalar_from_number(&n)),
            Value::String(s) => Node::Scalar(Scalar::String(s)),
            Value::Sequence(items) => Node::Sequence(
                items
                    .into_iter()
                    .map(Node::try_from)
                    .collect::<TypeResult<_>>()?,
            ),
            Value::Mapping(entries) => {
                let mut mapping = Mapping::new();
                for (key, value) in entries {
                    mapping.insert(key_from_value(key)?, Node::try_from(value)?);
                }
                Node::Mapping(mapping)
            }
            Value::Tagged(tagged) => Node::try_from(tagged.value)?,
        })
    }
}

/// Convert a parsed document root into a [`Mapping`].
///
/// A document that is empty or `null` becomes an empty mapping. Any other
/// non-mapping root is rejected.
pub fn mapping_from_value(value: Value) -> TypeResult<Mapping> {
    match Node::try_from(value)? {
        Node::Mapping(mapping) => Ok(mapping),
        Node::Scalar(Scalar::Null) => Ok(Mapping::new()),
        other => Err(TypeError::NotAMapping(other.kind())),
    }
}

fn key_from_value(value: Value) -> TypeResult<Scalar> {
    match Node::try_from(value)? {
        Node::Scalar(scalar) => Ok(scalar),
        other => Err(TypeError::UnsupportedKey(other.kind())),
    }
}

fn scalar_from_number(n: &Number) -> Scalar {
    if let Some(i) = n.as_i64() {
        Scalar::Int(i.into())
    } else if let Some(u) = n.as_u64() {
        Scalar::Int(u.into())
    } else {
        Scalar::Float(Float::new(n.as_f64().unwrap_or(f64::NAN)))
    }
}

impl From<Scalar> for Value {
    fn from(scalar: Scalar) -> Self {
        match scalar {
            Scalar::Null => Value::Null,
            Scalar::Bool(b) => Value::Bool(b),
            Scalar::Int(i) => {
                if let Ok(small) = i64::try_from(i) {
                    Value::Number(small.into())
                } else if let Ok(unsigned) = u64::try_from(i) {
                    Value::Number(unsigned.into())
                } else {
                    // Only reachable for values built outside the parser.
                    Value::Number((i as f64).into())
                }
            }
            Scalar::Float(x) => Value::Number(x.get().into()),
            Scalar::String(s) => Value::String(s),
        }
    }
}

impl From<Node> for Value {
    fn from(node: Node) -> Self {
        match node {
            Node::Scalar(scalar) => scalar.into(),
            Node::Sequence(items) => Value::Sequence(items.into_iter().map(Value::from).collect()),
            Node::Mapping(mapping) => Value::Mapping(
                mapping
                    .into_iter()
                    .map(|(k, v)| (Value::from(k), Value::from(v)))
                    .collect(),
            ),
        }
    }
}
