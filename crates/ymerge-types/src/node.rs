//! The recursive document value.

use std::collections::BTreeMap;
use std::fmt;

use crate::scalar::Scalar;

/// A mapping from scalar keys to nodes.
///
/// Keys are unique and kept sorted, which makes serialized output stable
/// regardless of the order documents listed their keys in.
pub type Mapping = BTreeMap<Scalar, Node>;

/// One value in a parsed document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Mapping(Mapping),
    Sequence(Vec<Node>),
    Scalar(Scalar),
}

/// The variant of a [`Node`], without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Mapping,
    Sequence,
    Scalar,
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Mapping(_) => NodeKind::Mapping,
            Node::Sequence(_) => NodeKind::Sequence,
            Node::Scalar(_) => NodeKind::Scalar,
        }
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, Node::Mapping(_))
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Node::Mapping(m) => Some(m),
            _ => None,
        }
    }

    /// Look up a child by key when this node is a mapping.
    pub fn get(&self, key: impl Into<Scalar>) -> Option<&Node> {
        self.as_mapping().and_then(|m| m.get(&key.into()))
    }
}

impl From<Scalar> for Node {
    fn from(value: Scalar) -> Self {
        Node::Scalar(value)
    }
}

macro_rules! scalar_node_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Node {
                fn from(value: $ty) -> Self {
                    Node::Scalar(Scalar::from(value))
                }
            }
        )*
    };
}

scalar_node_from!(&str, String, bool, i64, f64);

impl From<Mapping> for Node {
    fn from(value: Mapping) -> Self {
        Node::Mapping(value)
    }
}

impl From<Vec<Node>> for Node {
    fn from(value: Vec<Node>) -> Self {
        Node::Sequence(value)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Mapping => "mapping",
            NodeKind::Sequence => "sequence",
            NodeKind::Scalar => "scalar",
        };
        f.write_str(name)
    }
}
