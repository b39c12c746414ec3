//! Document model for ymerge.
//!
//! Every parsed configuration document is a tree of [`Node`]s rooted at a
//! [`Mapping`]. The merge engine and the I/O layer both speak this model; no
//! other crate inspects raw parser values.
//!
//! # Key Types
//!
//! - [`Node`] -- Mapping, Sequence, or Scalar
//! - [`Scalar`] -- Leaf value, also used as the mapping key type
//! - [`Float`] -- `f64` with a total order so it can act as a key
//! - [`Mapping`] -- Sorted map from [`Scalar`] keys to [`Node`] values
//! - [`NodeKind`] -- Variant tag used in diagnostics and errors

pub mod error;
pub mod node;
pub mod scalar;
pub mod yaml;

pub use error::{TypeError, TypeResult};
pub use node::{Mapping, Node, NodeKind};
pub use scalar::{Float, Scalar};
pub use yaml::mapping_from_value;
