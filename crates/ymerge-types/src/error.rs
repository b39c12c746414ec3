use thiserror::Error;

use crate::node::NodeKind;

/// Errors produced while converting parser values into the document model.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    /// Mapping keys must be scalars; sequences and mappings are rejected.
    #[error("unsupported mapping key: expected a scalar, got a {0}")]
    UnsupportedKey(NodeKind),

    /// The document root must be a mapping.
    #[error("document root is a {0}, expected a mapping")]
    NotAMapping(NodeKind),
}

/// Convenience alias for type conversion results.
pub type TypeResult<T> = Result<T, TypeError>;
