use ymerge_types::TypeError;

use crate::source::DocumentSource;

/// Errors produced while reading, parsing, or rendering documents.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// The source could not be read.
    #[error("failed to read {source_name}")]
    Read {
        source_name: DocumentSource,
        #[source]
        error: std::io::Error,
    },

    /// The bytes are not a well-formed YAML document.
    #[error("failed to parse {source_name}")]
    Parse {
        source_name: DocumentSource,
        #[source]
        error: serde_yaml::Error,
    },

    /// The document parsed but is not a mapping of scalar keys.
    #[error("invalid document {source_name}")]
    Shape {
        source_name: DocumentSource,
        #[source]
        error: TypeError,
    },

    /// The merged document could not be rendered.
    #[error("serialization error: {0}")]
    Serialize(String),

    /// Rendered output could not be written.
    #[error("failed to write {destination}")]
    Write {
        destination: String,
        #[source]
        error: std::io::Error,
    },
}

impl IoError {
    /// The input the error is attributed to, if any.
    pub fn source_name(&self) -> Option<&DocumentSource> {
        match self {
            IoError::Read { source_name, .. }
            | IoError::Parse { source_name, .. }
            | IoError::Shape { source_name, .. } => Some(source_name),
            IoError::Serialize(_) | IoError::Write { .. } => None,
        }
    }
}

/// Convenience alias used throughout the I/O crate.
pub type Result<T> = std::result::Result<T, IoError>;
