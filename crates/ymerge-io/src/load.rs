//! Parsing sources into mapping-rooted documents.

use tracing::debug;
use ymerge_types::{mapping_from_value, Mapping};

use crate::error::{IoError, Result};
use crate::source::DocumentSource;

/// Parse raw bytes as a single YAML document rooted at a mapping.
///
/// Blank input and a bare `null` both yield an empty mapping. `source` is
/// only used to attribute errors.
pub fn parse_document(bytes: &[u8], source: &DocumentSource) -> Result<Mapping> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Mapping::new());
    }
    let value: serde_yaml::Value = serde_yaml::from_slice(bytes).map_err(|error| IoError::Parse {
        source_name: source.clone(),
        error,
    })?;
    mapping_from_value(value).map_err(|error| IoError::Shape {
        source_name: source.clone(),
        error,
    })
}

/// Read and parse one source.
pub fn load_document(source: &DocumentSource) -> Result<Mapping> {
    let bytes = source.read()?;
    let mapping = parse_document(&bytes, source)?;
    debug!(source = %source, bytes = bytes.len(), keys = mapping.len(), "loaded document");
    Ok(mapping)
}

/// Load every source in order, stopping at the first failure.
///
/// Either all documents are returned or none are.
pub fn load_all<'a, I>(sources: I) -> Result<Vec<Mapping>>
where
    I: IntoIterator<Item = &'a DocumentSource>,
{
    sources.into_iter().map(load_document).collect()
}
