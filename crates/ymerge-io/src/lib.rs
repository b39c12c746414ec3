//! Document I/O for ymerge.
//!
//! Reads documents from files or stdin, parses them into mapping-rooted
//! [`ymerge_types::Node`] trees, and renders a merged mapping back out as
//! YAML or JSON. Loading is fail-fast: the first source that cannot be read
//! or parsed aborts the whole batch.

pub mod error;
pub mod load;
pub mod render;
pub mod source;

pub use error::{IoError, Result};
pub use load::{load_all, load_document, parse_document};
pub use render::{render, write_output, OutputFormat};
pub use source::DocumentSource;
