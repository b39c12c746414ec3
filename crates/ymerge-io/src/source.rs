use std::convert::Infallible;
use std::fmt;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{IoError, Result};

/// Where a document is read from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DocumentSource {
    File(PathBuf),
    /// Standard input, named `-` on the command line.
    Stdin,
}

impl DocumentSource {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        DocumentSource::File(path.into())
    }

    /// Read the raw document bytes.
    ///
    /// Stdin is read to end, so a second `-` in the same run sees an empty
    /// document.
    pub fn read(&self) -> Result<Vec<u8>> {
        let bytes = match self {
            DocumentSource::File(path) => fs::read(path),
            DocumentSource::Stdin => {
                let mut buf = Vec::new();
                io::stdin().lock().read_to_end(&mut buf).map(|_| buf)
            }
        };
        bytes.map_err(|error| IoError::Read {
            source_name: self.clone(),
            error,
        })
    }
}

impl FromStr for DocumentSource {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "-" => DocumentSource::Stdin,
            path => DocumentSource::file(path),
        })
    }
}

impl fmt::Display for DocumentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentSource::File(path) => write!(f, "{}", path.display()),
            DocumentSource::Stdin => f.write_str("<stdin>"),
        }
    }
}
