//! Conflict records and the sinks that receive them.

use std::fmt;

use tracing::warn;
use ymerge_types::{NodeKind, Scalar};

/// The chain of keys from a document root down to one value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct KeyPath(Vec<Scalar>);

impl KeyPath {
    /// The innermost key, if the path is not empty.
    pub fn leaf(&self) -> Option<&Scalar> {
        self.0.last()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Scalar> for KeyPath {
    fn from_iter<I: IntoIterator<Item = Scalar>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

/// A key that holds a mapping in one document and a non-mapping in a later one.
///
/// The destination value is always the one kept.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Conflict {
    /// Location of the key, root first.
    pub path: KeyPath,
    /// Kind of the value already in the accumulator.
    pub kept: NodeKind,
    /// Kind of the incoming value that was discarded.
    pub discarded: NodeKind,
}

impl Conflict {
    /// The key the conflict occurred at.
    pub fn key(&self) -> Option<&Scalar> {
        self.path.leaf()
    }
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.key() {
            Some(key) => write!(f, "Conflict for key {key}. Values are not both maps."),
            None => f.write_str("Conflict at document root. Values are not both maps."),
        }
    }
}

/// Receives conflicts as the engine encounters them.
///
/// Reporting never influences the merge result.
pub trait ConflictSink {
    fn report(&mut self, conflict: Conflict);
}

impl ConflictSink for Vec<Conflict> {
    fn report(&mut self, conflict: Conflict) {
        self.push(conflict);
    }
}

impl<S: ConflictSink + ?Sized> ConflictSink for &mut S {
    fn report(&mut self, conflict: Conflict) {
        (**self).report(conflict);
    }
}

/// Delivers each conflict to both sinks.
impl<A: ConflictSink, B: ConflictSink> ConflictSink for (A, B) {
    fn report(&mut self, conflict: Conflict) {
        self.0.report(conflict.clone());
        self.1.report(conflict);
    }
}

/// Emits every conflict as a `warn` event.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl ConflictSink for TracingSink {
    fn report(&mut self, conflict: Conflict) {
        warn!(
            path = %conflict.path,
            kept = %conflict.kept,
            discarded = %conflict.discarded,
            "{conflict}"
        );
    }
}
