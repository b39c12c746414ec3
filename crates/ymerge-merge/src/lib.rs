//! Merge engine for ymerge.
//!
//! Folds an ordered list of mapping-rooted documents into one. Nested
//! mappings merge key by key, sequences concatenate, and a mapping that
//! collides with a non-mapping is reported as a [`Conflict`] while the
//! earlier value is kept.
//!
//! # Key Types
//!
//! - [`merge_all`] / [`merge_into`] -- The fold and a single merge step
//! - [`merge_leaves`] -- The rule for two non-mapping values
//! - [`Conflict`] / [`KeyPath`] -- A mapping vs. non-mapping collision
//! - [`ConflictSink`] / [`TracingSink`] -- Where conflicts are delivered

pub mod conflict;
pub mod engine;

pub use conflict::{Conflict, ConflictSink, KeyPath, TracingSink};
pub use engine::{merge_all, merge_into, merge_leaves};
