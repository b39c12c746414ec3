//! The fold and the per-key merge rules.
//!
//! Per key, the rules apply in this order:
//!
//! 1. Key only in the source: the source value is inserted.
//! 2. Both values are mappings: they merge recursively.
//! 3. Exactly one value is a mapping: a [`Conflict`] is reported and the
//!    destination value is kept.
//! 4. Neither is a mapping: [`merge_leaves`] decides.
//!
//! Nested mappings are merged with an explicit stack of frames rather than by
//! recursion, so document depth is limited by memory and not by the call
//! stack.

use std::collections::btree_map;
use std::iter;

use tracing::{debug, trace};
use ymerge_types::{Mapping, Node, NodeKind, Scalar};

use crate::conflict::{Conflict, ConflictSink, KeyPath};

/// Fold `documents` left to right into a single mapping.
///
/// The first document seeds the accumulator and every later document is
/// merged into it with [`merge_into`]. Order matters: later documents
/// override scalars and append to sequences.
pub fn merge_all<I, S>(documents: I, sink: &mut S) -> Mapping
where
    I: IntoIterator<Item = Mapping>,
    S: ConflictSink + ?Sized,
{
    let mut documents = documents.into_iter();
    let Some(first) = documents.next() else {
        return Mapping::new();
    };
    documents.enumerate().fold(first, |merged, (i, document)| {
        debug!(document = i + 1, keys = document.len(), "folding document");
        merge_into(merged, document, &mut *sink)
    })
}

/// Merge `src` into `dest` and return the combined mapping.
///
/// Keys of `dest` that `src` does not mention are left untouched.
pub fn merge_into<S>(dest: Mapping, src: Mapping, sink: &mut S) -> Mapping
where
    S: ConflictSink + ?Sized,
{
    let mut root = Frame::new(dest, src);
    // Nested frames, each paired with its key in the parent frame.
    let mut stack: Vec<(Scalar, Frame)> = Vec::new();

    loop {
        let frame = match stack.last_mut() {
            Some((_, frame)) => frame,
            None => &mut root,
        };

        let Some((key, src_value)) = frame.pending.next() else {
            match stack.pop() {
                Some((key, finished)) => {
                    let parent = match stack.last_mut() {
                        Some((_, parent)) => parent,
                        None => &mut root,
                    };
                    parent.dest.insert(key, Node::Mapping(finished.dest));
                    continue;
                }
                None => return root.dest,
            }
        };

        match frame.absorb(key, src_value) {
            Absorbed::Settled => {}
            Absorbed::Descend(key, child) => {
                trace!(depth = stack.len() + 1, key = %key, "descending into mapping");
                stack.push((key, child));
            }
            Absorbed::Conflict {
                key,
                kept,
                discarded,
            } => {
                let path = stack
                    .iter()
                    .map(|(k, _)| k.clone())
                    .chain(iter::once(key))
                    .collect::<KeyPath>();
                sink.report(Conflict {
                    path,
                    kept,
                    discarded,
                });
            }
        }
    }
}

/// Combine two values when neither is a mapping.
///
/// - Two sequences concatenate, `dest` elements first. Nothing is
///   deduplicated or reordered.
/// - A sequence on one side wins over a scalar on the other, whichever side
///   it is on.
/// - Two scalars resolve to `src`, the later document.
///
/// Mapping arguments are not expected here; the caller reports those as
/// conflicts before reaching this rule.
pub fn merge_leaves(dest: Node, src: Node) -> Node {
    match (dest, src) {
        (Node::Sequence(mut dest), Node::Sequence(src)) => {
            dest.extend(src);
            Node::Sequence(dest)
        }
        (_, src @ Node::Sequence(_)) => src,
        (dest @ Node::Sequence(_), _) => dest,
        // Right-biased for scalars. Earlier releases kept `dest` here.
        (_, src) => src,
    }
}

/// One mapping being merged: the accumulated destination and the source
/// entries not yet applied to it.
struct Frame {
    dest: Mapping,
    pending: btree_map::IntoIter<Scalar, Node>,
}

enum Absorbed {
    Settled,
    Descend(Scalar, Frame),
    Conflict {
        key: Scalar,
        kept: NodeKind,
        discarded: NodeKind,
    },
}

impl Frame {
    fn new(dest: Mapping, src: Mapping) -> Self {
        Self {
            dest,
            pending: src.into_iter(),
        }
    }

    /// Apply one source entry to this frame's destination.
    fn absorb(&mut self, key: Scalar, src_value: Node) -> Absorbed {
        let Some(dest_value) = self.dest.remove(&key) else {
            self.dest.insert(key, src_value);
            return Absorbed::Settled;
        };

        match (dest_value, src_value) {
            (Node::Mapping(dest), Node::Mapping(src)) => {
                Absorbed::Descend(key, Frame::new(dest, src))
            }
            (dest_value, src_value) if dest_value.is_mapping() || src_value.is_mapping() => {
                let (kept, discarded) = (dest_value.kind(), src_value.kind());
                self.dest.insert(key.clone(), dest_value);
                Absorbed::Conflict {
                    key,
                    kept,
                    discarded,
                }
            }
            (dest_value, src_value) => {
                self.dest.insert(key, merge_leaves(dest_value, src_value));
                Absorbed::Settled
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn map<const N: usize>(entries: [(&str, Node); N]) -> Mapping {
        entries
            .into_iter()
            .map(|(k, v)| (Scalar::from(k), v))
            .collect()
    }

    fn seq<const N: usize>(items: [i64; N]) -> Node {
        Node::Sequence(items.into_iter().map(Node::from).collect())
    }

    fn merge(docs: Vec<Mapping>) -> (Mapping, Vec<Conflict>) {
        let mut conflicts = Vec::new();
        let merged = merge_all(docs, &mut conflicts);
        (merged, conflicts)
    }

    #[test]
    fn no_documents_gives_empty_mapping() {
        let (merged, conflicts) = merge(vec![]);
        assert!(merged.is_empty());
        assert!(conflicts.is_empty());
    }

    #[test]
    fn single_document_is_identity() {
        let doc = map([
            ("a", Node::from(1)),
            ("b", Node::Mapping(map([("c", seq([1, 2]))]))),
        ]);
        let (merged, conflicts) = merge(vec![doc.clone()]);
        assert_eq!(merged, doc);
        assert!(conflicts.is_empty());
    }

    #[test]
    fn later_scalar_wins() {
        let (merged, _) = merge(vec![map([("a", Node::from(1))]), map([("a", Node::from(2))])]);
        assert_eq!(merged, map([("a", Node::from(2))]));
    }

    #[test]
    fn nested_mappings_union() {
        let (merged, conflicts) = merge(vec![
            map([("a", Node::Mapping(map([("x", Node::from(1))])))]),
            map([("a", Node::Mapping(map([("y", Node::from(2))])))]),
        ]);
        assert_eq!(
            merged,
            map([(
                "a",
                Node::Mapping(map([("x", Node::from(1)), ("y", Node::from(2))]))
            )])
        );
        assert!(conflicts.is_empty());
    }

    #[test]
    fn sequences_concatenate_with_duplicates() {
        let (merged, _) = merge(vec![
            map([("a", seq([1, 2]))]),
            map([("a", seq([2, 3]))]),
            map([("a", seq([1]))]),
        ]);
        assert_eq!(merged, map([("a", seq([1, 2, 2, 3, 1]))]));
    }

    #[test]
    fn dest_sequence_beats_src_scalar() {
        let (merged, conflicts) = merge(vec![map([("a", seq([1, 2]))]), map([("a", Node::from(5))])]);
        assert_eq!(merged, map([("a", seq([1, 2]))]));
        assert!(conflicts.is_empty());
    }

    #[test]
    fn src_sequence_beats_dest_scalar() {
        let (merged, _) = merge(vec![map([("a", Node::from(5))]), map([("a", seq([3, 4]))])]);
        assert_eq!(merged, map([("a", seq([3, 4]))]));
    }

    #[test]
    fn mapping_then_scalar_conflicts_and_keeps_mapping() {
        let inner = Node::Mapping(map([("x", Node::from(1))]));
        let (merged, conflicts) = merge(vec![map([("a", inner.clone())]), map([("a", Node::from(5))])]);
        assert_eq!(merged, map([("a", inner)]));
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].key(), Some(&Scalar::from("a")));
        assert_eq!(conflicts[0].kept, NodeKind::Mapping);
        assert_eq!(conflicts[0].discarded, NodeKind::Scalar);
    }

    #[test]
    fn scalar_then_mapping_conflicts_and_keeps_scalar() {
        let (merged, conflicts) = merge(vec![
            map([("a", Node::from("plain"))]),
            map([("a", Node::Mapping(map([("x", Node::from(1))])))]),
        ]);
        assert_eq!(merged, map([("a", Node::from("plain"))]));
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].kept, NodeKind::Scalar);
        assert_eq!(conflicts[0].discarded, NodeKind::Mapping);
    }

    #[test]
    fn mapping_vs_sequence_conflicts_instead_of_sequence_rule() {
        let inner = Node::Mapping(map([("x", Node::from(1))]));
        let (merged, conflicts) = merge(vec![map([("a", inner.clone())]), map([("a", seq([1]))])]);
        assert_eq!(merged, map([("a", inner)]));
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].discarded, NodeKind::Sequence);
    }

    #[test]
    fn nested_conflict_reports_full_path() {
        let (merged, conflicts) = merge(vec![
            map([("outer", Node::Mapping(map([("inner", Node::Mapping(map([("k", Node::from(1))])))])))]),
            map([("outer", Node::Mapping(map([("inner", Node::from(false)), ("extra", Node::from(2))])))]),
        ]);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].path.to_string(), "outer.inner");
        assert_eq!(conflicts[0].to_string(), "Conflict for key inner. Values are not both maps.");

        let outer = merged[&Scalar::from("outer")].as_mapping().unwrap();
        assert_eq!(outer[&Scalar::from("extra")], Node::from(2));
        assert!(outer[&Scalar::from("inner")].is_mapping());
    }

    #[test]
    fn conflict_does_not_stop_sibling_keys() {
        let (merged, conflicts) = merge(vec![
            map([("a", Node::Mapping(Mapping::new())), ("b", Node::from(1))]),
            map([("a", Node::from(1)), ("b", Node::from(2)), ("c", Node::from(3))]),
        ]);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(merged[&Scalar::from("b")], Node::from(2));
        assert_eq!(merged[&Scalar::from("c")], Node::from(3));
    }

    #[test]
    fn deep_documents_do_not_overflow() {
        fn chain(depth: usize, leaf: &str) -> Mapping {
            let mut node = map([(leaf, Node::from(true))]);
            for _ in 0..depth {
                node = map([("n", Node::Mapping(node))]);
            }
            node
        }

        let depth = 100_000;
        let mut conflicts: Vec<Conflict> = Vec::new();
        let mut merged = merge_into(chain(depth, "left"), chain(depth, "right"), &mut conflicts);
        assert!(conflicts.is_empty());

        // Take each level apart by hand; dropping the whole tree would recurse.
        let mut level = 0;
        loop {
            match merged.remove(&Scalar::from("n")) {
                Some(Node::Mapping(next)) => {
                    merged = next;
                    level += 1;
                }
                _ => break,
            }
        }
        assert_eq!(level, depth);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn merge_leaves_rules() {
        assert_eq!(merge_leaves(seq([1]), seq([2])), seq([1, 2]));
        assert_eq!(merge_leaves(seq([1]), Node::from("s")), seq([1]));
        assert_eq!(merge_leaves(Node::from("s"), seq([1])), seq([1]));
        assert_eq!(merge_leaves(Node::from(1), Node::from(2)), Node::from(2));
        assert_eq!(merge_leaves(Node::from(1), Node::Scalar(Scalar::Null)), Node::Scalar(Scalar::Null));
    }

    fn leaf() -> impl Strategy<Value = Node> {
        prop_oneof![
            any::<i64>().prop_map(Node::from),
            any::<bool>().prop_map(Node::from),
            "[a-z]{0,4}".prop_map(Node::from),
            prop::collection::vec(any::<i64>().prop_map(Node::from), 0..3).prop_map(Node::Sequence),
        ]
    }

    fn node() -> impl Strategy<Value = Node> {
        leaf().prop_recursive(3, 24, 4, |inner| {
            prop::collection::btree_map("[a-c]", inner, 0..4).prop_map(|m| {
                Node::Mapping(m.into_iter().map(|(k, v)| (Scalar::from(k), v)).collect())
            })
        })
    }

    fn document() -> impl Strategy<Value = Mapping> {
        prop::collection::btree_map("[a-d]", node(), 0..5)
            .prop_map(|m| m.into_iter().map(|(k, v)| (Scalar::from(k), v)).collect())
    }

    proptest! {
        #[test]
        fn fold_is_left_associative(a in document(), b in document(), c in document()) {
            let (all, _) = merge(vec![a.clone(), b.clone(), c.clone()]);
            let (ab, _) = merge(vec![a, b]);
            let (stepwise, _) = merge(vec![ab, c]);
            prop_assert_eq!(all, stepwise);
        }

        #[test]
        fn merging_into_empty_is_identity(a in document()) {
            let (merged, conflicts) = merge(vec![Mapping::new(), a.clone()]);
            prop_assert_eq!(merged, a);
            prop_assert!(conflicts.is_empty());
        }

        #[test]
        fn keys_absent_from_src_are_untouched(a in document(), b in document()) {
            let (merged, _) = merge(vec![a.clone(), b.clone()]);
            for (key, value) in &a {
                if !b.contains_key(key) {
                    prop_assert_eq!(merged.get(key), Some(value));
                }
            }
            for key in merged.keys() {
                prop_assert!(a.contains_key(key) || b.contains_key(key));
            }
        }
    }
}
