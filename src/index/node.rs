//! The subsumption DAG's node weight (component `C5`).

use std::hash::Hash;

use indexmap::{IndexMap, IndexSet};
use petgraph::graph::EdgeIndex;

use crate::graph::SetOps;
use crate::mapping::Iso;
use crate::tagmap::SetTrieTagMap;

/// A node in the subsumption DAG.
///
/// A node's `graph` is assigned once, at creation, from whichever key's insertion
/// first produced this isomorphism class, and is never mutated afterward — every
/// other key later found isomorphic to it is recorded in `keys` instead of causing a
/// new node.
pub(crate) struct IndexNode<K, G: SetOps, T: Clone + Eq + Hash + Ord> {
    /// The key used to label this node for diagnostics (`print_tree`) and as the
    /// answer to "does a node exist with an externally visible key". `None` exactly
    /// when the node has outgoing edges but no live key left — a keyless internal
    /// node kept alive only because its children's edges are defined relative to its
    /// `graph`.
    pub(crate) pref_key: Option<K>,
    /// Every live key mapping to this node's isomorphism class, each with the set of
    /// witnessing delta isomorphisms from `graph` to that key's own vertex naming. A
    /// key usually has exactly one witnessing isomorphism; it can have more than one
    /// if `graph` has a nontrivial automorphism discovered through distinct insertion
    /// or rewiring paths.
    pub(crate) keys: IndexMap<K, IndexSet<Iso<G::Vertex>>>,
    pub(crate) graph: G,
    pub(crate) graph_tags: IndexSet<T>,
    /// Outgoing edges indexed by their `residual_tags`, for the tag-subset prefilter
    /// used by both traversal (`subsets_of`) and rewiring (`supersets_of`).
    pub(crate) tag_index: SetTrieTagMap<EdgeIndex, T>,
}

impl<K: Clone + Eq + Hash, G: SetOps, T: Clone + Eq + Hash + Ord> IndexNode<K, G, T> {
    pub(crate) fn new(graph: G, graph_tags: IndexSet<T>) -> Self {
        IndexNode {
            pref_key: None,
            keys: IndexMap::new(),
            graph,
            graph_tags,
            tag_index: SetTrieTagMap::new(),
        }
    }

    pub(crate) fn has_no_live_keys(&self) -> bool {
        self.keys.is_empty()
    }

    pub(crate) fn register_key(&mut self, key: K, delta: Iso<G::Vertex>) {
        self.keys.entry(key.clone()).or_default().insert(delta);
        if self.pref_key.is_none() {
            self.pref_key = Some(key);
        }
    }

    /// Removes `key`. If it was the node's displayed `pref_key`, promotes another
    /// live key to that role if one remains — a pure bookkeeping update, since every
    /// key's witnessing isomorphisms are stored relative to the same immutable
    /// `graph` regardless of which key is "preferred".
    pub(crate) fn forget_key(&mut self, key: &K) {
        self.keys.shift_remove(key);
        if self.pref_key.as_ref() == Some(key) {
            self.pref_key = self.keys.keys().next().cloned();
        }
    }
}
