//! The hierarchical subsumption index (component `C6`) — the core of this crate.
//!
//! An `Index<K, G, T, M>` stores `key -> graph` entries in a rooted DAG where an edge
//! `A -> B` means "`G(A)` embeds into `G(B)`, and `B` adds a residual sub-graph and
//! residual tag set beyond `A`". Lookup walks the same tag-prefiltered traversal used
//! by insertion; see [`Index::put`] and [`Index::lookup`].

mod edge;
mod node;

use std::hash::Hash;

use indexmap::{IndexMap, IndexSet};
use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::stable_graph::StableDiGraph;
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use crate::error::IndexError;
use crate::graph::SetOps;
use crate::mapping::{compatible, map_domain_via, map_range_via, Iso};
use crate::matcher::IsoMatcher;
use crate::tagmap::{SetTrieTagMap, TagMap};

pub use edge::Edge;
use edge::EdgeWeight;
use node::IndexNode;

/// Construction-time bundle of the two collaborators the core index can't supply
/// itself: the isomorphism oracle and the tag-extraction function. Mirrors the
/// "bag of collaborators passed at construction" shape used elsewhere for types that
/// need pluggable policy without runtime indirection.
pub struct IndexConfig<G, M, T, F>
where
    G: SetOps,
    M: IsoMatcher<G>,
    F: Fn(&G) -> IndexSet<T>,
{
    pub matcher: M,
    pub extract_tags: F,
    _marker: std::marker::PhantomData<(G, T)>,
}

impl<G, M, T, F> IndexConfig<G, M, T, F>
where
    G: SetOps,
    M: IsoMatcher<G>,
    F: Fn(&G) -> IndexSet<T>,
{
    pub fn new(matcher: M, extract_tags: F) -> Self {
        IndexConfig {
            matcher,
            extract_tags,
            _marker: std::marker::PhantomData,
        }
    }
}

/// One result of the find-insert-positions traversal: a node reached along with the
/// mapping and residual state accumulated to get there.
struct Position<G: SetOps, T> {
    node: NodeIndex,
    base_iso: Iso<G::Vertex>,
    residual_graph: G,
    residual_tags: IndexSet<T>,
}

/// The hierarchical sub-graph isomorphism index.
///
/// `K` is the caller's entry key, `G` the graph type (via [`SetOps`]), `T` the tag
/// type, `M` the pluggable isomorphism oracle, `F` the tag-extraction closure.
pub struct Index<K, G, T, M, F>
where
    K: Clone + Eq + Hash + Ord,
    G: SetOps,
    T: Clone + Eq + Hash + Ord,
    M: IsoMatcher<G>,
    F: Fn(&G) -> IndexSet<T>,
{
    dag: StableDiGraph<IndexNode<K, G, T>, EdgeWeight<G, T>>,
    root: NodeIndex,
    key_to_node: IndexMap<K, NodeIndex>,
    /// Canonical-tag-to-node index (C3 reused at the top level): keyed by node index,
    /// values are each node's full `graph_tags`. Drives the rewiring pass that looks
    /// for superset-tagged candidates anywhere in the index, not just among siblings.
    global_tag_index: SetTrieTagMap<NodeIndex, T>,
    matcher: M,
    extract_tags: F,
}

impl<K, G, T, M, F> Index<K, G, T, M, F>
where
    K: Clone + Eq + Hash + Ord + std::fmt::Debug,
    G: SetOps,
    T: Clone + Eq + Hash + Ord + std::fmt::Debug,
    M: IsoMatcher<G>,
    F: Fn(&G) -> IndexSet<T>,
{
    pub fn new(config: IndexConfig<G, M, T, F>) -> Self {
        let mut dag = StableDiGraph::new();
        let root = dag.add_node(IndexNode::new(G::empty(), IndexSet::new()));
        Index {
            dag,
            root,
            key_to_node: IndexMap::new(),
            global_tag_index: SetTrieTagMap::new(),
            matcher: config.matcher,
            extract_tags: config.extract_tags,
        }
    }

    // ---- public operations (C6, §4.4.1) ----------------------------------------

    pub fn put(&mut self, key: K, graph: G) -> Result<K, IndexError> {
        let _span = tracing::trace_span!("put", ?key, size = graph.size()).entered();
        if self.key_to_node.contains_key(&key) {
            return match self.get(&key) {
                Some(existing) if existing == graph => Ok(key),
                Some(_) => Err(IndexError::key_already_exists()),
                None => Err(IndexError::internal("key_to_node entry with no witnessing graph")),
            };
        }

        let tags = (self.extract_tags)(&graph);
        let mut positions = Vec::new();
        self.find_insert_positions(self.root, Iso::new(), graph.clone(), tags, false, &mut positions);

        let mut new_node: Option<NodeIndex> = None;
        for pos in positions {
            if pos.residual_graph.is_empty() {
                let delta = pos.base_iso.remove_identity();
                self.dag[pos.node].register_key(key.clone(), delta);
                self.key_to_node.insert(key.clone(), pos.node);
            } else {
                let child = *new_node.get_or_insert_with(|| {
                    let tags = (self.extract_tags)(&graph);
                    self.create_node(graph.clone(), tags)
                });
                self.attach_child(pos.node, child, pos.base_iso, pos.residual_graph, pos.residual_tags)?;
                self.rewire_after_insert(pos.node, child)?;
            }
        }
        if let Some(child) = new_node {
            self.dag[child].register_key(key.clone(), Iso::new());
            self.key_to_node.insert(key.clone(), child);
        }
        Ok(key)
    }

    pub fn get(&self, key: &K) -> Option<G> {
        let node_ix = *self.key_to_node.get(key)?;
        let node = &self.dag[node_ix];
        let delta = node.keys.get(key)?.iter().next()?;
        Some(node.graph.apply_iso(delta))
    }

    pub fn remove(&mut self, key: &K) -> Result<(), IndexError> {
        let _span = tracing::trace_span!("remove", ?key).entered();
        let Some(node_ix) = self.key_to_node.get(key).copied() else {
            return Err(IndexError::unknown_key());
        };
        self.key_to_node.shift_remove(key);
        self.dag[node_ix].forget_key(key);
        self.maybe_extinguish(node_ix);
        Ok(())
    }

    pub fn lookup(&self, query: &G, exact: bool, base_iso: Option<Iso<G::Vertex>>) -> IndexMap<K, IndexSet<Iso<G::Vertex>>> {
        let _span = tracing::trace_span!("lookup", size = query.size(), exact).entered();
        let tags = (self.extract_tags)(query);
        let start = base_iso.unwrap_or_default();
        let mut positions = Vec::new();
        self.find_insert_positions(self.root, start, query.clone(), tags, true, &mut positions);

        let mut result: IndexMap<K, IndexSet<Iso<G::Vertex>>> = IndexMap::new();
        for pos in positions {
            if exact && !pos.residual_graph.is_empty() {
                continue;
            }
            let node = &self.dag[pos.node];
            for (alt_key, deltas) in &node.keys {
                for delta in deltas {
                    match map_domain_via(&pos.base_iso, delta) {
                        Ok(mapped) => {
                            result.entry(alt_key.clone()).or_default().insert(mapped.remove_identity());
                        }
                        Err(_) => {
                            tracing::debug!(key = ?alt_key, "domain collision expanding alt-key; skipping");
                        }
                    }
                }
            }
        }
        result
    }

    pub fn print_tree(&self) -> String {
        use std::fmt::Write;
        let mut out = String::new();
        self.print_subtree(self.root, 0, &mut out);
        out
    }

    fn print_subtree(&self, node_ix: NodeIndex, depth: usize, out: &mut String) {
        use std::fmt::Write;
        let node = &self.dag[node_ix];
        let indent = "  ".repeat(depth);
        let _ = writeln!(
            out,
            "{indent}[{:?}] pref={:?} keys={:?} tags={:?}",
            node_ix,
            node.pref_key,
            node.keys.keys().collect::<Vec<_>>(),
            node.graph_tags
        );
        for edge_ref in self.dag.edges(node_ix) {
            let w = edge_ref.weight();
            let trans_pairs: Vec<(&G::Vertex, &G::Vertex)> = w.trans_iso.iter().collect();
            let _ = writeln!(
                out,
                "{indent}  --trans={trans_pairs:?} residual_tags={:?}-->",
                w.residual_tags
            );
            self.print_subtree(edge_ref.target(), depth + 1, out);
        }
    }

    // ---- traversal (§4.4.2 / §4.4.4) -------------------------------------------

    /// Shared find-insert-positions traversal. `retrieval = false` records only
    /// leaf-of-subsumption positions (insertion mode); `retrieval = true` records
    /// every node visited (lookup mode).
    fn find_insert_positions(
        &self,
        node_ix: NodeIndex,
        base_iso: Iso<G::Vertex>,
        residual: G,
        residual_tags: IndexSet<T>,
        retrieval: bool,
        out: &mut Vec<Position<G, T>>,
    ) {
        let node = &self.dag[node_ix];
        let tag_slice: Vec<T> = residual_tags.iter().cloned().collect();
        let candidate_edges = node.tag_index.subsets_of(&tag_slice, false);

        let mut subsumed = false;
        for edge_ix in candidate_edges {
            let Some((_, child_ix)) = self.dag.edge_endpoints(edge_ix) else {
                continue;
            };
            let edge = &self.dag[edge_ix];
            let remapped = match map_domain_via(&base_iso, &edge.trans_iso) {
                Ok(m) => m,
                Err(_) => {
                    tracing::debug!(?edge_ix, "domain collision remapping base iso; skipping candidate edge");
                    continue;
                }
            };
            let mus = self.matcher.find_matches(&remapped, &edge.residual_graph, &residual);
            for mu in mus {
                if !compatible(&mu, &remapped) {
                    continue;
                }
                let mut extended = remapped.clone();
                for (k, v) in mu.iter() {
                    extended.insert_if_absent(k.clone(), v.clone());
                }
                let covered = edge.residual_graph.apply_iso(&mu);
                let new_residual = residual.difference(&covered);
                // Not a set-difference of `residual_tags` against `edge.residual_tags`: an
                // abstract vertex on the edge's side can bind to a concrete vertex here,
                // introducing a tag that wasn't structurally guaranteed by the edge itself.
                // Recomputing directly from `new_residual` is the only sound way to get
                // `residualTags ⊆ tags(residualGraph)` (I4) right at every step.
                let new_residual_tags = (self.extract_tags)(&new_residual);
                subsumed = true;
                self.find_insert_positions(child_ix, extended, new_residual, new_residual_tags, retrieval, out);
            }
        }

        if retrieval || !subsumed {
            out.push(Position {
                node: node_ix,
                base_iso,
                residual_graph: residual,
                residual_tags,
            });
        }
    }

    // ---- insertion helpers (§4.4.2, §4.4.3) ------------------------------------

    fn create_node(&mut self, graph: G, tags: IndexSet<T>) -> NodeIndex {
        let ix = self.dag.add_node(IndexNode::new(graph, tags.clone()));
        self.global_tag_index.put(ix, tags);
        ix
    }

    fn attach_child(
        &mut self,
        parent: NodeIndex,
        child: NodeIndex,
        base_iso: Iso<G::Vertex>,
        residual_graph: G,
        residual_tags: IndexSet<T>,
    ) -> Result<(), IndexError> {
        if parent == child {
            debug_assert!(false, "refusing to create a self-edge in the subsumption DAG");
            return Err(IndexError::internal("refusing to create a self-edge"));
        }
        let trans_iso = base_iso.remove_identity();
        let edge_ix = self.dag.add_edge(
            parent,
            child,
            EdgeWeight {
                trans_iso,
                residual_graph,
                residual_tags: residual_tags.clone(),
                base_iso,
            },
        );
        self.dag[parent].tag_index.put(edge_ix, residual_tags);
        Ok(())
    }

    /// Rewiring after `child` becomes a new child of `parent` (§4.4.3): first a local
    /// pass over `parent`'s other children that `child` should now sit above, then a
    /// global pass using the whole-index tag index to find any other node `child`
    /// should point at directly.
    fn rewire_after_insert(&mut self, parent: NodeIndex, child: NodeIndex) -> Result<(), IndexError> {
        let edge_pc_ix = self
            .dag
            .find_edge(parent, child)
            .ok_or_else(|| IndexError::internal("attach_child did not create the expected edge"))?;
        let (trans_pc, residual_child_graph, residual_child_tags) = {
            let e = &self.dag[edge_pc_ix];
            (e.trans_iso.clone(), e.residual_graph.clone(), e.residual_tags.clone())
        };

        let tag_slice: Vec<T> = residual_child_tags.iter().cloned().collect();
        let sibling_edges = self.dag[parent].tag_index.supersets_of(&tag_slice, false);
        for sibling_edge_ix in sibling_edges {
            if sibling_edge_ix == edge_pc_ix {
                continue;
            }
            let Some((_, sibling_ix)) = self.dag.edge_endpoints(sibling_edge_ix) else {
                continue;
            };
            if sibling_ix == child {
                continue;
            }
            let (trans_sibling, residual_sibling_graph) = {
                let e = &self.dag[sibling_edge_ix];
                (e.trans_iso.clone(), e.residual_graph.clone())
            };

            let base_child_to_sibling = map_range_via(&trans_pc.invert(), &trans_sibling);
            let mus = self
                .matcher
                .find_matches(&base_child_to_sibling, &residual_child_graph, &residual_sibling_graph);
            let existing: IndexSet<Iso<G::Vertex>> = self
                .dag
                .edges(child)
                .filter(|e| e.target() == sibling_ix)
                .map(|e| e.weight().trans_iso.clone())
                .collect();
            let mut rewired = false;
            for mu in mus {
                if !compatible(&mu, &base_child_to_sibling) {
                    continue;
                }
                let mut full = base_child_to_sibling.clone();
                for (k, v) in mu.iter() {
                    full.insert_if_absent(k.clone(), v.clone());
                }
                let delta = full.remove_identity();
                // `child` is now interposed for this sibling relationship regardless
                // of whether the edge below is new: mark it rewired either way so the
                // parent's now-redundant direct edge still gets removed.
                rewired = true;
                if existing.contains(&delta) {
                    // Another parent already discovered and wired this same
                    // child->sibling edge in an earlier iteration of the positions
                    // loop in `put`; adding it again would violate P5.
                    continue;
                }
                let covered = residual_child_graph.apply_iso(&full);
                let new_residual_graph = residual_sibling_graph.difference(&covered);
                let new_residual_tags = (self.extract_tags)(&new_residual_graph);
                let new_edge_ix = self.dag.add_edge(
                    child,
                    sibling_ix,
                    EdgeWeight {
                        trans_iso: delta,
                        residual_graph: new_residual_graph,
                        residual_tags: new_residual_tags.clone(),
                        base_iso: full,
                    },
                );
                self.dag[child].tag_index.put(new_edge_ix, new_residual_tags);
            }
            if rewired {
                self.dag[parent].tag_index.remove(&sibling_edge_ix);
                self.dag.remove_edge(sibling_edge_ix);
            }
        }

        self.rewire_via_global_tag_index(child)
    }

    fn rewire_via_global_tag_index(&mut self, b: NodeIndex) -> Result<(), IndexError> {
        let (b_graph, b_tags) = {
            let nb = &self.dag[b];
            (nb.graph.clone(), nb.graph_tags.clone())
        };
        let tag_slice: Vec<T> = b_tags.iter().cloned().collect();
        let candidates = self.global_tag_index.supersets_of(&tag_slice, true);
        for c in candidates {
            if c == b {
                continue;
            }
            let c_graph = self.dag[c].graph.clone();
            let mus = self.matcher.find_matches(&Iso::new(), &b_graph, &c_graph);
            if mus.is_empty() {
                continue;
            }
            let existing: IndexSet<Iso<G::Vertex>> = self
                .dag
                .edges(b)
                .filter(|e| e.target() == c)
                .map(|e| e.weight().trans_iso.clone())
                .collect();
            for mu in mus {
                let delta = mu.remove_identity();
                if existing.contains(&delta) {
                    continue;
                }
                let covered = b_graph.apply_iso(&mu);
                let residual_graph = c_graph.difference(&covered);
                let residual_tags = (self.extract_tags)(&residual_graph);
                let edge_ix = self.dag.add_edge(
                    b,
                    c,
                    EdgeWeight {
                        trans_iso: delta,
                        residual_graph,
                        residual_tags: residual_tags.clone(),
                        base_iso: mu,
                    },
                );
                self.dag[b].tag_index.put(edge_ix, residual_tags);
            }
        }
        Ok(())
    }

    // ---- extinguishment (§4.4.6) ------------------------------------------------

    fn maybe_extinguish(&mut self, node_ix: NodeIndex) {
        if node_ix == self.root {
            return;
        }
        let should_destroy = {
            let node = &self.dag[node_ix];
            node.has_no_live_keys() && self.dag.edges(node_ix).next().is_none()
        };
        if !should_destroy {
            return;
        }

        let incoming: Vec<EdgeIndex> = self.dag.edges_directed(node_ix, Direction::Incoming).map(|e| e.id()).collect();
        let mut parents: Vec<NodeIndex> = Vec::with_capacity(incoming.len());
        for e in incoming {
            if let Some((p, _)) = self.dag.edge_endpoints(e) {
                parents.push(p);
                self.dag[p].tag_index.remove(&e);
            }
            self.dag.remove_edge(e);
        }
        self.global_tag_index.remove(&node_ix);
        self.dag.remove_node(node_ix);

        parents.sort();
        parents.dedup();
        for p in parents {
            self.maybe_extinguish(p);
        }
    }
}
