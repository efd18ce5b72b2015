//! Thin adapter from `key -> object` to `key -> graph` (component `C7`).
//!
//! Stateless beyond delegation: no object is ever stored, so `get`/`lookup` still
//! operate on graphs, not objects. Callers that need the object back are expected to
//! keep their own `key -> object` table alongside this index.

use std::hash::Hash;

use indexmap::IndexSet;

use crate::error::IndexError;
use crate::graph::SetOps;
use crate::index::{Index, IndexConfig};
use crate::mapping::Iso;
use crate::matcher::IsoMatcher;

pub struct ObjectIndex<K, O, G, T, M, F, C>
where
    K: Clone + Eq + Hash + Ord + std::fmt::Debug,
    G: SetOps,
    T: Clone + Eq + Hash + Ord + std::fmt::Debug,
    M: IsoMatcher<G>,
    F: Fn(&G) -> IndexSet<T>,
    C: Fn(&O) -> G,
{
    inner: Index<K, G, T, M, F>,
    object_to_graph: C,
    _object: std::marker::PhantomData<fn(&O)>,
}

impl<K, O, G, T, M, F, C> ObjectIndex<K, O, G, T, M, F, C>
where
    K: Clone + Eq + Hash + Ord + std::fmt::Debug,
    G: SetOps,
    T: Clone + Eq + Hash + Ord + std::fmt::Debug,
    M: IsoMatcher<G>,
    F: Fn(&G) -> IndexSet<T>,
    C: Fn(&O) -> G,
{
    pub fn new(config: IndexConfig<G, M, T, F>, object_to_graph: C) -> Self {
        ObjectIndex {
            inner: Index::new(config),
            object_to_graph,
            _object: std::marker::PhantomData,
        }
    }

    pub fn put(&mut self, key: K, object: &O) -> Result<K, IndexError> {
        let graph = (self.object_to_graph)(object);
        self.inner.put(key, graph)
    }

    pub fn get(&self, key: &K) -> Option<G> {
        self.inner.get(key)
    }

    pub fn remove(&mut self, key: &K) -> Result<(), IndexError> {
        self.inner.remove(key)
    }

    pub fn lookup(&self, query: &O, exact: bool, base_iso: Option<Iso<G::Vertex>>) -> indexmap::IndexMap<K, IndexSet<Iso<G::Vertex>>> {
        let graph = (self.object_to_graph)(query);
        self.inner.lookup(&graph, exact, base_iso)
    }

    pub fn print_tree(&self) -> String {
        self.inner.print_tree()
    }
}
