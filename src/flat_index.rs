//! Linear-scan reference index (component `C8`), used as a correctness oracle for the
//! hierarchical [`crate::index::Index`] (property P1) and for benchmarking the
//! speedup the subsumption structure provides.

use std::hash::Hash;

use indexmap::{IndexMap, IndexSet};

use crate::error::IndexError;
use crate::graph::SetOps;
use crate::mapping::Iso;
use crate::matcher::IsoMatcher;

pub struct FlatIndex<K, G, M>
where
    K: Clone + Eq + Hash,
    G: SetOps,
    M: IsoMatcher<G>,
{
    entries: IndexMap<K, G>,
    matcher: M,
}

impl<K, G, M> FlatIndex<K, G, M>
where
    K: Clone + Eq + Hash,
    G: SetOps,
    M: IsoMatcher<G>,
{
    pub fn new(matcher: M) -> Self {
        FlatIndex {
            entries: IndexMap::new(),
            matcher,
        }
    }

    pub fn put(&mut self, key: K, graph: G) -> Result<K, IndexError> {
        if let Some(existing) = self.entries.get(&key) {
            return if *existing == graph {
                Ok(key)
            } else {
                Err(IndexError::key_already_exists())
            };
        }
        self.entries.insert(key.clone(), graph);
        Ok(key)
    }

    pub fn get(&self, key: &K) -> Option<G> {
        self.entries.get(key).cloned()
    }

    pub fn remove(&mut self, key: &K) -> Result<(), IndexError> {
        self.entries.shift_remove(key).map(|_| ()).ok_or_else(IndexError::unknown_key)
    }

    /// Scans every entry and invokes the matcher directly: no residual/tag
    /// machinery, just the oracle answer `lookup` is checked against.
    pub fn lookup(&self, query: &G, exact: bool, base_iso: Option<Iso<G::Vertex>>) -> IndexMap<K, IndexSet<Iso<G::Vertex>>> {
        let base = base_iso.unwrap_or_default();
        let mut result: IndexMap<K, IndexSet<Iso<G::Vertex>>> = IndexMap::new();
        for (key, stored) in &self.entries {
            let mus = self.matcher.find_matches(&base, stored, query);
            for mu in mus {
                let covered = stored.apply_iso(&mu);
                let residual = query.difference(&covered);
                if exact && !residual.is_empty() {
                    continue;
                }
                result.entry(key.clone()).or_default().insert(mu.remove_identity());
            }
        }
        result
    }
}
