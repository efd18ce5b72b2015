//! Partial injective vertex mappings ("isomorphisms") and the auxiliary operations the
//! core index threads through its traversal: `map_domain_via`, `map_range_via`,
//! `remove_identity`, and `compatible`.

use std::fmt::{self, Debug, Display, Formatter};
use std::hash::Hash;

/// A vertex usable inside an [`Iso`]. Vertices are totally ordered so that an [`Iso`]
/// can maintain a canonical (sorted) internal representation, which in turn gives it
/// value-based `Eq`/`Hash` regardless of insertion order.
pub trait Vertex: Clone + Eq + Hash + Ord + Debug {}
impl<V: Clone + Eq + Hash + Ord + Debug> Vertex for V {}

/// An injective partial mapping `V -> V`, conventionally used to rename the vertices of
/// one graph so they line up with the vertices of another.
///
/// Internally this is a sorted `Vec` of pairs rather than a `HashMap`/`IndexMap`: we
/// frequently need these as `HashSet`/`IndexSet` elements (to track the set of
/// isomorphisms witnessing an alt-key, or to de-duplicate candidate edges during
/// rewiring), and a sorted `Vec` gives a cheap, order-independent `Eq`/`Hash` for free.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Iso<V: Vertex> {
    pairs: Vec<(V, V)>,
}

impl<V: Vertex> Default for Iso<V> {
    fn default() -> Self {
        Iso { pairs: Vec::new() }
    }
}

impl<V: Vertex> Iso<V> {
    /// The empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an `Iso` from an iterator of pairs. If the same key appears twice with
    /// different values, the later pair wins (callers that care should de-duplicate
    /// beforehand; this mirrors how a `HashMap::from_iter` would behave).
    pub fn from_pairs(pairs: impl IntoIterator<Item = (V, V)>) -> Self {
        let mut iso = Iso::new();
        for (k, v) in pairs {
            iso.insert(k, v);
        }
        iso
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn get(&self, key: &V) -> Option<&V> {
        self.pairs
            .binary_search_by(|(k, _)| k.cmp(key))
            .ok()
            .map(|i| &self.pairs[i].1)
    }

    pub fn contains_key(&self, key: &V) -> bool {
        self.get(key).is_some()
    }

    /// Inserts `key -> value`, overwriting any prior value for `key`.
    pub fn insert(&mut self, key: V, value: V) {
        match self.pairs.binary_search_by(|(k, _)| k.cmp(&key)) {
            Ok(i) => self.pairs[i].1 = value,
            Err(i) => self.pairs.insert(i, (key, value)),
        }
    }

    /// Inserts `key -> value` only if `key` is not already mapped. Used by the
    /// traversal when extending an accumulated base isomorphism with a freshly
    /// discovered delta: pairs already fixed by the base must never be overwritten.
    pub fn insert_if_absent(&mut self, key: V, value: V) {
        if !self.contains_key(&key) {
            self.insert(key, value);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&V, &V)> {
        self.pairs.iter().map(|(k, v)| (k, v))
    }

    pub fn domain(&self) -> impl Iterator<Item = &V> {
        self.pairs.iter().map(|(k, _)| k)
    }

    pub fn range(&self) -> impl Iterator<Item = &V> {
        self.pairs.iter().map(|(_, v)| v)
    }

    /// Drops identity pairs (`k == v`), preserving injectivity. This is the "delta"
    /// form used on edges and in alt-key tables.
    pub fn remove_identity(&self) -> Self {
        Iso {
            pairs: self
                .pairs
                .iter()
                .filter(|(k, v)| k != v)
                .cloned()
                .collect(),
        }
    }

    /// The inverse mapping, valid as long as `self` is injective (which `Iso` always
    /// maintains as an invariant of how it's constructed by this crate).
    pub fn invert(&self) -> Self {
        let mut inverted: Vec<(V, V)> = self.pairs.iter().map(|(k, v)| (v.clone(), k.clone())).collect();
        inverted.sort_by(|a, b| a.0.cmp(&b.0));
        Iso { pairs: inverted }
    }
}

impl<V: Vertex> FromIterator<(V, V)> for Iso<V> {
    fn from_iter<I: IntoIterator<Item = (V, V)>>(iter: I) -> Self {
        Iso::from_pairs(iter)
    }
}

impl<V: Vertex + Display> Debug for Iso<V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Error returned by [`map_domain_via`] when the remapping is not injective: two
/// distinct original keys would land on the same new key. Per the specification this
/// is a *recoverable* condition — callers skip the affected candidate edge rather than
/// aborting the whole operation.
#[derive(Clone, Debug)]
pub struct DomainCollision;

/// `{ via(x) ?? x -> y | (x, y) in src }`: remaps `src`'s domain through `via`, leaving
/// keys `via` doesn't cover untouched. Used when crossing an edge whose `trans_iso`
/// renames the parent's vertices into the child's vertex space: the accumulated base
/// isomorphism (expressed in the parent's vertex space) has to be re-expressed in the
/// child's.
pub fn map_domain_via<V: Vertex>(src: &Iso<V>, via: &Iso<V>) -> Result<Iso<V>, DomainCollision> {
    let mut out = Iso::new();
    for (k, v) in src.iter() {
        let new_key = via.get(k).cloned().unwrap_or_else(|| k.clone());
        if let Some(existing) = out.get(&new_key) {
            if existing != v {
                return Err(DomainCollision);
            }
            continue;
        }
        out.insert(new_key, v.clone());
    }
    Ok(out)
}

/// Symmetric counterpart of [`map_domain_via`]: remaps `src`'s range through `via`,
/// keeping the domain fixed. The specification does not call out a failure mode for
/// this direction (two keys are never forced to collide, since the domain is
/// untouched), so this always succeeds.
pub fn map_range_via<V: Vertex>(src: &Iso<V>, via: &Iso<V>) -> Iso<V> {
    let mut out = Iso::new();
    for (k, v) in src.iter() {
        let new_value = via.get(v).cloned().unwrap_or_else(|| v.clone());
        out.insert(k.clone(), new_value);
    }
    out
}

/// Two partial mappings are compatible if they agree on every key in their shared
/// domain. Used to double-check a matcher's result extends the base it was handed
/// (the matcher contract guarantees this already; the check is defense in depth, not
/// load-bearing).
pub fn compatible<V: Vertex>(a: &Iso<V>, b: &Iso<V>) -> bool {
    for (k, v) in a.iter() {
        if let Some(other_v) = b.get(k) {
            if other_v != v {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iso(pairs: &[(i32, i32)]) -> Iso<i32> {
        Iso::from_pairs(pairs.iter().copied())
    }

    #[test]
    fn remove_identity_drops_fixed_points_only() {
        let m = iso(&[(1, 1), (2, 3), (4, 4)]);
        let delta = m.remove_identity();
        assert_eq!(delta.len(), 1);
        assert_eq!(delta.get(&2), Some(&3));
    }

    #[test]
    fn invert_round_trips() {
        let m = iso(&[(1, 10), (2, 20)]);
        let inv = m.invert();
        assert_eq!(inv.get(&10), Some(&1));
        assert_eq!(inv.get(&20), Some(&2));
        assert_eq!(inv.invert(), m);
    }

    #[test]
    fn map_domain_via_renames_keys() {
        let src = iso(&[(1, 100), (2, 200)]);
        let via = iso(&[(1, 11)]);
        let out = map_domain_via(&src, &via).unwrap();
        assert_eq!(out.get(&11), Some(&100));
        assert_eq!(out.get(&2), Some(&200));
    }

    #[test]
    fn map_domain_via_detects_collision() {
        let src = iso(&[(1, 100), (2, 200)]);
        // Both 1 and 2 get renamed to the same new key 9, but their images differ.
        let via = iso(&[(1, 9), (2, 9)]);
        assert!(map_domain_via(&src, &via).is_err());
    }

    #[test]
    fn compatible_checks_shared_domain_only() {
        let a = iso(&[(1, 10)]);
        let b = iso(&[(1, 10), (2, 20)]);
        assert!(compatible(&a, &b));
        let c = iso(&[(1, 99)]);
        assert!(!compatible(&a, &c));
    }
}
