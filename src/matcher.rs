//! The pluggable graph-isomorphism oracle (component `C2` of the specification).
//!
//! The specification frames this as "a variant-bearing capability, not an inheritance
//! hierarchy" — in Rust terms, a trait with a single method, which callers can swap
//! out (a hand-rolled VF2-like search, a flat brute-force search, or a user-supplied
//! implementation tuned to their graph shape) without the core index caring which.

use crate::graph::SetOps;
use crate::mapping::Iso;

/// Enumerates every mapping `mu` extending `base` such that applying `mu` to every
/// item of `a` yields a subset of the items of `b`.
///
/// Concrete vertices must map to themselves; abstract/blank vertices may map to any
/// vertex, as long as doing so is consistent across every item touching them.
/// Enumeration need not be exhaustive in a single call if a given implementation finds
/// that cheaper, but the returned set must be complete: the index relies on "no
/// mappings returned" meaning "provably no embedding exists", not "none found yet".
///
/// Implementations are free to memoize or short-circuit internally; the index treats
/// this as a black box and makes no assumptions about its internal complexity beyond
/// "returns eventually, correctly".
pub trait IsoMatcher<G: SetOps> {
    /// Returns every valid full mapping (base plus discovered delta). An empty
    /// `Vec` means no embedding of `a` into `b` extending `base` exists.
    fn find_matches(&self, base: &Iso<G::Vertex>, a: &G, b: &G) -> Vec<Iso<G::Vertex>>;
}

/// Adapts a plain closure into an [`IsoMatcher`], for callers who want to plug in a
/// one-off matching strategy without declaring a named type.
pub struct FnMatcher<G: SetOps, F>
where
    F: Fn(&Iso<G::Vertex>, &G, &G) -> Vec<Iso<G::Vertex>>,
{
    f: F,
    _marker: std::marker::PhantomData<G>,
}

impl<G: SetOps, F> FnMatcher<G, F>
where
    F: Fn(&Iso<G::Vertex>, &G, &G) -> Vec<Iso<G::Vertex>>,
{
    pub fn new(f: F) -> Self {
        FnMatcher {
            f,
            _marker: std::marker::PhantomData,
        }
    }
}

impl<G: SetOps, F> IsoMatcher<G> for FnMatcher<G, F>
where
    F: Fn(&Iso<G::Vertex>, &G, &G) -> Vec<Iso<G::Vertex>>,
{
    fn find_matches(&self, base: &Iso<G::Vertex>, a: &G, b: &G) -> Vec<Iso<G::Vertex>> {
        (self.f)(base, a, b)
    }
}
