//! The abstract graph-set algebra the core index is written against (component `C1`
//! of the specification). Nothing in `index` knows what a "graph" or a "vertex"
//! actually contain; it only calls through [`SetOps`].

use crate::mapping::{Iso, Vertex};
use strum_macros::Display as StrumDisplay;

/// The role a vertex plays with respect to isomorphism mapping.
///
/// Concrete vertices are fixed labels (e.g. an RDF IRI or literal) and never get
/// renamed by an [`Iso`]. Abstract and blank vertices are placeholders that *can* be
/// renamed; the distinction between them only matters to front-ends that need to tell
/// a query's variables (`Abstract`) apart from vertices freshly introduced while
/// normalizing a stored pattern (`Blank`) — the core index treats them identically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, StrumDisplay)]
pub enum VertexKind {
    Abstract,
    Blank,
    Concrete,
}

impl VertexKind {
    /// Only `Abstract`/`Blank` vertices are renameable; `Concrete` vertices must map
    /// to themselves in any valid isomorphism.
    pub fn is_renameable(self) -> bool {
        !matches!(self, VertexKind::Concrete)
    }
}

/// A vertex that knows its own [`VertexKind`]. Implementations are expected to order
/// vertices so that two abstract/blank vertices of the same kind compare by an
/// arbitrary-but-stable id, two concrete vertices compare by their natural term order,
/// and a concrete vertex never equals an abstract/blank one.
pub trait GraphVertex: Vertex {
    fn kind(&self) -> VertexKind;
}

/// The graph-set algebra the core index relies on. `G` is expected to behave as a
/// multiset of "items" (edges/triples/whatever the domain binding chooses) over
/// vertices of type [`SetOps::Vertex`].
///
/// All operations are pure; `G` values are treated as immutable once built (the core
/// index never mutates a stored `G` in place, only produces new ones via these
/// methods).
pub trait SetOps: Clone + Eq {
    type Vertex: GraphVertex;

    /// The graph with no items.
    fn empty() -> Self;

    /// Union, assumed idempotent: `union(a, a) == a`.
    fn union(&self, other: &Self) -> Self;

    /// Set-theoretic difference over items.
    fn difference(&self, other: &Self) -> Self;

    fn intersect(&self, other: &Self) -> Self;

    /// Number of items. Must be O(1) or amortised O(1) — the index calls this on
    /// every residual graph it touches.
    fn size(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Renames vertices according to `iso`; vertices outside `iso`'s domain are left
    /// untouched. Must preserve multiplicity and structure (an item present twice
    /// stays present twice; an item's arity/shape is unaffected, only its vertices are
    /// renamed).
    fn apply_iso(&self, iso: &Iso<Self::Vertex>) -> Self;
}
