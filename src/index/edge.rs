//! The parent→child relation in the subsumption DAG (component `C4`).

use petgraph::graph::NodeIndex;

use crate::graph::SetOps;
use crate::mapping::Iso;

/// Internal edge weight stored on the `StableDiGraph`. Endpoints are not duplicated
/// here since petgraph already tracks them; callers that need a self-contained view
/// (diagnostics, `print_tree`) go through [`Edge`] instead.
#[derive(Clone)]
pub(crate) struct EdgeWeight<G: SetOps, T> {
    /// Delta mapping (identity pairs removed): how to rename vertices of the parent's
    /// graph when crossing into the child.
    pub(crate) trans_iso: Iso<G::Vertex>,
    /// The part of the child's graph not covered by applying `trans_iso` (composed
    /// with whatever accumulated mapping was in play) to the parent's graph.
    pub(crate) residual_graph: G,
    /// Tags of `residual_graph` not already present on the path from the root to the
    /// parent.
    pub(crate) residual_tags: indexmap::IndexSet<T>,
    /// The full mapping this edge represents (identity pairs retained), as
    /// accumulated at the time the edge was created.
    pub(crate) base_iso: Iso<G::Vertex>,
}

/// A read-only, self-contained view of one edge, for diagnostics. Unlike
/// [`EdgeWeight`] this carries its own endpoints, since callers walking the result of
/// [`crate::index::Index::print_tree`] or similar don't have a graph reference handy.
#[derive(Clone)]
pub struct Edge<G: SetOps, T> {
    pub from: NodeIndex,
    pub to: NodeIndex,
    pub trans_iso: Iso<G::Vertex>,
    pub residual_graph: G,
    pub residual_tags: indexmap::IndexSet<T>,
    pub base_iso: Iso<G::Vertex>,
}
