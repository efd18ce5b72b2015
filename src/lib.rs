//! A hierarchical sub-graph isomorphism index.
//!
//! Stores `key -> graph` entries and answers "which stored keys have a graph that
//! embeds into this query graph, and via which mapping(s)". The core data structure
//! is a rooted DAG over stored entries ([`index::Index`]) where an edge from node `A`
//! to node `B` records that `G(A)` embeds into `G(B)` plus whatever residual graph and
//! tags `B` adds beyond `A`; lookup and insertion share one tag-prefiltered traversal
//! of that DAG.
//!
//! The core is generic over three pluggable collaborators, each a trait so callers can
//! swap implementations without touching the index:
//! - [`graph::SetOps`] — the graph-set algebra (union/difference/intersect/apply_iso).
//! - [`matcher::IsoMatcher`] — the sub-graph isomorphism oracle.
//! - [`tagmap::TagMap`] — the subset/superset index over small tag sets.
//!
//! [`triple::TripleGraph`] is a ready-made RDF-triple-like binding of `SetOps` plus a
//! default matcher, for callers who don't want to write their own.

pub mod error;
pub mod flat_index;
pub mod graph;
pub mod index;
pub mod mapping;
pub mod matcher;
pub mod object_index;
pub mod tagmap;
pub mod triple;

pub use error::{IndexError, SingleIndexError};
pub use flat_index::FlatIndex;
pub use graph::{GraphVertex, SetOps, VertexKind};
pub use index::{Edge, Index, IndexConfig};
pub use mapping::{compatible, map_domain_via, map_range_via, DomainCollision, Iso, Vertex};
pub use matcher::{FnMatcher, IsoMatcher};
pub use object_index::ObjectIndex;
pub use tagmap::{SetTrieTagMap, TagMap};
