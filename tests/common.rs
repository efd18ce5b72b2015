//! Shared fixtures for the scenario and property tests: a fixed vertex-numbering
//! scheme plus thin constructors so each test reads as "which triples" rather than
//! "how do I build a `TripleGraph`".

use indexmap::IndexSet;

use subsumption_index::triple::{concrete_term_tags, Term, Triple, TripleGraph, TripleVf2Matcher};
use subsumption_index::{FlatIndex, Index, IndexConfig};

pub fn v(id: u64) -> Term {
    Term::Abstract(id)
}

pub fn c(label: &str) -> Term {
    Term::concrete(label)
}

pub fn g(triples: &[(Term, Term, Term)]) -> TripleGraph {
    TripleGraph::new(triples.iter().cloned().map(|(s, p, o)| Triple::new(s, p, o)))
}

pub type TestIndex = Index<String, TripleGraph, Term, TripleVf2Matcher, fn(&TripleGraph) -> IndexSet<Term>>;
pub type TestFlat = FlatIndex<String, TripleGraph, TripleVf2Matcher>;

pub fn new_index() -> TestIndex {
    Index::new(IndexConfig::new(
        TripleVf2Matcher::default(),
        concrete_term_tags as fn(&TripleGraph) -> IndexSet<Term>,
    ))
}

pub fn new_flat() -> TestFlat {
    FlatIndex::new(TripleVf2Matcher::default())
}
