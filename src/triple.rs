//! A concrete domain binding (component `C9`): RDF-triple-like graphs over a `Term`
//! vertex type, plus a default backtracking [`IsoMatcher`] good enough to use without
//! writing a custom one.
//!
//! Nothing elsewhere in the crate depends on this module; it exists so the index can
//! be exercised end-to-end without every caller having to invent their own `SetOps`
//! and matcher first.

use indexmap::IndexSet;

use crate::graph::{GraphVertex, SetOps, VertexKind};
use crate::mapping::Iso;
use crate::matcher::IsoMatcher;

/// A vertex in a [`TripleGraph`]. `Abstract` and `Blank` both carry an arbitrary id
/// used only to distinguish distinct placeholders within one graph; `Concrete` carries
/// the actual term (an IRI, a literal, however the caller chooses to stringify it).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Term {
    Abstract(u64),
    Blank(u64),
    Concrete(String),
}

impl Term {
    pub fn concrete(label: impl Into<String>) -> Self {
        Term::Concrete(label.into())
    }
}

impl GraphVertex for Term {
    fn kind(&self) -> VertexKind {
        match self {
            Term::Abstract(_) => VertexKind::Abstract,
            Term::Blank(_) => VertexKind::Blank,
            Term::Concrete(_) => VertexKind::Concrete,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Triple {
    pub subject: Term,
    pub predicate: Term,
    pub object: Term,
}

impl Triple {
    pub fn new(subject: Term, predicate: Term, object: Term) -> Self {
        Triple { subject, predicate, object }
    }

    fn map(&self, iso: &Iso<Term>) -> Triple {
        let rename = |t: &Term| iso.get(t).cloned().unwrap_or_else(|| t.clone());
        Triple {
            subject: rename(&self.subject),
            predicate: rename(&self.predicate),
            object: rename(&self.object),
        }
    }
}

/// A multiset of [`Triple`]s. Backed by `IndexSet` rather than a plain `Vec`: most
/// `SetOps` operations (`union`, `difference`, `intersect`) are set operations over
/// triples, and `IndexSet` gives us those directly while preserving insertion order
/// for deterministic iteration/printing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TripleGraph {
    triples: IndexSet<Triple>,
}

impl TripleGraph {
    pub fn new(triples: impl IntoIterator<Item = Triple>) -> Self {
        TripleGraph {
            triples: triples.into_iter().collect(),
        }
    }

    pub fn triples(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    pub fn contains(&self, t: &Triple) -> bool {
        self.triples.contains(t)
    }
}

impl SetOps for TripleGraph {
    type Vertex = Term;

    fn empty() -> Self {
        TripleGraph::default()
    }

    fn union(&self, other: &Self) -> Self {
        TripleGraph {
            triples: self.triples.union(&other.triples).cloned().collect(),
        }
    }

    fn difference(&self, other: &Self) -> Self {
        TripleGraph {
            triples: self.triples.difference(&other.triples).cloned().collect(),
        }
    }

    fn intersect(&self, other: &Self) -> Self {
        TripleGraph {
            triples: self.triples.intersection(&other.triples).cloned().collect(),
        }
    }

    fn size(&self) -> usize {
        self.triples.len()
    }

    fn apply_iso(&self, iso: &Iso<Term>) -> Self {
        TripleGraph {
            triples: self.triples.iter().map(|t| t.map(iso)).collect(),
        }
    }
}

/// Default tag extractor for [`TripleGraph`]: every concrete term appearing in any
/// position of any triple. Concrete terms are exactly the iso-invariant features a
/// `TripleGraph` has, so this is a reasonable default for callers who don't need a
/// finer-grained tagging scheme (e.g. predicate-only tags to keep tag sets small).
pub fn concrete_term_tags(graph: &TripleGraph) -> IndexSet<Term> {
    let mut tags = IndexSet::new();
    for t in graph.triples() {
        for term in [&t.subject, &t.predicate, &t.object] {
            if term.kind() == VertexKind::Concrete {
                tags.insert(term.clone());
            }
        }
    }
    tags
}

/// A small backtracking matcher in the spirit of VF2: concrete terms must map to
/// themselves, abstract/blank terms may map to any vertex of the host graph as long as
/// the assignment stays injective and consistent across every triple they appear in.
///
/// This walks the pattern's triples one at a time, trying every host triple as a
/// candidate match and recursing on the remaining pattern with the binding extended;
/// it backtracks on failure and returns every complete assignment found, matching the
/// exhaustive-enumeration contract [`IsoMatcher`] requires. Adequate for the small
/// patterns this index is meant for; a caller indexing large patterns should supply
/// their own matcher with real pruning (suggested in the specification's notes on
/// `C2`).
pub struct TripleVf2Matcher;

impl TripleVf2Matcher {
    pub fn new() -> Self {
        TripleVf2Matcher
    }
}

impl Default for TripleVf2Matcher {
    fn default() -> Self {
        Self::new()
    }
}

impl IsoMatcher<TripleGraph> for TripleVf2Matcher {
    fn find_matches(&self, base: &Iso<Term>, a: &TripleGraph, b: &TripleGraph) -> Vec<Iso<Term>> {
        let pattern: Vec<&Triple> = a.triples.iter().collect();
        let mut results = Vec::new();
        let mut current = base.clone();
        search(&pattern, 0, b, &mut current, &mut results);
        results
    }
}

fn search(pattern: &[&Triple], idx: usize, host: &TripleGraph, current: &mut Iso<Term>, results: &mut Vec<Iso<Term>>) {
    if idx == pattern.len() {
        results.push(current.clone());
        return;
    }
    let t = pattern[idx];
    for cand in host.triples.iter() {
        let mut trial = current.clone();
        if unify(&t.subject, &cand.subject, &mut trial)
            && unify(&t.predicate, &cand.predicate, &mut trial)
            && unify(&t.object, &cand.object, &mut trial)
        {
            search(pattern, idx + 1, host, &mut trial, results);
        }
    }
}

/// Tries to extend `iso` so `pattern_term` maps to `host_term`. Concrete terms must
/// already be equal (no binding needed); abstract/blank terms bind on first sight and
/// must agree with any existing binding on repeat sight, and must not collide with a
/// different pattern term already bound to the same host term (injectivity).
fn unify(pattern_term: &Term, host_term: &Term, iso: &mut Iso<Term>) -> bool {
    if pattern_term.kind() == VertexKind::Concrete {
        return pattern_term == host_term;
    }
    if let Some(bound) = iso.get(pattern_term) {
        return bound == host_term;
    }
    if iso.iter().any(|(_, v)| v == host_term) {
        return false;
    }
    iso.insert(pattern_term.clone(), host_term.clone());
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(triples: &[(Term, Term, Term)]) -> TripleGraph {
        TripleGraph::new(triples.iter().cloned().map(|(s, p, o)| Triple::new(s, p, o)))
    }

    #[test]
    fn concrete_triple_matches_itself() {
        let a = graph(&[(Term::concrete("alice"), Term::concrete("knows"), Term::concrete("bob"))]);
        let b = a.clone();
        let matches = TripleVf2Matcher::new().find_matches(&Iso::new(), &a, &b);
        assert_eq!(matches.len(), 1);
        assert!(matches[0].is_empty());
    }

    #[test]
    fn abstract_subject_matches_any_consistent_host_vertex() {
        let a = graph(&[(Term::Abstract(0), Term::concrete("knows"), Term::concrete("bob"))]);
        let b = graph(&[
            (Term::concrete("alice"), Term::concrete("knows"), Term::concrete("bob")),
            (Term::concrete("carol"), Term::concrete("knows"), Term::concrete("bob")),
        ]);
        let mut matches = TripleVf2Matcher::new().find_matches(&Iso::new(), &a, &b);
        matches.sort_by(|x, y| x.get(&Term::Abstract(0)).cmp(&y.get(&Term::Abstract(0))));
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].get(&Term::Abstract(0)), Some(&Term::concrete("alice")));
        assert_eq!(matches[1].get(&Term::Abstract(0)), Some(&Term::concrete("carol")));
    }

    #[test]
    fn injectivity_is_enforced_across_the_pattern() {
        let a = graph(&[
            (Term::Abstract(0), Term::concrete("knows"), Term::Abstract(1)),
            (Term::Abstract(1), Term::concrete("knows"), Term::Abstract(0)),
        ]);
        // Only one host triple exists, so binding both pattern vars consistently would
        // require Abstract(0) == Abstract(1), violating injectivity; no match exists.
        let b = graph(&[(Term::concrete("alice"), Term::concrete("knows"), Term::concrete("alice"))]);
        let matches = TripleVf2Matcher::new().find_matches(&Iso::new(), &a, &b);
        assert!(matches.is_empty());
    }

    #[test]
    fn no_embedding_returns_empty() {
        let a = graph(&[(Term::concrete("alice"), Term::concrete("knows"), Term::concrete("bob"))]);
        let b = graph(&[(Term::concrete("alice"), Term::concrete("likes"), Term::concrete("bob"))]);
        assert!(TripleVf2Matcher::new().find_matches(&Iso::new(), &a, &b).is_empty());
    }
}
