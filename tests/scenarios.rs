//! The literal scenarios from the specification: each test builds a small index by
//! hand and checks the exact externally observable outcome the scenario calls for.

use crate::common::*;

/// S1: two related graphs (a bare type assertion, and the same assertion plus a
/// `name` edge) both embed into a query that has both; `lookup` must report both,
/// each with the isomorphism that actually witnesses the embedding.
#[test]
fn s1_lookup_returns_every_embedding_key_with_its_witness() {
    let mut index = new_index();
    index.put("g1".into(), g(&[(v(0), c("type"), c("Person"))])).unwrap();
    index
        .put("g2".into(), g(&[(v(1), c("type"), c("Person")), (v(1), c("name"), v(2))]))
        .unwrap();

    let query = g(&[(v(100), c("type"), c("Person")), (v(100), c("name"), v(101))]);
    let result = index.lookup(&query, false, None);

    let g1_isos = result.get("g1").expect("g1 should embed into the query");
    assert!(g1_isos.iter().any(|iso| iso.len() == 1 && iso.get(&v(0)) == Some(&v(100))));

    let g2_isos = result.get("g2").expect("g2 should embed into the query");
    assert!(g2_isos
        .iter()
        .any(|iso| iso.len() == 2 && iso.get(&v(1)) == Some(&v(100)) && iso.get(&v(2)) == Some(&v(101))));
}

/// S2: adding entries that require a triple the query doesn't have (`age`) must not
/// make them spuriously reachable, and must not disturb the entries from S1.
#[test]
fn s2_unrelated_entries_are_excluded_and_existing_entries_unaffected() {
    let mut index = new_index();
    index.put("g1".into(), g(&[(v(0), c("type"), c("Person"))])).unwrap();
    index
        .put("g2".into(), g(&[(v(1), c("type"), c("Person")), (v(1), c("name"), v(2))]))
        .unwrap();
    index
        .put("g3".into(), g(&[(v(3), c("type"), c("Person")), (v(3), c("age"), v(4))]))
        .unwrap();
    index
        .put(
            "g4".into(),
            g(&[(v(5), c("type"), c("Person")), (v(5), c("age"), v(6)), (v(5), c("name"), v(7))]),
        )
        .unwrap();

    let query = g(&[(v(100), c("type"), c("Person")), (v(100), c("name"), v(101))]);
    let result = index.lookup(&query, false, None);

    assert!(result.contains_key("g1"));
    assert!(result.contains_key("g2"));
    assert!(!result.contains_key("g3"), "g3 needs an age triple the query lacks");
    assert!(!result.contains_key("g4"), "g4 needs an age triple the query lacks");
}

/// S3: a query rich enough to cover every stored shape (type, age, and name) must
/// surface all four entries from S2.
#[test]
fn s3_a_rich_enough_query_surfaces_every_compatible_entry() {
    let mut index = new_index();
    index.put("g1".into(), g(&[(v(0), c("type"), c("Person"))])).unwrap();
    index
        .put("g2".into(), g(&[(v(1), c("type"), c("Person")), (v(1), c("name"), v(2))]))
        .unwrap();
    index
        .put("g3".into(), g(&[(v(3), c("type"), c("Person")), (v(3), c("age"), v(4))]))
        .unwrap();
    index
        .put(
            "g4".into(),
            g(&[(v(5), c("type"), c("Person")), (v(5), c("age"), v(6)), (v(5), c("name"), v(7))]),
        )
        .unwrap();

    let query = g(&[
        (v(200), c("type"), c("Person")),
        (v(200), c("age"), c("30")),
        (v(200), c("name"), c("Ada")),
    ]);
    let result = index.lookup(&query, false, None);

    for key in ["g1", "g2", "g3", "g4"] {
        assert!(result.contains_key(key), "{key} should match the rich query");
    }
}

/// S4: a fully-wildcard triple inserted first fully covers a more specific triple
/// inserted second (same item count, zero residual either way); both keys must still
/// resolve for a fully concrete query, each with its own correct witness.
#[test]
fn s4_a_wildcard_entry_and_a_specific_entry_both_resolve() {
    let mut index = new_index();
    index.put("gA".into(), g(&[(v(300), v(301), v(302))])).unwrap();
    index.put("gB".into(), g(&[(v(310), c("type"), c("Person"))])).unwrap();

    let query = g(&[(c("a"), c("type"), c("Person"))]);
    let result = index.lookup(&query, false, None);

    let gb_isos = result.get("gB").expect("gB should match the query directly");
    assert!(gb_isos.iter().any(|iso| iso.len() == 1 && iso.get(&v(310)) == Some(&c("a"))));

    let ga_isos = result.get("gA").expect("gA's wildcard triple should also match the query");
    assert!(ga_isos
        .iter()
        .any(|iso| iso.get(&v(300)) == Some(&c("a")) && iso.get(&v(301)) == Some(&c("type")) && iso.get(&v(302)) == Some(&c("Person"))));
}

/// S5: two isomorphic graphs inserted under different keys must both resolve from a
/// single lookup, and each key must still reconstruct its own original graph.
#[test]
fn s5_isomorphic_entries_share_storage_but_both_resolve() {
    let mut index = new_index();
    let k1_graph = g(&[(v(400), c("type"), c("Person"))]);
    let k2_graph = g(&[(v(401), c("type"), c("Person"))]);
    index.put("k1".into(), k1_graph.clone()).unwrap();
    index.put("k2".into(), k2_graph.clone()).unwrap();

    let result = index.lookup(&k1_graph, false, None);
    assert!(result.contains_key("k1"));
    assert!(result.contains_key("k2"));

    let k1_isos = result.get("k1").unwrap();
    assert!(k1_isos.iter().any(|iso| iso.is_empty()));

    assert!(index.get(&"k1".to_string()).unwrap() == k1_graph);
    assert!(index.get(&"k2".to_string()).unwrap() == k2_graph);
}

/// S6: removing every key that was ever inserted must cascade all the way back down
/// to a bare root, with nothing left to look up or retrieve.
#[test]
fn s6_removing_every_key_extinguishes_back_to_a_bare_root() {
    let mut index = new_index();
    index.put("g1".into(), g(&[(v(0), c("type"), c("Person"))])).unwrap();
    index
        .put("g2".into(), g(&[(v(1), c("type"), c("Person")), (v(1), c("name"), v(2))]))
        .unwrap();
    index
        .put("g3".into(), g(&[(v(3), c("type"), c("Person")), (v(3), c("age"), v(4))]))
        .unwrap();
    index
        .put(
            "g4".into(),
            g(&[(v(5), c("type"), c("Person")), (v(5), c("age"), v(6)), (v(5), c("name"), v(7))]),
        )
        .unwrap();

    for key in ["g1", "g2", "g3", "g4"] {
        index.remove(&key.to_string()).unwrap();
    }

    assert_eq!(index.print_tree().lines().count(), 1, "only the root line should remain");
    for key in ["g1", "g2", "g3", "g4"] {
        assert!(index.get(&key.to_string()).is_none());
    }
}
