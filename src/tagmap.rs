//! The subset/superset tag index (component `C3` of the specification).
//!
//! Keys are associated with small sets of totally-ordered tags; the index needs to
//! efficiently answer "which keys have a tag set that is a subset of S" (used as the
//! tag-subset prefilter during traversal) and "... a superset of S" (used by the
//! global rewiring pass). The typical backing structure, and the one implemented
//! here, is a set-trie: a key's sorted tag sequence becomes a path from the root, so
//! keys sharing a tag prefix share trie nodes.

use indexmap::IndexMap;
use std::collections::BTreeMap;
use std::hash::Hash;

/// Trait boundary so the core index doesn't have to know the tag map is backed by a
/// trie specifically; a user could plug in a bitset-based implementation for a small,
/// dense tag universe, for instance.
pub trait TagMap<K, T> {
    fn put(&mut self, key: K, tags: impl IntoIterator<Item = T>);
    fn remove(&mut self, key: &K);
    /// `{ k : tags(k) subset-of S }`. `strict` excludes `tags(k) == S`.
    fn subsets_of(&self, tags: &[T], strict: bool) -> Vec<K>;
    /// `{ k : tags(k) superset-of S }`. `strict` excludes `tags(k) == S`.
    fn supersets_of(&self, tags: &[T], strict: bool) -> Vec<K>;
}

#[derive(Debug)]
struct TrieNode<K, T: Ord> {
    children: BTreeMap<T, TrieNode<K, T>>,
    keys: Vec<K>,
}

impl<K, T: Ord> Default for TrieNode<K, T> {
    fn default() -> Self {
        TrieNode {
            children: BTreeMap::new(),
            keys: Vec::new(),
        }
    }
}

/// A set-trie-backed [`TagMap`]. `K` identifies the entry (an edge index, a node
/// index, a user key — whatever the caller is indexing by tag set); `T` is the tag
/// type, which must be `Ord` so each key's tag set has one canonical sorted path.
pub struct SetTrieTagMap<K: Clone + Eq + Hash, T: Clone + Eq + Hash + Ord> {
    root: TrieNode<K, T>,
    /// Each live key's sorted, de-duplicated tag sequence, kept so `remove` can find
    /// the trie path back to its leaf without a second traversal structure.
    entries: IndexMap<K, Vec<T>>,
}

impl<K: Clone + Eq + Hash, T: Clone + Eq + Hash + Ord> Default for SetTrieTagMap<K, T> {
    fn default() -> Self {
        SetTrieTagMap {
            root: TrieNode::default(),
            entries: IndexMap::new(),
        }
    }
}

impl<K: Clone + Eq + Hash, T: Clone + Eq + Hash + Ord> SetTrieTagMap<K, T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn tags_of(&self, key: &K) -> Option<&[T]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    fn sorted_unique(tags: impl IntoIterator<Item = T>) -> Vec<T> {
        let mut v: Vec<T> = tags.into_iter().collect();
        v.sort();
        v.dedup();
        v
    }

    fn collect_subsets(node: &TrieNode<K, T>, s: &[T], idx: usize, depth: usize, strict: bool, out: &mut Vec<K>) {
        if !strict || depth < s.len() {
            out.extend(node.keys.iter().cloned());
        }
        for i in idx..s.len() {
            if let Some(child) = node.children.get(&s[i]) {
                Self::collect_subsets(child, s, i + 1, depth + 1, strict, out);
            }
        }
    }

    fn collect_all(node: &TrieNode<K, T>, depth: usize, s_len: usize, strict: bool, out: &mut Vec<K>) {
        if !strict || depth > s_len {
            out.extend(node.keys.iter().cloned());
        }
        for child in node.children.values() {
            Self::collect_all(child, depth + 1, s_len, strict, out);
        }
    }

    fn collect_supersets(node: &TrieNode<K, T>, s: &[T], idx: usize, depth: usize, strict: bool, out: &mut Vec<K>) {
        if idx == s.len() {
            Self::collect_all(node, depth, s.len(), strict, out);
            return;
        }
        for (tag, child) in node.children.range(..) {
            if *tag == s[idx] {
                Self::collect_supersets(child, s, idx + 1, depth + 1, strict, out);
            } else if *tag < s[idx] {
                Self::collect_supersets(child, s, idx, depth + 1, strict, out);
            } else {
                // Trie paths only increase; nothing further in a sorted BTreeMap can
                // match `s[idx]` past this point.
                break;
            }
        }
    }
}

impl<K: Clone + Eq + Hash, T: Clone + Eq + Hash + Ord> TagMap<K, T> for SetTrieTagMap<K, T> {
    fn put(&mut self, key: K, tags: impl IntoIterator<Item = T>) {
        self.remove(&key);
        let sorted = Self::sorted_unique(tags);
        let mut node = &mut self.root;
        for t in &sorted {
            node = node.children.entry(t.clone()).or_default();
        }
        node.keys.push(key.clone());
        self.entries.insert(key, sorted);
    }

    fn remove(&mut self, key: &K) {
        let Some(sorted) = self.entries.shift_remove(key) else {
            return;
        };
        let mut node = &mut self.root;
        for t in &sorted {
            match node.children.get_mut(t) {
                Some(child) => node = child,
                None => return, // tree and `entries` disagree; nothing more to clean up
            }
        }
        node.keys.retain(|k| k != key);
    }

    fn subsets_of(&self, tags: &[T], strict: bool) -> Vec<K> {
        let mut sorted = tags.to_vec();
        sorted.sort();
        sorted.dedup();
        let mut out = Vec::new();
        Self::collect_subsets(&self.root, &sorted, 0, 0, strict, &mut out);
        out
    }

    fn supersets_of(&self, tags: &[T], strict: bool) -> Vec<K> {
        let mut sorted = tags.to_vec();
        sorted.sort();
        sorted.dedup();
        let mut out = Vec::new();
        Self::collect_supersets(&self.root, &sorted, 0, 0, strict, &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map_with(entries: &[(&str, &[i32])]) -> SetTrieTagMap<String, i32> {
        let mut m = SetTrieTagMap::new();
        for (k, tags) in entries {
            m.put(k.to_string(), tags.iter().copied());
        }
        m
    }

    #[test]
    fn subsets_of_finds_prefix_and_subsequence_matches() {
        let m = map_with(&[("a", &[1]), ("b", &[1, 2]), ("c", &[2, 3]), ("d", &[])]);
        let mut found = m.subsets_of(&[1, 2], false);
        found.sort();
        assert_eq!(found, vec!["a", "b", "d"]);
    }

    #[test]
    fn subsets_of_strict_excludes_exact_match() {
        let m = map_with(&[("a", &[1, 2])]);
        assert!(m.subsets_of(&[1, 2], true).is_empty());
        assert_eq!(m.subsets_of(&[1, 2], false), vec!["a".to_string()]);
    }

    #[test]
    fn supersets_of_finds_keys_containing_all_tags() {
        let m = map_with(&[("a", &[1]), ("b", &[1, 2]), ("c", &[1, 2, 3]), ("d", &[2, 3])]);
        let mut found = m.supersets_of(&[1, 2], false);
        found.sort();
        assert_eq!(found, vec!["b", "c"]);
    }

    #[test]
    fn supersets_of_strict_excludes_exact_match() {
        let m = map_with(&[("a", &[1, 2]), ("b", &[1, 2, 3])]);
        assert_eq!(m.supersets_of(&[1, 2], true), vec!["b".to_string()]);
    }

    #[test]
    fn remove_then_query_forgets_key() {
        let mut m = map_with(&[("a", &[1, 2])]);
        m.remove(&"a".to_string());
        assert!(m.subsets_of(&[1, 2], false).is_empty());
        assert!(m.supersets_of(&[], false).is_empty());
    }

    #[test]
    fn put_overwrites_existing_key() {
        let mut m = map_with(&[("a", &[1, 2])]);
        m.put("a".to_string(), [3, 4]);
        assert!(m.subsets_of(&[1, 2], false).is_empty());
        assert_eq!(m.subsets_of(&[3, 4], false), vec!["a".to_string()]);
    }
}
