use indexmap::IndexMap;
use std::collections::HashSet;

/// Term -> raw occurrence count, in first-occurrence order. Present terms always have a count of at least 1.
pub type TermCounts = IndexMap<String, u32>;

/// A single ingested document: its normalized token stream and derived counts.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub name: String,
    pub tokens: Vec<String>,
    pub counts: TermCounts,
}

impl Document {
    pub fn new(name: impl Into<String>, tokens: Vec<String>) -> Self {
        let counts = term_counts(&tokens);
        Self { name: name.into(), tokens, counts }
    }

    pub fn count(&self, term: &str) -> u32 {
        self.counts.get(term).copied().unwrap_or(0)
    }

    pub fn contains(&self, term: &str) -> bool { self.counts.contains_key(term) }
}

/// Per-document term frequencies, keyed by document name in insertion order.
#[derive(Debug, Default, Clone)]
pub struct TermFrequencyStore {
    docs: IndexMap<String, Document>,
}

impl TermFrequencyStore {
    pub fn new() -> Self { Self::default() }

    /// Record `tokens` (already normalized and stemmed) under `name`.
    /// Returns the replaced document if `name` was already present; it keeps its original position.
    pub fn record(&mut self, name: impl Into<String>, tokens: Vec<String>) -> Option<Document> {
        let doc = Document::new(name, tokens);
        self.docs.insert(doc.name.clone(), doc)
    }

    pub fn get(&self, name: &str) -> Option<&Document> { self.docs.get(name) }

    pub fn position(&self, name: &str) -> Option<usize> { self.docs.get_index_of(name) }

    /// Insertion position and document for `name`.
    pub fn get_full(&self, name: &str) -> Option<(usize, &Document)> {
        self.docs.get_full(name).map(|(pos, _, doc)| (pos, doc))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Document> + '_ { self.docs.values() }

    pub fn len(&self) -> usize { self.docs.len() }

    pub fn is_empty(&self) -> bool { self.docs.is_empty() }

    /// Number of documents whose counts contain `term`. Full scan.
    pub fn document_frequency(&self, term: &str) -> usize {
        self.docs.values().filter(|doc| doc.contains(term)).count()
    }

    pub fn vocabulary_size(&self) -> usize {
        let mut seen: HashSet<&str> = HashSet::new();
        for doc in self.docs.values() {
            seen.extend(doc.counts.keys().map(String::as_str));
        }
        seen.len()
    }
}

pub fn term_counts<S: AsRef<str>>(tokens: &[S]) -> TermCounts {
    let mut counts = TermCounts::new();
    for token in tokens {
        *counts.entry(token.as_ref().to_string()).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(s: &str) -> Vec<String> { s.split_whitespace().map(str::to_string).collect() }

    #[test]
    fn record_counts_terms() {
        let mut store = TermFrequencyStore::new();
        store.record("a", toks("space cool space"));
        let doc = store.get("a").unwrap();
        assert_eq!(doc.count("space"), 2);
        assert_eq!(doc.count("cool"), 1);
        assert_eq!(doc.count("vast"), 0);
        assert!(!doc.counts.values().any(|&c| c == 0));
    }

    #[test]
    fn empty_document_is_valid() {
        let mut store = TermFrequencyStore::new();
        store.record("empty", Vec::new());
        assert_eq!(store.len(), 1);
        assert!(store.get("empty").unwrap().counts.is_empty());
    }

    #[test]
    fn rerecord_keeps_position() {
        let mut store = TermFrequencyStore::new();
        store.record("a", toks("x"));
        store.record("b", toks("y"));
        let old = store.record("a", toks("z"));
        assert_eq!(old.map(|d| d.tokens), Some(toks("x")));
        assert_eq!(store.position("a"), Some(0));
        assert!(store.get("a").unwrap().contains("z"));
    }

    #[test]
    fn document_frequency_scans_all_docs() {
        let mut store = TermFrequencyStore::new();
        store.record("a", toks("x y"));
        store.record("b", toks("y y"));
        assert_eq!(store.document_frequency("y"), 2);
        assert_eq!(store.document_frequency("x"), 1);
        assert_eq!(store.document_frequency("q"), 0);
        assert_eq!(store.vocabulary_size(), 2);
    }
}
