use crate::analyzer::{Analyzer, EnglishAnalyzer};
use crate::config::ScoringConfig;
use crate::idf::{Idf, IdfCache};
use crate::store::{Document, TermFrequencyStore};
use crate::weight::DocumentVector;
use std::sync::{Arc, OnceLock};

/// Mutable ingestion phase. Consumed by [`CorpusBuilder::build`].
pub struct CorpusBuilder {
    analyzer: Arc<dyn Analyzer>,
    config: ScoringConfig,
    store: TermFrequencyStore,
}

impl CorpusBuilder {
    pub fn new(analyzer: Arc<dyn Analyzer>, config: ScoringConfig) -> Self {
        Self { analyzer, config, store: TermFrequencyStore::new() }
    }

    pub fn english() -> Self {
        Self::new(Arc::new(EnglishAnalyzer::new()), ScoringConfig::default())
    }

    pub fn with_config(mut self, config: ScoringConfig) -> Self {
        self.config = config;
        self
    }

    pub fn analyzer(&self) -> &dyn Analyzer { self.analyzer.as_ref() }

    /// Analyze raw text and record it under `name`.
    pub fn add_text(&mut self, name: impl Into<String>, text: &str) {
        let tokens = self.analyzer.analyze(text);
        self.record(name, tokens);
    }

    /// Record tokens that are already normalized and stemmed.
    pub fn record(&mut self, name: impl Into<String>, tokens: Vec<String>) {
        let name = name.into();
        let n_tokens = tokens.len();
        if self.store.record(name.clone(), tokens).is_some() {
            tracing::warn!(%name, "document recorded twice, replacing earlier content");
        }
        tracing::trace!(%name, n_tokens, "recorded document");
    }

    pub fn len(&self) -> usize { self.store.len() }

    pub fn is_empty(&self) -> bool { self.store.is_empty() }

    pub fn build(self) -> CorpusIndex {
        let vectors = (0..self.store.len()).map(|_| OnceLock::new()).collect();
        tracing::info!(
            num_docs = self.store.len(),
            num_terms = self.store.vocabulary_size(),
            idf_formula = ?self.config.idf_formula,
            "corpus index built"
        );
        CorpusIndex {
            idf: IdfCache::new(self.config.idf_formula),
            analyzer: self.analyzer,
            config: self.config,
            store: self.store,
            vectors,
        }
    }
}

/// Frozen corpus with its lazily filled statistics.
///
/// Only the IDF cache and the per-document vector slots are written after construction,
/// and both are safe to fill from concurrent queries.
pub struct CorpusIndex {
    pub(crate) analyzer: Arc<dyn Analyzer>,
    pub(crate) config: ScoringConfig,
    pub(crate) store: TermFrequencyStore,
    pub(crate) idf: IdfCache,
    pub(crate) vectors: Vec<OnceLock<DocumentVector>>,
}

impl CorpusIndex {
    pub fn analyzer(&self) -> &dyn Analyzer { self.analyzer.as_ref() }

    pub fn config(&self) -> ScoringConfig { self.config }

    pub fn len(&self) -> usize { self.store.len() }

    pub fn is_empty(&self) -> bool { self.store.is_empty() }

    pub fn document(&self, name: &str) -> Option<&Document> { self.store.get(name) }

    /// Documents in insertion order.
    pub fn documents(&self) -> impl Iterator<Item = &Document> + '_ { self.store.iter() }

    /// IDF of an already stemmed term.
    pub fn idf(&self, term: &str) -> Idf { self.idf.get(&self.store, term) }

    pub fn cached_idf_terms(&self) -> usize { self.idf.cached_len() }

    pub fn vocabulary_size(&self) -> usize { self.store.vocabulary_size() }
}

impl std::fmt::Debug for CorpusIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CorpusIndex")
            .field("documents", &self.store.len())
            .field("config", &self.config)
            .field("cached_idf_terms", &self.idf.cached_len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_keeps_insertion_order() {
        let mut b = CorpusBuilder::english();
        b.add_text("z", "zebra");
        b.add_text("a", "apple");
        let idx = b.build();
        let names: Vec<&str> = idx.documents().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["z", "a"]);
    }

    #[test]
    fn add_text_stems_and_drops_stopwords() {
        let mut b = CorpusBuilder::english();
        b.add_text("d", "The runners are running");
        let idx = b.build();
        let doc = idx.document("d").unwrap();
        assert_eq!(doc.tokens, vec!["runner", "run"]);
    }

    #[test]
    fn idf_is_cached_through_index() {
        let mut b = CorpusBuilder::english();
        b.add_text("a", "space");
        b.add_text("b", "time");
        let idx = b.build();
        assert_eq!(idx.idf("space"), Idf::Value(2f64.log10()));
        assert_eq!(idx.idf("void"), Idf::NotFound);
        assert_eq!(idx.cached_idf_terms(), 2);
    }

    #[test]
    fn index_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CorpusIndex>();
    }
}
