use crate::error::{RankError, Result};
use crate::index::CorpusIndex;
use crate::store::term_counts;
use crate::weight::sublinear_tf;
use indexmap::IndexMap;
use std::sync::Arc;

/// Unit-length sublinear TF weights of the distinct query words, in first-occurrence order.
///
/// Words are normalized but not stemmed; stemming happens per lookup in the weight calculator.
/// Carries no IDF component.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryVector {
    tokens: Vec<String>,
    weights: IndexMap<String, f64>,
}

impl QueryVector {
    /// Build from normalized query tokens. An empty token list is [`RankError::EmptyQuery`].
    pub fn from_tokens(tokens: Vec<String>) -> Result<Self> {
        if tokens.is_empty() {
            return Err(RankError::EmptyQuery);
        }
        let mut weights: IndexMap<String, f64> = IndexMap::new();
        for token in &tokens {
            weights.entry(token.clone()).or_insert(0.0);
        }
        let counts = term_counts(&tokens);
        for (term, w) in weights.iter_mut() {
            *w = sublinear_tf(counts[term.as_str()]);
        }
        // Every weight is at least 1, so the norm is positive.
        let norm = weights.values().map(|w| w * w).sum::<f64>().sqrt();
        for w in weights.values_mut() { *w /= norm; }
        Ok(Self { tokens, weights })
    }

    /// Normalized tokens as they appeared in the query, duplicates included.
    pub fn tokens(&self) -> &[String] { &self.tokens }

    pub fn weight(&self, term: &str) -> f64 {
        self.weights.get(term).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.weights.iter().map(|(t, w)| (t.as_str(), *w))
    }

    pub fn len(&self) -> usize { self.weights.len() }

    pub fn is_empty(&self) -> bool { self.weights.is_empty() }
}

/// Best document for a query. `document` is `None` and `score` is `-inf` for an empty corpus.
#[derive(Debug, Clone, PartialEq)]
pub struct TopMatch {
    pub document: Option<String>,
    pub score: f64,
}

impl TopMatch {
    pub fn none() -> Self {
        Self { document: None, score: f64::NEG_INFINITY }
    }

    pub fn is_match(&self) -> bool { self.document.is_some() }
}

/// Ranks every document of a shared [`CorpusIndex`] against free-text queries.
#[derive(Debug, Clone)]
pub struct QueryEngine {
    index: Arc<CorpusIndex>,
}

impl QueryEngine {
    pub fn new(index: Arc<CorpusIndex>) -> Self { Self { index } }

    pub fn index(&self) -> &CorpusIndex { &self.index }

    /// Normalize `query` with the index's analyzer, without stemming.
    pub fn query_vector(&self, query: &str) -> Result<QueryVector> {
        QueryVector::from_tokens(self.index.analyzer().normalize(query))
    }

    /// Return the single best-scoring document for `query`.
    ///
    /// Score is the dot product of the query vector with the document's normalized
    /// TF-IDF weights over the distinct query words. Ties go to the earlier document.
    pub fn rank(&self, query: &str) -> Result<TopMatch> {
        let qv = self.query_vector(query)?;
        let index = self.index.as_ref();
        let analyzer = index.analyzer();
        let stemmed: Vec<(String, f64)> = qv
            .iter()
            .map(|(term, w)| (analyzer.stem(term), w))
            .collect();

        let mut best = TopMatch::none();
        for (pos, doc) in index.store.iter().enumerate() {
            let vector = index.vector_at(pos, doc);
            let score: f64 = stemmed.iter().map(|(term, w)| vector.weight(term) * w).sum();
            if score > best.score {
                best = TopMatch { document: Some(doc.name.clone()), score };
            }
        }
        tracing::debug!(
            query,
            terms = qv.len(),
            document = best.document.as_deref().unwrap_or("<none>"),
            score = best.score,
            "ranked query"
        );
        Ok(best)
    }
}
