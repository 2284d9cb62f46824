use crate::error::{RankError, Result};
use crate::idf::Idf;
use crate::index::CorpusIndex;
use crate::store::Document;
use indexmap::IndexMap;

/// Sublinear term frequency: `1 + log10(count)`, 0 for a zero count.
pub fn sublinear_tf(count: u32) -> f64 {
    if count == 0 { 0.0 } else { 1.0 + (count as f64).log10() }
}

/// Normalized TF-IDF weights of one document.
///
/// Built once per document from the whole document's term counts, summed in
/// first-occurrence order so identical documents get bit-identical weights. Terms with no IDF
/// are left out. A document whose raw weights are all zero keeps every weight at 0.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentVector {
    weights: IndexMap<String, f64>,
    raw_norm: f64,
}

impl DocumentVector {
    pub fn compute<F>(doc: &Document, mut idf: F) -> Self
    where
        F: FnMut(&str) -> Idf,
    {
        let mut weights: IndexMap<String, f64> = IndexMap::with_capacity(doc.counts.len());
        for (term, &count) in doc.counts.iter() {
            if let Some(idf) = idf(term).value() {
                weights.insert(term.clone(), sublinear_tf(count) * idf);
            }
        }
        let raw_norm = weights.values().map(|w| w * w).sum::<f64>().sqrt();
        if raw_norm > 0.0 {
            for w in weights.values_mut() { *w /= raw_norm; }
        }
        Self { weights, raw_norm }
    }

    /// Normalized weight of an already stemmed term; 0 when the document lacks it.
    pub fn weight(&self, term: &str) -> f64 {
        self.weights.get(term).copied().unwrap_or(0.0)
    }

    /// Norm of the weights before normalization.
    pub fn raw_norm(&self) -> f64 { self.raw_norm }

    /// Euclidean norm of the normalized weights: 1, or 0 for a degenerate document.
    pub fn norm(&self) -> f64 {
        self.weights.values().map(|w| w * w).sum::<f64>().sqrt()
    }

    pub fn len(&self) -> usize { self.weights.len() }

    pub fn is_empty(&self) -> bool { self.weights.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.weights.iter().map(|(t, w)| (t.as_str(), *w))
    }

    /// Highest-weighted terms, ties broken alphabetically.
    pub fn top_terms(&self, n: usize) -> Vec<(&str, f64)> {
        let mut terms: Vec<(&str, f64)> = self.iter().collect();
        terms.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(b.0))
        });
        terms.truncate(n);
        terms
    }
}

impl CorpusIndex {
    /// Normalized TF-IDF weight of `term` in document `name`.
    ///
    /// `term` is stemmed here with the index's analyzer, so callers pass normalized
    /// but unstemmed query words.
    pub fn weight(&self, name: &str, term: &str) -> Result<f64> {
        let (pos, doc) = self
            .store
            .get_full(name)
            .ok_or_else(|| RankError::UnknownDocument(name.to_string()))?;
        let stemmed = self.analyzer.stem(term);
        Ok(self.vector_at(pos, doc).weight(&stemmed))
    }

    pub fn document_vector(&self, name: &str) -> Result<&DocumentVector> {
        self.document_with_vector(name).map(|(_, vector)| vector)
    }

    /// Stored document and its normalized vector from a single lookup.
    pub fn document_with_vector(&self, name: &str) -> Result<(&Document, &DocumentVector)> {
        let (pos, doc) = self
            .store
            .get_full(name)
            .ok_or_else(|| RankError::UnknownDocument(name.to_string()))?;
        Ok((doc, self.vector_at(pos, doc)))
    }

    /// Cached vector for the document stored at `pos`. Slots are aligned with the store.
    pub(crate) fn vector_at(&self, pos: usize, doc: &Document) -> &DocumentVector {
        self.vectors[pos].get_or_init(|| {
            DocumentVector::compute(doc, |term| self.idf.get(&self.store, term))
        })
    }
}
