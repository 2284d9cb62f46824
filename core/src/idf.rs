use crate::config::{IdfFormula, IDF_NOT_FOUND};
use crate::store::TermFrequencyStore;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Inverse document frequency of a term, or the marker for a term no document contains.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Idf {
    Value(f64),
    NotFound,
}

impl Idf {
    pub fn value(self) -> Option<f64> {
        match self {
            Idf::Value(v) => Some(v),
            Idf::NotFound => None,
        }
    }

    /// Numeric form, with `NotFound` mapped to the `-1` sentinel.
    pub fn as_f64(self) -> f64 {
        self.value().unwrap_or(IDF_NOT_FOUND)
    }

    pub fn is_found(self) -> bool { matches!(self, Idf::Value(_)) }
}

/// Memoized IDF per term, filled lazily from a frozen store.
///
/// Values are never invalidated; the owning index guarantees the store does not change.
#[derive(Debug, Default)]
pub struct IdfCache {
    formula: IdfFormula,
    cache: RwLock<HashMap<String, Idf>>,
}

impl IdfCache {
    pub fn new(formula: IdfFormula) -> Self {
        Self { formula, cache: RwLock::new(HashMap::new()) }
    }

    pub fn formula(&self) -> IdfFormula { self.formula }

    pub fn get(&self, store: &TermFrequencyStore, term: &str) -> Idf {
        if let Some(idf) = self.cache.read().get(term) {
            return *idf;
        }
        let computed = self.compute(store, term);
        // Racing readers may both compute; first insert wins and both values are equal.
        *self.cache.write().entry(term.to_string()).or_insert(computed)
    }

    pub fn cached_len(&self) -> usize { self.cache.read().len() }

    fn compute(&self, store: &TermFrequencyStore, term: &str) -> Idf {
        let doc_freq = store.document_frequency(term);
        if doc_freq == 0 {
            tracing::debug!(term, "term not in corpus");
            return Idf::NotFound;
        }
        let idf = self.formula.compute(store.len(), doc_freq);
        tracing::debug!(term, doc_freq, idf, "computed idf");
        Idf::Value(idf)
    }
}
