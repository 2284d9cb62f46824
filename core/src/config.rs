//! Scoring configuration and constants.

use serde::{Deserialize, Serialize};

/// Numeric sentinel for a term that appears in no document.
pub const IDF_NOT_FOUND: f64 = -1.0;

/// Tolerance used when comparing normalized weights.
pub const WEIGHT_EPSILON: f64 = 1e-9;

/// How inverse document frequency is derived from `N` documents and a document frequency `df`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdfFormula {
    /// `log10(N / df)`. Terms present in every document get 0.
    #[default]
    Standard,
    /// `log10(1 + N / df)`. Never 0, so single-document corpora still score.
    Smoothed,
}

impl IdfFormula {
    pub fn compute(self, total_docs: usize, doc_freq: usize) -> f64 {
        let ratio = total_docs as f64 / doc_freq as f64;
        match self {
            IdfFormula::Standard => ratio.log10(),
            IdfFormula::Smoothed => (1.0 + ratio).log10(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default)]
    pub idf_formula: IdfFormula,
}

impl ScoringConfig {
    pub fn smoothed() -> Self {
        Self { idf_formula: IdfFormula::Smoothed }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_is_zero_when_term_everywhere() {
        assert_eq!(IdfFormula::Standard.compute(4, 4), 0.0);
    }

    #[test]
    fn smoothed_is_positive_when_term_everywhere() {
        let v = IdfFormula::Smoothed.compute(1, 1);
        assert!((v - 2f64.log10()).abs() < WEIGHT_EPSILON);
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let cfg: ScoringConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.idf_formula, IdfFormula::Standard);
        let cfg: ScoringConfig = serde_json::from_str(r#"{"idf_formula":"smoothed"}"#).unwrap();
        assert_eq!(cfg, ScoringConfig::smoothed());
    }
}
