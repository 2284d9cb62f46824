pub mod analyzer;
pub mod config;
pub mod error;
pub mod idf;
pub mod index;
pub mod ingest;
pub mod query;
pub mod store;
pub mod weight;

pub use analyzer::{Analyzer, EnglishAnalyzer};
pub use config::{IdfFormula, ScoringConfig};
pub use error::{RankError, Result};
pub use idf::Idf;
pub use index::{CorpusBuilder, CorpusIndex};
pub use query::{QueryEngine, QueryVector, TopMatch};
pub use store::{Document, TermFrequencyStore};
pub use weight::DocumentVector;
