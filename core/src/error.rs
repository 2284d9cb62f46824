use thiserror::Error;

pub type Result<T> = std::result::Result<T, RankError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RankError {
    #[error("query has no terms left after normalization")]
    EmptyQuery,

    #[error("unknown document: {0}")]
    UnknownDocument(String),
}
