use anyhow::Result;
use axum::{extract::{Path, Query, State}, http::StatusCode, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use toprank_core::ingest::load_dir;
use toprank_core::{CorpusBuilder, IdfFormula, QueryEngine, RankError, ScoringConfig};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

const TOP_TERMS: usize = 10;

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub took_s: f64,
    /// `None` (and `score` `None`) when the corpus is empty.
    pub document: Option<String>,
    pub score: Option<f64>,
}

#[derive(Serialize)]
pub struct DocResponse {
    pub name: String,
    pub tokens: usize,
    pub distinct_terms: usize,
    pub top_terms: Vec<TermWeight>,
}

#[derive(Serialize)]
pub struct TermWeight {
    pub term: String,
    pub weight: f64,
}

#[derive(Serialize)]
pub struct StatsResponse {
    pub documents: usize,
    pub vocabulary: usize,
    pub cached_idf_terms: usize,
    pub idf_formula: IdfFormula,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, err: impl ToString) -> ApiError {
    (status, Json(ErrorResponse { error: err.to_string() }))
}

#[derive(Clone)]
pub struct AppState {
    pub engine: QueryEngine,
}

/// Load every file in `corpus_dir` and serve queries over it.
pub fn build_app(corpus_dir: &str, config: ScoringConfig) -> Result<Router> {
    let mut builder = CorpusBuilder::english().with_config(config);
    load_dir(std::path::Path::new(corpus_dir), &mut builder)?;
    let engine = QueryEngine::new(Arc::new(builder.build()));
    Ok(router(engine))
}

pub fn router(engine: QueryEngine) -> Router {
    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/doc/:name", get(doc_handler))
        .route("/stats", get(stats_handler))
        .with_state(AppState { engine })
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let start = std::time::Instant::now();
    let top = match state.engine.rank(&params.q) {
        Ok(top) => top,
        Err(e @ RankError::EmptyQuery) => return Err(api_error(StatusCode::BAD_REQUEST, e)),
        Err(e) => return Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, e)),
    };
    let score = top.is_match().then_some(top.score);
    Ok(Json(SearchResponse {
        query: params.q,
        took_s: start.elapsed().as_secs_f64(),
        document: top.document,
        score,
    }))
}

pub async fn doc_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<DocResponse>, ApiError> {
    let index = state.engine.index();
    let (doc, vector) = index
        .document_with_vector(&name)
        .map_err(|e| api_error(StatusCode::NOT_FOUND, e))?;
    let top_terms = vector
        .top_terms(TOP_TERMS)
        .into_iter()
        .map(|(term, weight)| TermWeight { term: term.to_string(), weight })
        .collect();
    Ok(Json(DocResponse {
        name: doc.name.clone(),
        tokens: doc.tokens.len(),
        distinct_terms: doc.counts.len(),
        top_terms,
    }))
}

pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let index = state.engine.index();
    Json(StatsResponse {
        documents: index.len(),
        vocabulary: index.vocabulary_size(),
        cached_idf_terms: index.cached_idf_terms(),
        idf_formula: index.config().idf_formula,
    })
}
