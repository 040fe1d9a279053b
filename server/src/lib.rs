use anyhow::Result;
use axum::{extract::{Path, Query, State}, http::StatusCode, response::{IntoResponse, Response}, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use textscout_core::{AnalyzerConfig, DocId, Document, Operator, SearchEngine};
use tower_http::cors::{Any, CorsLayer, AllowOrigin};
use tower_http::trace::TraceLayer;

#[derive(Deserialize)]
pub struct SearchParams {
    pub title: Option<String>,
    pub desc: Option<String>,
    #[serde(default)]
    pub op: Operator,
}

impl SearchParams {
    /// Non-empty `title` and `desc` joined by a space, or `None` if neither is given.
    pub fn query(&self) -> Option<String> {
        let parts: Vec<&str> = [self.title.as_deref(), self.desc.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect();
        if parts.is_empty() { None } else { Some(parts.join(" ")) }
    }
}

#[derive(Serialize)]
pub struct SearchResponse<'a> {
    pub movies: Vec<&'a Document>,
}

#[derive(Serialize)]
pub struct FrequencyResponse {
    pub word: String,
    pub frequency: u32,
}

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<SearchEngine>,
}

/// Load the snapshot, build the index and wire up the routes.
pub fn build_app(snapshot: &std::path::Path, analyzer: AnalyzerConfig) -> Result<Router> {
    let engine = SearchEngine::open(snapshot, analyzer)?;
    Ok(router(Arc::new(engine)))
}

pub fn router(engine: Arc<SearchEngine>) -> Router {
    let app_state = AppState { engine };

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
        .route("/api/v1/search", get(search_handler))
        .route("/api/v1/docs/:doc_id", get(doc_handler))
        .route("/api/v1/terms/:word", get(frequency_handler))
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

pub async fn search_handler(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Response {
    let Some(query) = params.query() else {
        return (StatusCode::BAD_REQUEST, "At least one query parameter (title or desc) is required").into_response();
    };
    match state.engine.search(&query, params.op) {
        Ok(movies) if movies.is_empty() => (StatusCode::NOT_FOUND, "no records found").into_response(),
        Ok(movies) => Json(SearchResponse { movies }).into_response(),
        Err(e) => {
            tracing::error!(error = %e, query = %query, "search failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
        }
    }
}

pub async fn doc_handler(State(state): State<AppState>, Path(doc_id): Path<DocId>) -> Response {
    match state.engine.store().get(doc_id) {
        Some(doc) => Json(doc).into_response(),
        None => (StatusCode::NOT_FOUND, "not found").into_response(),
    }
}

pub async fn frequency_handler(State(state): State<AppState>, Path(word): Path<String>) -> Json<FrequencyResponse> {
    let frequency = state.engine.word_frequency(&word);
    Json(FrequencyResponse { word, frequency })
}
