//! HTTP front end
//!
//! `POST /api/search` takes `{"query": "...", "limit": n}` and answers with a
//! [`SearchOutcome`]. Blank or malformed requests get a 400; corpus failures
//! get a 500 with the cause logged, never echoed. A panicking handler also
//! ends in a 500.

use anyhow::Result;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::sync::Arc;
use tokio::task::JoinError;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};

use crate::cache::CorpusStore;
use crate::config::Config;
use crate::corpus::{Corpus, CorpusError, JsonFileSource};
use crate::query::{Query, QueryError};
use crate::rank::{Ranker, SearchOutcome};
use crate::watch::CorpusWatcher;

/// Shared state behind every request
#[derive(Clone)]
pub struct AppState {
    store: Arc<CorpusStore>,
    ranker: Arc<Ranker>,
    default_limit: NonZeroUsize,
}

impl AppState {
    pub fn new(store: Arc<CorpusStore>, ranker: Ranker, default_limit: NonZeroUsize) -> Self {
        Self {
            store,
            ranker: Arc::new(ranker),
            default_limit,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: Option<String>,
    pub limit: Option<NonZeroUsize>,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct HealthBody {
    pub status: &'static str,
    pub entries: usize,
}

/// Failures a request can end in
#[derive(Debug)]
pub enum ApiError {
    BadRequest(QueryError),
    Internal(CorpusError),
    Task(JoinError),
}

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        Self::BadRequest(err)
    }
}

impl From<CorpusError> for ApiError {
    fn from(err: CorpusError) -> Self {
        Self::Internal(err)
    }
}

impl From<JoinError> for ApiError {
    fn from(err: JoinError) -> Self {
        Self::Task(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            ApiError::Internal(err) => {
                error!("Search API error: {}", err);
                internal_error()
            }
            ApiError::Task(err) => {
                error!("Corpus load task failed: {}", err);
                internal_error()
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

fn internal_error() -> (StatusCode, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error".to_string(),
    )
}

/// Current corpus snapshot, read off the async workers
///
/// A cache miss, or any call with caching off, reads the corpus file.
async fn load_snapshot(store: &Arc<CorpusStore>) -> Result<Arc<Corpus>, ApiError> {
    let store = store.clone();
    let corpus = tokio::task::spawn_blocking(move || store.snapshot()).await??;
    Ok(corpus)
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/search", post(handle_search))
        .route("/health", get(handle_health))
        .layer(CatchPanicLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn handle_search(
    State(state): State<AppState>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchOutcome>, ApiError> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            debug!("Rejected search body: {}", rejection);
            return Err(QueryError::Empty.into());
        }
    };

    let query = Query::parse(request.query.as_deref().unwrap_or_default())?;
    let limit = request.limit.unwrap_or(state.default_limit);

    let corpus = load_snapshot(&state.store).await?;
    let outcome = state.ranker.rank(&corpus, query.as_str(), limit);

    debug!("Query {:?} returned {} results", query.as_str(), outcome.results.len());

    Ok(Json(outcome))
}

async fn handle_health(State(state): State<AppState>) -> Result<Json<HealthBody>, ApiError> {
    let corpus = load_snapshot(&state.store).await?;

    Ok(Json(HealthBody {
        status: "ok",
        entries: corpus.len(),
    }))
}

/// Run the HTTP server until Ctrl+C
pub async fn serve(config: Config) -> Result<()> {
    let source = JsonFileSource::new(&config.corpus_path);
    let store = Arc::new(CorpusStore::new(source).caching(config.server.cache_corpus));

    // Fail at startup rather than on the first request
    let corpus = store.snapshot()?;
    info!(
        "Loaded {} entries from {}",
        corpus.len(),
        config.corpus_path.display()
    );

    let _watcher = if config.server.watch {
        if config.server.cache_corpus {
            Some(CorpusWatcher::spawn(&config.corpus_path, store.clone())?)
        } else {
            warn!("Ignoring watch: corpus caching is off, so the file is read per request");
            None
        }
    } else {
        None
    };

    let state = AppState::new(store, config.search.ranker(), config.search.limit);
    let app = router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("HTTP server listening on {}", listener.local_addr()?);
    info!("Press Ctrl+C to shutdown");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
}
