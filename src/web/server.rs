use axum::{
    extract::{DefaultBodyLimit, State},
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::limit::ConcurrencyLimitLayer;
use tower::ServiceBuilder;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;

use crate::catalog::store::EntryCatalog;
use crate::cli::{load_catalog, ServeArgs};
use crate::core::entry::ExistingEntry;
use crate::core::types::EntryKind;
use crate::matching::engine::{
    DuplicateChecker, MatchError, MatchingConfig, DEFAULT_SIMILARITY_THRESHOLD,
};
use crate::matching::scoring::{compute_similarity, levenshtein_distance, normalize};
use crate::utils::validation::{check_length, MAX_ENTRIES, MAX_INPUT_CHARS};

/// Security configuration constants to prevent `DoS` attacks
pub const MAX_BODY_SIZE: usize = 8 * 1024 * 1024; // 8MB
pub const REQUEST_TIMEOUT_SECS: u64 = 30;
pub const MAX_CONCURRENT_REQUESTS: usize = 100;

/// Shared application state
pub struct AppState {
    pub catalog: EntryCatalog,
}

/// Enhanced error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_type: String,
    pub details: Option<String>,
}

/// Body of `POST /api/duplicates`
#[derive(Debug, Deserialize)]
pub struct DuplicateRequest {
    /// Catalog to check against when `existing` is absent (default: ingredient)
    pub kind: Option<EntryKind>,
    pub name: Option<String>,
    pub code: Option<String>,
    pub threshold: Option<f64>,
    /// Caller-supplied entries; overrides the server catalog
    pub existing: Option<Vec<ExistingEntry>>,
}

/// Body of `POST /api/similarity`
#[derive(Debug, Deserialize)]
pub struct SimilarityRequest {
    pub a: Option<String>,
    pub b: Option<String>,
}

/// Create a safe error response that prevents information disclosure
/// while logging detailed errors server-side for debugging
pub fn create_safe_error_response(
    error_type: &str,
    user_message: &str,
    internal_error: Option<&str>,
) -> ErrorResponse {
    // Log detailed error server-side for debugging (not exposed to client)
    if let Some(internal_msg) = internal_error {
        tracing::error!("Internal error ({}): {}", error_type, internal_msg);
    }

    ErrorResponse {
        error: user_message.to_string(),
        error_type: error_type.to_string(),
        details: None, // Never expose internal details to prevent information disclosure
    }
}

fn match_error_response(err: &MatchError) -> Response {
    let error_type = match err {
        MatchError::InvalidArgument(_) => "invalid_argument",
        MatchError::InputTooLong { .. } => "input_too_long",
        MatchError::InvalidThreshold(_) => "invalid_threshold",
    };

    (
        StatusCode::BAD_REQUEST,
        Json(create_safe_error_response(error_type, &err.to_string(), None)),
    )
        .into_response()
}

/// Run the web server
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded, the tokio runtime cannot
/// be created or the server fails to start.
pub fn run(args: ServeArgs) -> anyhow::Result<()> {
    let catalog = load_catalog(args.catalog.as_deref())?;

    // Build tokio runtime
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move { run_server(args, catalog).await })
}

/// Routes and handlers without the transport middleware
pub fn api_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/catalog", get(catalog_handler))
        .route("/api/duplicates", post(duplicates_handler))
        .route("/api/similarity", post(similarity_handler))
        .with_state(state)
}

/// Create the application router with all routes and middleware configured.
#[allow(clippy::missing_panics_doc)] // Panics only on invalid governor config (constants are valid)
pub fn create_router(catalog: EntryCatalog) -> Router {
    let state = Arc::new(AppState { catalog });

    // Configure IP-based rate limiting
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(10) // 10 requests per second per IP
        .burst_size(50) // Allow bursts of 50 requests
        .finish()
        .unwrap();

    api_router(state).layer(
        ServiceBuilder::new()
            // Security headers for browser protection
            .layer(SetResponseHeaderLayer::if_not_present(
                HeaderName::from_static("x-content-type-options"),
                HeaderValue::from_static("nosniff"),
            ))
            .layer(SetResponseHeaderLayer::if_not_present(
                HeaderName::from_static("x-frame-options"),
                HeaderValue::from_static("DENY"),
            ))
            .layer(SetResponseHeaderLayer::if_not_present(
                HeaderName::from_static("referrer-policy"),
                HeaderValue::from_static("strict-origin-when-cross-origin"),
            ))
            // IP-based rate limiting to prevent abuse
            .layer(GovernorLayer {
                config: Arc::new(governor_conf),
            })
            // Request timeout to prevent slow client attacks
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                Duration::from_secs(REQUEST_TIMEOUT_SECS),
            ))
            // Limit concurrent requests to prevent DOS
            .layer(ConcurrencyLimitLayer::new(MAX_CONCURRENT_REQUESTS))
            .layer(DefaultBodyLimit::max(MAX_BODY_SIZE)),
    )
}

async fn run_server(args: ServeArgs, catalog: EntryCatalog) -> anyhow::Result<()> {
    tracing::info!("Serving catalog with {} entries", catalog.len());
    let app = create_router(catalog);

    let addr = format!("{}:{}", args.address, args.port);
    tracing::info!("Starting catalog-dedup server at http://{addr}");

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Check a candidate against caller-supplied entries or the server catalog
async fn duplicates_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DuplicateRequest>,
) -> Response {
    let start_time = std::time::Instant::now();

    if request
        .existing
        .as_ref()
        .is_some_and(|e| e.len() > MAX_ENTRIES)
    {
        return (
            StatusCode::PAYLOAD_TOO_LARGE,
            Json(create_safe_error_response(
                "too_many_entries",
                "Too many existing entries in request",
                None,
            )),
        )
            .into_response();
    }

    let DuplicateRequest {
        kind,
        name,
        code,
        threshold,
        existing,
    } = request;
    let kind = kind.unwrap_or(EntryKind::Ingredient);
    let threshold = threshold.unwrap_or(DEFAULT_SIMILARITY_THRESHOLD);
    let config = MatchingConfig::default().with_threshold(threshold);

    // The scan is CPU-bound; keep it off the async workers
    let checker = DuplicateChecker::with_config(config.clone());
    let (task_name, task_code) = (name.clone(), code.clone());
    let outcome = tokio::task::spawn_blocking(move || {
        let entries: &[ExistingEntry] = match &existing {
            Some(entries) => entries.as_slice(),
            None => state.catalog.entries(kind),
        };
        checker
            .check(task_name.as_deref(), task_code.as_deref(), entries)
            .map(|results| (results, entries.len()))
    })
    .await;

    let (results, compared_entries) = match outcome {
        Ok(Ok(checked)) => checked,
        Ok(Err(err)) => return match_error_response(&err),
        Err(join_err) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(create_safe_error_response(
                    "internal_error",
                    "Duplicate check failed",
                    Some(&join_err.to_string()),
                )),
            )
                .into_response();
        }
    };

    #[allow(clippy::cast_possible_truncation)] // Processing time won't exceed u64
    let processing_time = start_time.elapsed().as_millis() as u64;

    Json(serde_json::json!({
        "candidate": {
            "name": name,
            "code": code,
            "kind": kind,
        },
        "threshold": threshold,
        "has_duplicates": !results.is_empty(),
        "duplicates": results.iter().map(|r| {
            serde_json::json!({
                "id": r.id,
                "name": r.name,
                "code": r.code,
                "similarity": r.similarity,
                "exact_match": r.exact_match,
                "strength": r.strength(),
            })
        }).collect::<Vec<_>>(),
        "processing_info": {
            "compared_entries": compared_entries,
            "processing_time_ms": processing_time,
            "configuration": config,
        }
    }))
    .into_response()
}

/// Similarity and edit distance between two names
async fn similarity_handler(Json(request): Json<SimilarityRequest>) -> Response {
    let (Some(a), Some(b)) = (request.a.as_deref(), request.b.as_deref()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(create_safe_error_response(
                "invalid_argument",
                "Both 'a' and 'b' are required",
                None,
            )),
        )
            .into_response();
    };

    for (field, value) in [("a", a), ("b", b)] {
        if let Err(err) = check_length(field, value, MAX_INPUT_CHARS) {
            return match_error_response(&MatchError::from(err));
        }
    }

    Json(serde_json::json!({
        "similarity": compute_similarity(a, b),
        "distance": levenshtein_distance(&normalize(a), &normalize(b)),
    }))
    .into_response()
}

/// Return entries in the catalog grouped by kind
async fn catalog_handler(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let mut kinds = serde_json::Map::new();
    for kind in EntryKind::ALL {
        kinds.insert(
            kind.to_string(),
            serde_json::json!({
                "count": state.catalog.count(kind),
                "entries": state.catalog.entries(kind),
            }),
        );
    }

    Json(serde_json::json!({
        "count": state.catalog.len(),
        "kinds": kinds,
    }))
}
