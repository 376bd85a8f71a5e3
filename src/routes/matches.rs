use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use validator::Validate;
use crate::core::{MatchError, Matcher};
use crate::models::{ErrorResponse, FindMatchesRequest, FindMatchesResponse, HealthResponse};
use crate::services::ProfileStore;
use std::sync::Arc;

/// Shown to users whenever matching fails; detail stays in the logs
pub const NO_MATCHES_MESSAGE: &str = "No matches available, try again";

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ProfileStore>,
    pub matcher: Matcher,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matches/find", web::post().to(find_matches))
        .route("/matches/{user_id}", web::get().to(refresh_matches));
}

/// Map an engine error to a response, keeping NotFound / invalid data /
/// transient store failure distinguishable for the client. Store failures
/// that a retry will not fix (undecodable reply, migration) are 502.
pub fn error_response(err: &MatchError, message: &str) -> HttpResponse {
    let (status, error) = match err {
        MatchError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
        MatchError::InvalidProfile { .. } => (StatusCode::UNPROCESSABLE_ENTITY, "invalid_profile"),
        MatchError::Store(_) if err.is_retryable() => (StatusCode::SERVICE_UNAVAILABLE, "store_unavailable"),
        MatchError::Store(_) => (StatusCode::BAD_GATEWAY, "store_error"),
    };

    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message: message.to_string(),
        status_code: status.as_u16(),
        retryable: err.is_retryable(),
    })
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let store_healthy = match state.store.health_check().await {
        Ok(healthy) => healthy,
        Err(e) => {
            tracing::warn!("Profile store health check failed: {}", e);
            false
        }
    };

    let status = if store_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Find matches endpoint
///
/// POST /api/v1/matches/find
///
/// Request body:
/// ```json
/// { "userId": "string" }
/// ```
async fn find_matches(
    state: web::Data<AppState>,
    req: web::Json<FindMatchesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for find_matches request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
            retryable: false,
        });
    }

    run_matching(&state, &req.user_id).await
}

/// Refresh endpoint: re-fetch the pool and re-run the pipeline
///
/// GET /api/v1/matches/{userId}
async fn refresh_matches(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    run_matching(&state, &path.into_inner()).await
}

async fn run_matching(state: &AppState, user_id: &str) -> HttpResponse {
    tracing::info!("Finding matches for user: {}", user_id);

    match state.matcher.compute_matches(state.store.as_ref(), user_id).await {
        Ok(outcome) => {
            let response = FindMatchesResponse {
                total_results: outcome.matches.len(),
                total_candidates: outcome.total_candidates,
                matches: outcome.matches,
            };

            tracing::info!(
                "Returning {} matches for user {} (from {} candidates)",
                response.total_results,
                user_id,
                response.total_candidates
            );

            HttpResponse::Ok().json(response)
        }
        Err(e) => {
            match &e {
                MatchError::Store(_) => tracing::error!("Matching failed for {}: {}", user_id, e),
                _ => tracing::warn!("Matching failed for {}: {}", user_id, e),
            }
            error_response(&e, NO_MATCHES_MESSAGE)
        }
    }
}
