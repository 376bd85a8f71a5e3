use actix_web::{web, HttpResponse, Responder};
use crate::core::MatchError;
use crate::models::{ProfileResponse, SetAvailabilityRequest, UpsertProfileRequest};
use crate::routes::matches::{error_response, AppState};
use crate::services::StoreError;

/// Configure profile routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/profiles", web::post().to(create_profile))
        .route("/profiles/{id}", web::get().to(get_profile))
        .route("/profiles/{id}", web::put().to(upsert_profile))
        .route("/profiles/{id}/availability", web::patch().to(set_availability));
}

fn store_failure(action: &str, id: &str, err: StoreError) -> HttpResponse {
    let err = MatchError::from(err);
    let message = if err.is_retryable() {
        tracing::error!("Failed to {} {}: {}", action, id, err);
        "Profile store unavailable, try again".to_string()
    } else {
        tracing::info!("Failed to {} {}: {}", action, id, err);
        err.to_string()
    };
    error_response(&err, &message)
}

/// GET /api/v1/profiles/{id}
async fn get_profile(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();

    match state.store.get_profile(&id).await {
        Ok(profile) => HttpResponse::Ok().json(ProfileResponse { profile }),
        Err(e) => store_failure("fetch profile", &id, e),
    }
}

/// POST /api/v1/profiles
///
/// Registers a new profile under a generated id.
async fn create_profile(
    state: web::Data<AppState>,
    req: web::Json<UpsertProfileRequest>,
) -> impl Responder {
    let id = uuid::Uuid::new_v4().to_string();
    let profile = req.into_inner().into_profile(id.clone());

    match state.store.upsert_profile(profile).await {
        Ok(profile) => {
            tracing::info!("Created profile {}", profile.id);
            HttpResponse::Created().json(ProfileResponse { profile })
        }
        Err(e) => store_failure("create profile", &id, e),
    }
}

/// PUT /api/v1/profiles/{id}
async fn upsert_profile(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<UpsertProfileRequest>,
) -> impl Responder {
    let id = path.into_inner();
    let profile = req.into_inner().into_profile(id.clone());

    match state.store.upsert_profile(profile).await {
        Ok(profile) => HttpResponse::Ok().json(ProfileResponse { profile }),
        Err(e) => store_failure("upsert profile", &id, e),
    }
}

/// PATCH /api/v1/profiles/{id}/availability
///
/// Request body:
/// ```json
/// { "isAvailable": false }
/// ```
async fn set_availability(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<SetAvailabilityRequest>,
) -> impl Responder {
    let id = path.into_inner();

    match state.store.set_availability(&id, req.is_available).await {
        Ok(profile) => {
            tracing::debug!("Profile {} availability set to {}", id, profile.is_available);
            HttpResponse::Ok().json(ProfileResponse { profile })
        }
        Err(e) => store_failure("update availability for", &id, e),
    }
}
