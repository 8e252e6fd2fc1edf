use crate::core::{CandidateRanker, MatchEngine, MatchError};
use crate::models::{
    DiscoverRequest, DiscoverResponse, ErrorResponse, ExpressInterestRequest, InterestResponse,
    MatchOutcome, MatchesQuery, MatchesResponse, Strength,
};
use crate::services::PostgresStore;
use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub engine: MatchEngine<PostgresStore, PostgresStore>,
    pub ranker: CandidateRanker<PostgresStore>,
    pub store: Arc<PostgresStore>,
    pub max_limit: u16,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/matches/like", web::post().to(like))
        .route("/matches/superlike", web::post().to(superlike))
        .route("/matches", web::get().to(get_matches))
        .route("/matches/discover", web::post().to(discover));
}

/// Map a core failure to its HTTP representation
pub fn error_response(err: MatchError) -> HttpResponse {
    let (status, code) = match &err {
        MatchError::AlreadyMatched => (StatusCode::BAD_REQUEST, "already_matched"),
        MatchError::DuplicateInterest => (StatusCode::BAD_REQUEST, "duplicate_interest"),
        MatchError::SelfInterest => (StatusCode::BAD_REQUEST, "self_interest"),
        MatchError::LocationRequired => (StatusCode::BAD_REQUEST, "location_required"),
        MatchError::PermissionDenied => (StatusCode::FORBIDDEN, "permission_denied"),
        MatchError::TargetNotFound => (StatusCode::NOT_FOUND, "target_not_found"),
        MatchError::ProfileNotFound => (StatusCode::NOT_FOUND, "profile_not_found"),
        MatchError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, "storage_error"),
    };

    if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!("request failed: {}", err);
    }

    HttpResponse::build(status).json(ErrorResponse {
        error: code.to_string(),
        message: err.to_string(),
        status_code: status.as_u16(),
    })
}

fn interest_response(outcome: MatchOutcome) -> HttpResponse {
    match outcome {
        MatchOutcome::Created(Strength::Like) => HttpResponse::Created().json(InterestResponse {
            matched: false,
            message: "Profile liked successfully".to_string(),
        }),
        MatchOutcome::Created(Strength::SuperLike) => {
            HttpResponse::Created().json(InterestResponse {
                matched: false,
                message: "Profile super liked successfully".to_string(),
            })
        }
        MatchOutcome::Matched => HttpResponse::Ok().json(InterestResponse {
            matched: true,
            message: "It's a match!".to_string(),
        }),
    }
}

/// Like a profile
///
/// POST /api/v1/matches/like
///
/// Request body:
/// ```json
/// {
///   "userId": "uuid",
///   "targetUserId": "uuid"
/// }
/// ```
async fn like(
    state: web::Data<AppState>,
    req: web::Json<ExpressInterestRequest>,
) -> impl Responder {
    tracing::info!(actor = %req.user_id, target = %req.target_user_id, "like requested");

    match state
        .engine
        .express_interest(req.user_id, req.target_user_id, Strength::Like)
        .await
    {
        Ok(outcome) => interest_response(outcome),
        Err(err) => error_response(err),
    }
}

/// Super like a profile (premium subscribers only)
///
/// POST /api/v1/matches/superlike
async fn superlike(
    state: web::Data<AppState>,
    req: web::Json<ExpressInterestRequest>,
) -> impl Responder {
    tracing::info!(actor = %req.user_id, target = %req.target_user_id, "superlike requested");

    match state
        .engine
        .express_interest(req.user_id, req.target_user_id, Strength::SuperLike)
        .await
    {
        Ok(outcome) => interest_response(outcome),
        Err(err) => error_response(err),
    }
}

/// List a user's mutual matches
///
/// GET /api/v1/matches?userId={userId}
async fn get_matches(
    state: web::Data<AppState>,
    query: web::Query<MatchesQuery>,
) -> impl Responder {
    match state.engine.matches_for(query.user_id).await {
        Ok(matches) => {
            let total = matches.len();
            HttpResponse::Ok().json(MatchesResponse { matches, total })
        }
        Err(err) => error_response(err),
    }
}

/// Discover ranked candidates for a user
///
/// POST /api/v1/matches/discover
///
/// Request body:
/// ```json
/// {
///   "userId": "uuid",
///   "limit": 20
/// }
/// ```
async fn discover(state: web::Data<AppState>, req: web::Json<DiscoverRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "validation_failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let limit = req.limit.min(state.max_limit) as usize;

    tracing::info!(seeker = %req.user_id, limit, "discovery requested");

    match state.ranker.rank_candidates(req.user_id, limit).await {
        Ok(candidates) => {
            let total = candidates.len();
            HttpResponse::Ok().json(DiscoverResponse { candidates, total })
        }
        Err(err) => error_response(err),
    }
}
