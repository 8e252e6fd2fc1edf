use crate::core::distance::haversine_distance;
use crate::core::{MatchError, ProfileStore};
use crate::models::{ErrorResponse, NearbyQuery, Profile};
use crate::routes::matches::{error_response, AppState};
use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use validator::Validate;

/// Default search radius for the raw nearby listing, in kilometers
const DEFAULT_NEARBY_RADIUS_KM: f64 = 50.0;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/profiles/nearby", web::get().to(nearby));
}

#[derive(Debug, Clone, Serialize)]
struct NearbyProfile {
    #[serde(flatten)]
    profile: Profile,
    #[serde(rename = "distanceKm")]
    distance_km: f64,
}

/// Raw nearby profiles within a radius, unranked
///
/// GET /api/v1/profiles/nearby?userId={userId}&radiusKm={radiusKm}
async fn nearby(state: web::Data<AppState>, query: web::Query<NearbyQuery>) -> impl Responder {
    if let Err(errors) = query.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "validation_failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let radius_km = query.radius_km.unwrap_or(DEFAULT_NEARBY_RADIUS_KM);

    let profile = match state.store.find_profile(query.user_id).await {
        Ok(Some(profile)) => profile,
        Ok(None) => return error_response(MatchError::ProfileNotFound),
        Err(err) => return error_response(err.into()),
    };

    let Some(origin) = profile.location else {
        return error_response(MatchError::LocationRequired);
    };

    let candidates = match state
        .store
        .query_nearby(origin.latitude, origin.longitude, radius_km)
        .await
    {
        Ok(candidates) => candidates,
        Err(err) => return error_response(err.into()),
    };

    // The bounding-box query overshoots; re-check the exact distance
    let nearby: Vec<NearbyProfile> = candidates
        .into_iter()
        .filter(|candidate| candidate.user_id != query.user_id)
        .filter_map(|candidate| {
            let position = candidate.location?;
            let distance_km = haversine_distance(
                origin.latitude,
                origin.longitude,
                position.latitude,
                position.longitude,
            );
            (distance_km <= radius_km).then_some(NearbyProfile {
                profile: candidate,
                distance_km,
            })
        })
        .collect();

    HttpResponse::Ok().json(nearby)
}
