// Route exports
pub mod matches;
pub mod notifications;
pub mod profiles;

use crate::models::HealthResponse;
use actix_web::{web, HttpResponse, Responder};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .route("/health", web::get().to(health_check))
            .configure(matches::configure)
            .configure(profiles::configure)
            .configure(notifications::configure),
    );
}

/// Health check endpoint
async fn health_check(state: web::Data<matches::AppState>) -> impl Responder {
    let db_healthy = state.store.health_check().await.unwrap_or(false);

    let status = if db_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}
