use crate::models::{ErrorResponse, NotificationsQuery, NotificationsResponse};
use crate::routes::matches::{error_response, AppState};
use actix_web::{web, HttpResponse, Responder};
use uuid::Uuid;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/notifications", web::get().to(list))
        .route("/notifications/{id}/read", web::put().to(mark_read))
        .route("/notifications/{id}", web::delete().to(delete));
}

/// List a user's notifications, newest first
///
/// GET /api/v1/notifications?userId={userId}
async fn list(state: web::Data<AppState>, query: web::Query<NotificationsQuery>) -> impl Responder {
    match state.store.notifications_for(query.user_id).await {
        Ok(notifications) => {
            let total = notifications.len();
            HttpResponse::Ok().json(NotificationsResponse {
                notifications,
                total,
            })
        }
        Err(err) => error_response(err.into()),
    }
}

/// Mark a notification as read
///
/// PUT /api/v1/notifications/{id}/read?userId={userId}
async fn mark_read(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    query: web::Query<NotificationsQuery>,
) -> impl Responder {
    match state
        .store
        .mark_notification_read(path.into_inner(), query.user_id)
        .await
    {
        Ok(true) => HttpResponse::Ok().json(serde_json::json!({
            "message": "Notification marked as read",
        })),
        Ok(false) => not_found(),
        Err(err) => error_response(err.into()),
    }
}

/// Delete a notification
///
/// DELETE /api/v1/notifications/{id}?userId={userId}
async fn delete(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    query: web::Query<NotificationsQuery>,
) -> impl Responder {
    match state
        .store
        .delete_notification(path.into_inner(), query.user_id)
        .await
    {
        Ok(true) => HttpResponse::Ok().json(serde_json::json!({
            "message": "Notification deleted successfully",
        })),
        Ok(false) => not_found(),
        Err(err) => error_response(err.into()),
    }
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse {
        error: "notification_not_found".to_string(),
        message: "Notification not found".to_string(),
        status_code: 404,
    })
}
