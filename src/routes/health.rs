use actix_web::{get, HttpResponse, Responder};
use serde_json::json;

/// Liveness probe. Unauthenticated, registered outside the `/api` guard.
#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "ok"
    }))
}
