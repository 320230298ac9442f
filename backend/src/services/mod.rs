pub mod auth;
pub mod forms;
pub mod sheet;
pub mod templates;

use actix_web::HttpResponse;

/// Default handler for known paths hit with an unsupported method.
pub async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed().json(serde_json::json!({ "error": "method not allowed" }))
}

/// Fallback for paths outside the API surface.
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "not found" }))
}
