use crate::error::ApiError;
use crate::session::state::SessionsState;
use actix_web::{web, HttpRequest, HttpResponse};

/// Idempotent: discarding an already-discarded session is still a success.
pub async fn process(
    req: HttpRequest,
    sessions: web::Data<SessionsState>,
) -> Result<HttpResponse, ApiError> {
    sessions.sign_out(&req).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "signed out" })))
}
