use crate::config::AppConfig;
use crate::error::ApiError;
use crate::registry::store::RegistryState;
use crate::session::state::SessionsState;
use actix_web::{web, HttpRequest, HttpResponse};

pub async fn process(
    req: HttpRequest,
    config: web::Data<AppConfig>,
    sessions: web::Data<SessionsState>,
    registry: web::Data<RegistryState>,
    id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    sessions.authorize(&req, &config).await?;
    registry.delete(&id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "form deleted" })))
}
