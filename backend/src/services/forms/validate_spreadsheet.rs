use crate::config::AppConfig;
use crate::error::ApiError;
use crate::session::state::SessionsState;
use crate::sheets::client::SheetsClient;
use actix_web::{web, HttpRequest, HttpResponse};
use common::requests::ValidateSpreadsheetRequest;

/// Reachability check for a spreadsheet id: 403 when the credential cannot
/// read it, 404 when it does not exist, 400 when it is malformed.
pub async fn process(
    req: HttpRequest,
    config: web::Data<AppConfig>,
    sessions: web::Data<SessionsState>,
    sheets: web::Data<SheetsClient>,
    payload: web::Json<ValidateSpreadsheetRequest>,
) -> Result<HttpResponse, ApiError> {
    let token = sessions.authorize(&req, &config).await?;
    let spreadsheet_id = payload
        .into_inner()
        .spreadsheet_id
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ApiError::InvalidArgument("spreadsheet id is required".to_string()))?;
    sheets.validate_access(&token, &spreadsheet_id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "spreadsheet is accessible" })))
}
