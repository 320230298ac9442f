use crate::config::AppConfig;
use crate::error::ApiError;
use crate::session::state::SessionsState;
use crate::sheets::client::SheetsClient;
use actix_web::{web, HttpRequest, HttpResponse};
use common::requests::CreateHeaderRequest;
use log::info;

/// Writes the header row of the named sheet. This is "set", not "merge": an
/// existing header is overwritten verbatim.
pub async fn process(
    req: HttpRequest,
    config: web::Data<AppConfig>,
    sessions: web::Data<SessionsState>,
    sheets: web::Data<SheetsClient>,
    payload: web::Json<CreateHeaderRequest>,
) -> Result<HttpResponse, ApiError> {
    let token = sessions.authorize(&req, &config).await?;
    let payload = payload.into_inner();
    let sheet_title = payload
        .sheet_title
        .unwrap_or_else(|| config.default_sheet_title.clone());
    sheets
        .write_header(&token, &payload.spreadsheet_id, &sheet_title, &payload.headers)
        .await?;
    info!("header written to '{sheet_title}' in {}", payload.spreadsheet_id);
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "header created",
        "headers": payload.headers
    })))
}
