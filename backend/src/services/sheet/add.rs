use crate::config::AppConfig;
use crate::error::ApiError;
use crate::session::state::SessionsState;
use crate::sheets::client::SheetsClient;
use actix_web::{web, HttpRequest, HttpResponse};
use common::requests::SpreadsheetQuery;
use log::info;

pub async fn process(
    req: HttpRequest,
    config: web::Data<AppConfig>,
    sessions: web::Data<SessionsState>,
    sheets: web::Data<SheetsClient>,
    query: web::Query<SpreadsheetQuery>,
    cells: web::Json<Vec<String>>,
) -> Result<HttpResponse, ApiError> {
    let token = sessions.authorize(&req, &config).await?;
    let spreadsheet_id = super::require_spreadsheet_id(query.into_inner().spreadsheet_id)?;
    let result = sheets.append_row(&token, &spreadsheet_id, &cells).await?;
    info!("row appended to {spreadsheet_id}");
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "row added",
        "data": result
    })))
}
