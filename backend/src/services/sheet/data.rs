use crate::config::AppConfig;
use crate::error::ApiError;
use crate::session::state::SessionsState;
use crate::sheets::client::SheetsClient;
use actix_web::{web, HttpRequest, HttpResponse};
use common::requests::SpreadsheetQuery;

pub async fn process(
    req: HttpRequest,
    config: web::Data<AppConfig>,
    sessions: web::Data<SessionsState>,
    sheets: web::Data<SheetsClient>,
    query: web::Query<SpreadsheetQuery>,
) -> Result<HttpResponse, ApiError> {
    let token = sessions.authorize(&req, &config).await?;
    let spreadsheet_id = super::require_spreadsheet_id(query.into_inner().spreadsheet_id)?;
    let rows = sheets.read_all(&token, &spreadsheet_id).await?;
    Ok(HttpResponse::Ok().json(rows))
}
