use crate::config::AppConfig;
use crate::error::ApiError;
use crate::session::state::SessionsState;
use crate::sheets::client::SheetsClient;
use crate::sheets::row::RowId;
use actix_web::{web, HttpRequest, HttpResponse};
use common::requests::{SpreadsheetQuery, UpdateRowRequest};
use log::info;

pub async fn process(
    req: HttpRequest,
    config: web::Data<AppConfig>,
    sessions: web::Data<SessionsState>,
    sheets: web::Data<SheetsClient>,
    query: web::Query<SpreadsheetQuery>,
    payload: web::Json<UpdateRowRequest>,
) -> Result<HttpResponse, ApiError> {
    let token = sessions.authorize(&req, &config).await?;
    let spreadsheet_id = super::require_spreadsheet_id(query.into_inner().spreadsheet_id)?;
    let payload = payload.into_inner();
    let result = sheets
        .update_row(&token, &spreadsheet_id, RowId(payload.row_index), &payload.data)
        .await?;
    info!("row {} updated in {spreadsheet_id}", payload.row_index);
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "row updated",
        "data": result
    })))
}
