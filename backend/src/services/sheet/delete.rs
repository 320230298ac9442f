use crate::config::AppConfig;
use crate::error::ApiError;
use crate::session::state::SessionsState;
use crate::sheets::client::SheetsClient;
use crate::sheets::row::RowId;
use actix_web::{web, HttpRequest, HttpResponse};
use common::requests::DeleteRowRequest;
use log::info;

pub async fn process(
    req: HttpRequest,
    config: web::Data<AppConfig>,
    sessions: web::Data<SessionsState>,
    sheets: web::Data<SheetsClient>,
    payload: web::Json<DeleteRowRequest>,
) -> Result<HttpResponse, ApiError> {
    let token = sessions.authorize(&req, &config).await?;
    let payload = payload.into_inner();
    sheets
        .delete_row(&token, &payload.spreadsheet_id, RowId(payload.row_index))
        .await?;
    info!("row {} deleted from {}", payload.row_index, payload.spreadsheet_id);
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "row deleted" })))
}
