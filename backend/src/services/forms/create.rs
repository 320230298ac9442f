//! Form creation: field validation, spreadsheet reachability check, then
//! append-and-persist through the registry.

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::registry::store::RegistryState;
use crate::session::state::SessionsState;
use crate::sheets::client::SheetsClient;
use actix_web::{web, HttpRequest, HttpResponse};
use common::requests::CreateFormRequest;
use log::warn;

pub async fn process(
    req: HttpRequest,
    config: web::Data<AppConfig>,
    sessions: web::Data<SessionsState>,
    registry: web::Data<RegistryState>,
    sheets: web::Data<SheetsClient>,
    payload: web::Json<CreateFormRequest>,
) -> Result<HttpResponse, ApiError> {
    let token = sessions.authorize(&req, &config).await?;
    let payload = payload.into_inner();

    let name = required(payload.name, "name")?;
    let template_id = required(payload.template_id, "templateId")?;
    let spreadsheet_id = required(payload.spreadsheet_id, "spreadsheetId")?;
    let columns = payload
        .columns
        .ok_or_else(|| missing("columns"))?;

    // Reachability is checked once, at creation time. Access denial is the
    // caller's to resolve; any other rejection means the id does not name a
    // usable spreadsheet.
    if let Err(err) = sheets.validate_access(&token, &spreadsheet_id).await {
        warn!("spreadsheet validation rejected form creation: {err}");
        return Err(match err {
            ApiError::Forbidden(_) | ApiError::Unknown(_) => err,
            _ => ApiError::InvalidArgument("invalid spreadsheet id".to_string()),
        });
    }

    let form = registry
        .create(name, template_id, spreadsheet_id, columns)
        .await?;
    Ok(HttpResponse::Created().json(form))
}

fn required(value: Option<String>, field: &str) -> Result<String, ApiError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| missing(field))
}

fn missing(field: &str) -> ApiError {
    ApiError::InvalidArgument(format!("missing required field: {field}"))
}
