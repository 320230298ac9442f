use crate::model::column::Column;
use serde::{Deserialize, Serialize};

/// Payload for registering a session from an already-completed sign-in.
/// `expires_at` is the provider's epoch-seconds expiry for the access token.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: i64,
}

/// Payload for creating a form. All four fields are required; they are
/// optional here so the handler can report which one is missing instead of
/// failing deserialization.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFormRequest {
    pub name: Option<String>,
    pub template_id: Option<String>,
    pub spreadsheet_id: Option<String>,
    pub columns: Option<Vec<Column>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateSpreadsheetRequest {
    pub spreadsheet_id: Option<String>,
}

/// Row update payload. `row_index` is the 0-based position of the row within
/// the sequence returned by the read endpoint.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRowRequest {
    pub row_index: u32,
    pub data: Vec<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteRowRequest {
    pub spreadsheet_id: String,
    pub row_index: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHeaderRequest {
    pub spreadsheet_id: String,
    /// Title of the sheet whose first row receives the header. Falls back to
    /// the server's configured default when absent.
    pub sheet_title: Option<String>,
    pub headers: Vec<String>,
}

/// Query string shared by the sheet read/append/update endpoints.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpreadsheetQuery {
    pub spreadsheet_id: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionCreated {
    pub session_id: String,
}
