//! Thin adapter over the spreadsheet service's REST surface.
//!
//! Every operation is a single synchronous remote call authorized with the
//! session's access token. Nothing is retried; provider failures are
//! reclassified into the [`ApiError`] taxonomy here and nowhere else.

use crate::error::ApiError;
use crate::sheets::row::RowId;
use log::warn;
use serde::Deserialize;
use std::time::Duration;

/// Fixed rectangular span read and appended to. Row count is unbounded; the
/// column span caps the schema at 26 columns.
const READ_RANGE: &str = "A:Z";

#[derive(Clone)]
pub struct SheetsClient {
    base_url: String,
    http: reqwest::Client,
}

#[derive(Deserialize)]
struct ValueRange {
    values: Option<Vec<Vec<String>>>,
}

#[derive(Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Deserialize)]
struct SheetEntry {
    properties: SheetProperties,
}

#[derive(Deserialize)]
struct SheetProperties {
    title: String,
}

impl SheetsClient {
    pub fn new(base_url: String) -> Self {
        let http = match reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
        {
            Ok(client) => client,
            Err(err) => {
                warn!("failed to configure sheets http client, using defaults: {err}");
                reqwest::Client::new()
            }
        };
        SheetsClient {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    fn spreadsheet_url(&self, spreadsheet_id: &str) -> String {
        format!("{}/v4/spreadsheets/{}", self.base_url, spreadsheet_id)
    }

    fn values_url(&self, spreadsheet_id: &str, range: &str) -> String {
        // Ranges may contain a quoted sheet title; spaces are the only
        // characters in them the URL path cannot carry verbatim.
        format!(
            "{}/values/{}",
            self.spreadsheet_url(spreadsheet_id),
            range.replace(' ', "%20")
        )
    }

    /// Checks that the spreadsheet is reachable with the given credential.
    ///
    /// A syntactically impossible id fails with `InvalidArgument` without a
    /// remote call; otherwise a metadata fetch decides: 403 from the provider
    /// means `Forbidden`, 404 means `NotFound`.
    pub async fn validate_access(
        &self,
        access_token: &str,
        spreadsheet_id: &str,
    ) -> Result<(), ApiError> {
        if !is_plausible_id(spreadsheet_id) {
            return Err(ApiError::InvalidArgument(
                "malformed spreadsheet id".to_string(),
            ));
        }
        let url = format!("{}?fields=spreadsheetId", self.spreadsheet_url(spreadsheet_id));
        let resp = self
            .http
            .get(url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| transport("spreadsheet validation", e))?;
        if resp.status().is_success() {
            Ok(())
        } else {
            Err(classify("spreadsheet validation", resp).await)
        }
    }

    /// Fetches the full `A:Z` range as rows of string cells. An empty sheet
    /// yields an empty vector, never an error.
    pub async fn read_all(
        &self,
        access_token: &str,
        spreadsheet_id: &str,
    ) -> Result<Vec<Vec<String>>, ApiError> {
        let url = self.values_url(spreadsheet_id, READ_RANGE);
        let resp = self
            .http
            .get(url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| transport("sheet read", e))?;
        if !resp.status().is_success() {
            return Err(classify("sheet read", resp).await);
        }
        let range: ValueRange = resp
            .json()
            .await
            .map_err(|e| ApiError::Unknown(format!("sheet read returned malformed data: {e}")))?;
        Ok(range.values.unwrap_or_default())
    }

    /// Appends one row after the used range. `USER_ENTERED` semantics: the
    /// provider coerces cells as if typed by a user (dates, numbers).
    /// Returns the provider's raw append result.
    pub async fn append_row(
        &self,
        access_token: &str,
        spreadsheet_id: &str,
        cells: &[String],
    ) -> Result<serde_json::Value, ApiError> {
        let url = format!(
            "{}:append?valueInputOption=USER_ENTERED&insertDataOption=INSERT_ROWS",
            self.values_url(spreadsheet_id, READ_RANGE)
        );
        let resp = self
            .http
            .post(url)
            .bearer_auth(access_token)
            .json(&serde_json::json!({ "values": [cells] }))
            .send()
            .await
            .map_err(|e| transport("row append", e))?;
        if !resp.status().is_success() {
            return Err(classify("row append", resp).await);
        }
        resp.json()
            .await
            .map_err(|e| ApiError::Unknown(format!("row append returned malformed data: {e}")))
    }

    /// Overwrites the full `A:Z` span of one row. Writing past the current
    /// used range silently extends the sheet; the provider is the authority
    /// on bounds.
    pub async fn update_row(
        &self,
        access_token: &str,
        spreadsheet_id: &str,
        row: RowId,
        cells: &[String],
    ) -> Result<serde_json::Value, ApiError> {
        let url = format!(
            "{}?valueInputOption=USER_ENTERED",
            self.values_url(spreadsheet_id, &row_range(row))
        );
        let resp = self
            .http
            .put(url)
            .bearer_auth(access_token)
            .json(&serde_json::json!({ "values": [cells] }))
            .send()
            .await
            .map_err(|e| transport("row update", e))?;
        if !resp.status().is_success() {
            return Err(classify("row update", resp).await);
        }
        resp.json()
            .await
            .map_err(|e| ApiError::Unknown(format!("row update returned malformed data: {e}")))
    }

    /// Structurally deletes one row from the first sheet of the spreadsheet.
    /// No existence check: deleting past the end fails at the provider.
    pub async fn delete_row(
        &self,
        access_token: &str,
        spreadsheet_id: &str,
        row: RowId,
    ) -> Result<(), ApiError> {
        let url = format!("{}:batchUpdate", self.spreadsheet_url(spreadsheet_id));
        // Widened so the exclusive end index exists for every admissible row.
        let start = u64::from(row.grid_index());
        let body = serde_json::json!({
            "requests": [{
                "deleteDimension": {
                    "range": {
                        // 0 is the id of the spreadsheet's first sheet.
                        "sheetId": 0,
                        "dimension": "ROWS",
                        "startIndex": start,
                        "endIndex": start + 1
                    }
                }
            }]
        });
        let resp = self
            .http
            .post(url)
            .bearer_auth(access_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| transport("row delete", e))?;
        if resp.status().is_success() {
            Ok(())
        } else {
            Err(classify("row delete", resp).await)
        }
    }

    /// Overwrites row 1 of the named sheet with literal header cells.
    ///
    /// This is "set", not "merge": an existing header is replaced verbatim.
    /// `RAW` input keeps the provider from interpreting the cells. Fails with
    /// `NotFound` when no sheet carries the given title.
    pub async fn write_header(
        &self,
        access_token: &str,
        spreadsheet_id: &str,
        sheet_title: &str,
        headers: &[String],
    ) -> Result<(), ApiError> {
        let range = header_range(sheet_title, headers.len())?;
        let url = format!("{}?fields=sheets.properties", self.spreadsheet_url(spreadsheet_id));
        let resp = self
            .http
            .get(url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| transport("sheet lookup", e))?;
        if !resp.status().is_success() {
            return Err(classify("sheet lookup", resp).await);
        }
        let meta: SpreadsheetMeta = resp
            .json()
            .await
            .map_err(|e| ApiError::Unknown(format!("sheet lookup returned malformed data: {e}")))?;
        if !meta.sheets.iter().any(|s| s.properties.title == sheet_title) {
            return Err(ApiError::NotFound(format!("sheet '{sheet_title}' not found")));
        }

        let url = format!(
            "{}?valueInputOption=RAW",
            self.values_url(spreadsheet_id, &range)
        );
        let resp = self
            .http
            .put(url)
            .bearer_auth(access_token)
            .json(&serde_json::json!({ "values": [headers] }))
            .send()
            .await
            .map_err(|e| transport("header write", e))?;
        if resp.status().is_success() {
            Ok(())
        } else {
            Err(classify("header write", resp).await)
        }
    }
}

/// A1 span covering the full column range of one row.
fn row_range(row: RowId) -> String {
    let r = row.sheet_row();
    format!("A{r}:Z{r}")
}

/// A1 span for a header of `len` cells in row 1 of the named sheet.
/// The column span matches the header length exactly.
fn header_range(sheet_title: &str, len: usize) -> Result<String, ApiError> {
    if len == 0 {
        return Err(ApiError::InvalidArgument("headers must not be empty".to_string()));
    }
    let last = column_letter(len).ok_or_else(|| {
        ApiError::InvalidArgument("headers exceed the 26-column span".to_string())
    })?;
    Ok(format!("'{sheet_title}'!A1:{last}1"))
}

/// Letter of the `n`-th column (1-based), within the supported A..Z span.
fn column_letter(n: usize) -> Option<char> {
    if (1..=26).contains(&n) {
        Some((b'A' + (n as u8 - 1)) as char)
    } else {
        None
    }
}

/// Spreadsheet ids are opaque but have a known alphabet; anything outside it
/// cannot name a remote resource and is rejected before any network call.
fn is_plausible_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn transport(context: &str, err: reqwest::Error) -> ApiError {
    ApiError::Unknown(format!("{context} failed: {err}"))
}

/// Reclassifies a provider error response into the local taxonomy.
async fn classify(context: &str, resp: reqwest::Response) -> ApiError {
    let status = resp.status();
    let detail = provider_message(resp).await.unwrap_or_else(|| status.to_string());
    match status.as_u16() {
        400 => ApiError::InvalidArgument(format!("{context}: {detail}")),
        403 => ApiError::Forbidden(format!("{context}: access denied ({detail})")),
        404 => ApiError::NotFound(format!("{context}: not found ({detail})")),
        _ => ApiError::Unknown(format!("{context}: {detail}")),
    }
}

/// Provider error bodies look like `{"error": {"message": "..."}}`.
async fn provider_message(resp: reqwest::Response) -> Option<String> {
    let body: serde_json::Value = resp.json().await.ok()?;
    body.get("error")?
        .get("message")?
        .as_str()
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{web, App, HttpResponse, HttpServer};

    fn provider_error(message: &str) -> serde_json::Value {
        serde_json::json!({ "error": { "message": message } })
    }

    async fn stub_meta(path: web::Path<String>) -> HttpResponse {
        match path.as_str() {
            "forbidden-sheet" => HttpResponse::Forbidden()
                .json(provider_error("The caller does not have permission")),
            "missing-sheet" => {
                HttpResponse::NotFound().json(provider_error("Requested entity was not found."))
            }
            _ => HttpResponse::Ok().json(serde_json::json!({
                "sheets": [{ "properties": { "title": "Data" } }]
            })),
        }
    }

    async fn stub_values_get(path: web::Path<(String, String)>) -> HttpResponse {
        let (id, _range) = path.into_inner();
        match id.as_str() {
            "empty-sheet" => HttpResponse::Ok().json(serde_json::json!({})),
            "bad-request" => {
                HttpResponse::BadRequest().json(provider_error("Unable to parse range"))
            }
            _ => HttpResponse::Ok().json(serde_json::json!({
                "values": [["Name", "Email"], ["Alice", "alice@example.com"]]
            })),
        }
    }

    async fn stub_append() -> HttpResponse {
        HttpResponse::Ok().json(serde_json::json!({ "updates": { "updatedRows": 1 } }))
    }

    async fn stub_ok() -> HttpResponse {
        HttpResponse::Ok().json(serde_json::json!({}))
    }

    /// Local stand-in for the spreadsheet service, answering canned bodies
    /// keyed on the spreadsheet id.
    async fn start_stub() -> String {
        let server = HttpServer::new(|| {
            App::new()
                .service(
                    web::resource("/v4/spreadsheets/{id}/values/{range}")
                        .route(web::get().to(stub_values_get))
                        .route(web::put().to(stub_ok))
                        .route(web::post().to(stub_append)),
                )
                .service(
                    web::resource("/v4/spreadsheets/{id}")
                        .route(web::get().to(stub_meta))
                        .route(web::post().to(stub_ok)),
                )
        })
        .workers(1)
        .disable_signals()
        .bind(("127.0.0.1", 0))
        .unwrap();
        let addr = server.addrs()[0];
        actix_web::rt::spawn(server.run());
        format!("http://{addr}")
    }

    #[actix_web::test]
    async fn empty_sheet_reads_as_an_empty_vec() {
        let client = SheetsClient::new(start_stub().await);
        let rows = client.read_all("tok", "empty-sheet").await.unwrap();
        assert!(rows.is_empty());
    }

    #[actix_web::test]
    async fn populated_sheet_reads_its_rows() {
        let client = SheetsClient::new(start_stub().await);
        let rows = client.read_all("tok", "contacts-sheet").await.unwrap();
        assert_eq!(
            rows,
            vec![
                vec!["Name".to_string(), "Email".to_string()],
                vec!["Alice".to_string(), "alice@example.com".to_string()],
            ]
        );
    }

    #[actix_web::test]
    async fn provider_403_classifies_as_forbidden() {
        let client = SheetsClient::new(start_stub().await);
        let err = client.validate_access("tok", "forbidden-sheet").await.unwrap_err();
        assert!(matches!(err, ApiError::Forbidden(_)));
    }

    #[actix_web::test]
    async fn provider_404_classifies_as_not_found() {
        let client = SheetsClient::new(start_stub().await);
        let err = client.validate_access("tok", "missing-sheet").await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[actix_web::test]
    async fn provider_400_classifies_as_invalid_argument() {
        let client = SheetsClient::new(start_stub().await);
        let err = client.read_all("tok", "bad-request").await.unwrap_err();
        match err {
            ApiError::InvalidArgument(detail) => {
                assert!(detail.contains("Unable to parse range"))
            }
            other => panic!("expected InvalidArgument, got {other:?}"),
        }
    }

    #[actix_web::test]
    async fn malformed_id_is_rejected_without_a_remote_call() {
        // Nothing listens here; a remote attempt would fail as Unknown.
        let client = SheetsClient::new("http://127.0.0.1:1".to_string());
        let err = client.validate_access("tok", "has spaces").await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidArgument(_)));
    }

    #[actix_web::test]
    async fn append_passes_through_the_provider_result() {
        let client = SheetsClient::new(start_stub().await);
        let result = client
            .append_row("tok", "contacts-sheet", &["Alice".to_string()])
            .await
            .unwrap();
        assert_eq!(result["updates"]["updatedRows"], 1);
    }

    #[actix_web::test]
    async fn header_write_to_an_unknown_sheet_is_not_found() {
        let client = SheetsClient::new(start_stub().await);
        let headers = vec!["Name".to_string()];
        let err = client
            .write_header("tok", "contacts-sheet", "Other", &headers)
            .await
            .unwrap_err();
        match err {
            ApiError::NotFound(detail) => assert!(detail.contains("Other")),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[actix_web::test]
    async fn header_write_to_a_known_sheet_succeeds() {
        let client = SheetsClient::new(start_stub().await);
        let headers = vec!["Name".to_string(), "Email".to_string()];
        client
            .write_header("tok", "contacts-sheet", "Data", &headers)
            .await
            .unwrap();
    }

    #[actix_web::test]
    async fn delete_accepts_the_highest_row_index() {
        let client = SheetsClient::new(start_stub().await);
        client
            .delete_row("tok", "contacts-sheet", RowId(u32::MAX))
            .await
            .unwrap();
    }

    #[test]
    fn row_range_uses_one_based_sheet_rows() {
        assert_eq!(row_range(RowId(0)), "A1:Z1");
        assert_eq!(row_range(RowId(4)), "A5:Z5");
    }

    #[test]
    fn header_range_matches_header_length() {
        assert_eq!(header_range("Sheet1", 3).unwrap(), "'Sheet1'!A1:C1");
        assert_eq!(header_range("Sheet1", 26).unwrap(), "'Sheet1'!A1:Z1");
    }

    #[test]
    fn header_range_rejects_empty_and_oversized_headers() {
        assert!(matches!(
            header_range("Sheet1", 0),
            Err(ApiError::InvalidArgument(_))
        ));
        assert!(matches!(
            header_range("Sheet1", 27),
            Err(ApiError::InvalidArgument(_))
        ));
    }

    #[test]
    fn column_letters_cover_a_through_z() {
        assert_eq!(column_letter(1), Some('A'));
        assert_eq!(column_letter(26), Some('Z'));
        assert_eq!(column_letter(0), None);
        assert_eq!(column_letter(27), None);
    }

    #[test]
    fn implausible_ids_are_rejected() {
        assert!(is_plausible_id("1BxiMVs0XRA5nFMdKvBdBZjgmUUqptlbs74OgvE2upms"));
        assert!(!is_plausible_id(""));
        assert!(!is_plausible_id("has spaces"));
        assert!(!is_plausible_id("id/with/slash"));
    }
}
