//! # Spreadsheet Row Endpoints
//!
//! Pass-through row operations against the remote spreadsheet service, each
//! one gated by the session and translated by the gateway client. Row indices
//! in every payload are 0-based positions within the sequence returned by
//! `GET /api/sheet/data` (see `sheets::row::RowId`).
//!
//! ## Registered Routes:
//!
//! *   **`GET /api/sheet/data?spreadsheetId=`** — `data::process`: the full
//!     `A:Z` range as rows of string cells; empty sheet answers `[]`.
//! *   **`POST /api/sheet/add?spreadsheetId=`** — `add::process`: appends the
//!     body (an array of cells) after the used range.
//! *   **`PUT /api/sheet/update?spreadsheetId=`** — `update::process`:
//!     overwrites one full row.
//! *   **`DELETE /api/sheet/delete`** — `delete::process`: structural delete
//!     of one row.
//! *   **`POST /api/sheet/create-header`** — `create_header::process`:
//!     overwrites row 1 of a named sheet with literal header cells.

mod add;
mod create_header;
mod data;
mod delete;
mod update;

use crate::error::ApiError;
use actix_web::web::{delete, get, post, put, resource, route, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/sheet";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .service(
            resource("/data")
                .route(get().to(data::process))
                .default_service(route().to(super::method_not_allowed)),
        )
        .service(
            resource("/add")
                .route(post().to(add::process))
                .default_service(route().to(super::method_not_allowed)),
        )
        .service(
            resource("/update")
                .route(put().to(update::process))
                .default_service(route().to(super::method_not_allowed)),
        )
        .service(
            resource("/delete")
                .route(delete().to(delete::process))
                .default_service(route().to(super::method_not_allowed)),
        )
        .service(
            resource("/create-header")
                .route(post().to(create_header::process))
                .default_service(route().to(super::method_not_allowed)),
        )
}

/// The read/append/update endpoints carry the spreadsheet id in the query
/// string; reject the request before any remote call when it is absent.
pub(crate) fn require_spreadsheet_id(id: Option<String>) -> Result<String, ApiError> {
    id.filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ApiError::InvalidArgument("spreadsheet id is required".to_string()))
}
