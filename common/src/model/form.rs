use crate::model::column::Column;
use serde::{Deserialize, Serialize};

/// A user-defined binding between a column schema and a remote spreadsheet.
///
/// Persisted as one element of the registry's JSON document. Timestamps are
/// ISO-8601 strings; the id is a time-derived opaque string.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Form {
    pub id: String,
    pub name: String,
    pub template_id: String,
    pub spreadsheet_id: String,
    pub columns: Vec<Column>,
    pub created_at: String,
    pub updated_at: String,
}
