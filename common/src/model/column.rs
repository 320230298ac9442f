use serde::{Deserialize, Serialize};

/// A single column of a form's schema.
///
/// The `type` field is an open string enum (`text`, `textarea`, `date`,
/// `select`, ...) interpreted by the client; the backend never validates it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: String,
    /// Whether the column is shown on the add-row form.
    pub input: bool,
    /// Declared for the client; mutation logic ignores it.
    pub editable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    /// Enumerated choices for select-like column types.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}
