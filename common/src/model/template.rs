use crate::model::column::Column;
use serde::{Deserialize, Serialize};

/// Layout hints consumed only by the UI when rendering a form built from a
/// template.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewHints {
    pub layout: String,
    pub searchable: bool,
    pub filterable: bool,
}

/// A predefined, read-only column schema used to seed a new form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub name: String,
    pub description: String,
    pub columns: Vec<Column>,
    pub view: ViewHints,
}
