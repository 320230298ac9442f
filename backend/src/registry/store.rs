//! The form registry: a JSON-file-backed list of form definitions.
//!
//! The whole document is loaded into memory at startup; reads are served from
//! the in-memory snapshot, and every mutation rewrites the entire file before
//! reporting success. Mutations hold the write lock across both the in-memory
//! edit and the file rewrite, and roll the edit back if the rewrite fails, so
//! concurrent requests cannot lose records and memory never diverges from
//! disk. A second *process* writing the same file remains last-writer-wins.

use crate::error::ApiError;
use chrono::{SecondsFormat, Utc};
use common::model::column::Column;
use common::model::form::Form;
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone)]
pub struct RegistryState {
    forms: Arc<RwLock<Vec<Form>>>,
    path: Arc<PathBuf>,
}

impl RegistryState {
    /// Loads the registry document. A missing file is an empty registry; a
    /// corrupt one is logged and treated as empty rather than refusing to
    /// start, matching the original behavior.
    pub fn load(path: &Path) -> Self {
        let forms = match fs::read_to_string(path) {
            Ok(data) => match serde_json::from_str::<Vec<Form>>(&data) {
                Ok(forms) => {
                    info!("loaded {} form(s) from {}", forms.len(), path.display());
                    forms
                }
                Err(err) => {
                    warn!("registry file {} is unreadable: {err}", path.display());
                    Vec::new()
                }
            },
            Err(_) => {
                info!("registry file {} absent, starting empty", path.display());
                Vec::new()
            }
        };
        RegistryState {
            forms: Arc::new(RwLock::new(forms)),
            path: Arc::new(path.to_path_buf()),
        }
    }

    /// Full snapshot of all forms, insertion order.
    pub async fn list(&self) -> Vec<Form> {
        self.forms.read().await.clone()
    }

    pub async fn get(&self, id: &str) -> Result<Form, ApiError> {
        self.forms
            .read()
            .await
            .iter()
            .find(|f| f.id == id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound("form not found".to_string()))
    }

    /// Appends a new form and persists the full list. The caller has already
    /// validated the spreadsheet is reachable; this only assigns identity and
    /// timestamps.
    pub async fn create(
        &self,
        name: String,
        template_id: String,
        spreadsheet_id: String,
        columns: Vec<Column>,
    ) -> Result<Form, ApiError> {
        let mut forms = self.forms.write().await;

        // Time-derived id; bumped on a same-millisecond collision so ids stay
        // unique and monotonically distinguishable.
        let mut id_ms = Utc::now().timestamp_millis();
        while forms.iter().any(|f| f.id == id_ms.to_string()) {
            id_ms += 1;
        }
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let form = Form {
            id: id_ms.to_string(),
            name,
            template_id,
            spreadsheet_id,
            columns,
            created_at: now.clone(),
            updated_at: now,
        };

        forms.push(form.clone());
        if let Err(err) = persist(&self.path, &forms) {
            forms.pop();
            return Err(err);
        }
        info!("form {} created", form.id);
        Ok(form)
    }

    /// Removes a form by id and persists the new list.
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let mut forms = self.forms.write().await;
        let index = forms
            .iter()
            .position(|f| f.id == id)
            .ok_or_else(|| ApiError::NotFound("form not found".to_string()))?;

        let removed = forms.remove(index);
        if let Err(err) = persist(&self.path, &forms) {
            forms.insert(index, removed);
            return Err(err);
        }
        info!("form {id} deleted");
        Ok(())
    }
}

/// Rewrites the whole registry document, creating the parent directory on
/// first use.
fn persist(path: &Path, forms: &[Form]) -> Result<(), ApiError> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .map_err(|e| ApiError::Unknown(format!("failed to prepare registry dir: {e}")))?;
    }
    let data = serde_json::to_string_pretty(forms)
        .map_err(|e| ApiError::Unknown(format!("failed to encode registry: {e}")))?;
    fs::write(path, data).map_err(|e| ApiError::Unknown(format!("failed to save registry: {e}")))
}
