use crate::config::AppConfig;
use crate::error::ApiError;
use actix_web::{web, HttpResponse};
use common::model::template::Template;
use std::fs;
use std::path::Path;

pub async fn process(config: web::Data<AppConfig>) -> Result<HttpResponse, ApiError> {
    let templates = load_templates(&config.templates_dir)?;
    Ok(HttpResponse::Ok().json(templates))
}

/// Reads every `*.json` document in the catalog directory, sorted by file
/// name for a stable order. Any storage or parse failure fails the whole
/// request; no partial list is returned.
fn load_templates(dir: &Path) -> Result<Vec<Template>, ApiError> {
    let entries = fs::read_dir(dir)
        .map_err(|e| ApiError::Unknown(format!("failed to read template catalog: {e}")))?;

    let mut paths: Vec<_> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();

    let mut templates = Vec::with_capacity(paths.len());
    for path in paths {
        let data = fs::read_to_string(&path).map_err(|e| {
            ApiError::Unknown(format!("failed to read template {}: {e}", path.display()))
        })?;
        let template: Template = serde_json::from_str(&data).map_err(|e| {
            ApiError::Unknown(format!("failed to parse template {}: {e}", path.display()))
        })?;
        templates.push(template);
    }
    Ok(templates)
}
