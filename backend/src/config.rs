//! Server configuration, read once from the environment at startup.

use std::env;
use std::path::PathBuf;

const DEFAULT_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const DEFAULT_SHEETS_BASE_URL: &str = "https://sheets.googleapis.com";

/// All knobs the server reads from the environment. Cloned into the actix
/// app data; nothing re-reads the environment after startup.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// OAuth client credentials used only for the refresh-token exchange.
    pub client_id: String,
    pub client_secret: String,
    /// Identity provider token endpoint. Overridable so tests can point the
    /// refresh path at a local server.
    pub token_url: String,
    /// Spreadsheet service base URL, same override rationale.
    pub sheets_base_url: String,
    /// Path of the JSON document holding the form registry.
    pub forms_file: PathBuf,
    /// Directory of static template JSON documents.
    pub templates_dir: PathBuf,
    /// Sheet title targeted by header creation when the request names none.
    pub default_sheet_title: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        AppConfig {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            client_id: env::var("GOOGLE_CLIENT_ID").unwrap_or_default(),
            client_secret: env::var("GOOGLE_CLIENT_SECRET").unwrap_or_default(),
            token_url: env::var("TOKEN_URL").unwrap_or_else(|_| DEFAULT_TOKEN_URL.to_string()),
            sheets_base_url: env::var("SHEETS_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_SHEETS_BASE_URL.to_string()),
            forms_file: env::var("FORMS_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/forms.json")),
            templates_dir: env::var("TEMPLATES_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("templates")),
            default_sheet_title: env::var("SHEET_TITLE").unwrap_or_else(|_| "Sheet1".to_string()),
        }
    }
}
