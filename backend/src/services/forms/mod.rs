//! # Form Registry Endpoints
//!
//! CRUD over the registry of form definitions, each binding a column schema
//! to a remote spreadsheet. Every route passes the session gate before
//! touching the registry.
//!
//! ## Registered Routes:
//!
//! *   **`GET /api/forms`** — `list::process`: the full registry snapshot,
//!     insertion order.
//! *   **`POST /api/forms`** — `create::process`: validates the payload,
//!     checks the spreadsheet is reachable with the session's credential,
//!     then appends and persists the new form. Answers `201` with the record.
//! *   **`GET /api/forms/{id}`** — `get::process`: one form, or `404`.
//! *   **`DELETE /api/forms/{id}`** — `delete::process`: removes and
//!     persists, or `404`.
//! *   **`POST /api/forms/validate-spreadsheet`** — `validate_spreadsheet::process`:
//!     reachability check for a spreadsheet id without creating anything.

mod create;
mod delete;
mod get;
mod list;
mod validate_spreadsheet;

use actix_web::web::{delete, get, post, resource, route, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/forms";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .service(
            resource("")
                .route(get().to(list::process))
                .route(post().to(create::process))
                .default_service(route().to(super::method_not_allowed)),
        )
        .service(
            resource("/validate-spreadsheet")
                .route(post().to(validate_spreadsheet::process))
                .default_service(route().to(super::method_not_allowed)),
        )
        .service(
            resource("/{id}")
                .route(get().to(get::process))
                .route(delete().to(delete::process))
                .default_service(route().to(super::method_not_allowed)),
        )
}

#[cfg(test)]
mod tests {
    use crate::config::AppConfig;
    use crate::registry::store::RegistryState;
    use crate::session::state::SessionsState;
    use crate::sheets::client::SheetsClient;
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App};
    use common::model::form::Form;
    use tempfile::TempDir;

    fn test_config(dir: &TempDir) -> AppConfig {
        AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            client_id: "client".to_string(),
            client_secret: "secret".to_string(),
            token_url: "http://127.0.0.1:1/token".to_string(),
            sheets_base_url: "http://127.0.0.1:1".to_string(),
            forms_file: dir.path().join("forms.json"),
            templates_dir: dir.path().join("templates"),
            default_sheet_title: "Sheet1".to_string(),
        }
    }

    async fn signed_in(sessions: &SessionsState) -> String {
        let future = chrono::Utc::now().timestamp() + 3600;
        sessions
            .sign_in("tok".to_string(), "refresh".to_string(), future)
            .await
    }

    macro_rules! test_app {
        ($config:expr, $registry:expr, $sessions:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($config.clone()))
                    .app_data(web::Data::new($registry.clone()))
                    .app_data(web::Data::new($sessions.clone()))
                    .app_data(web::Data::new(SheetsClient::new(
                        $config.sheets_base_url.clone(),
                    )))
                    .service(super::configure_routes()),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn list_without_session_is_unauthorized() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);
        let registry = RegistryState::load(&config.forms_file);
        let sessions = SessionsState::new();
        let app = test_app!(config, registry, sessions);

        let resp = test::call_service(&app, test::TestRequest::get().uri("/api/forms").to_request())
            .await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn create_with_missing_field_is_bad_request() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);
        let registry = RegistryState::load(&config.forms_file);
        let sessions = SessionsState::new();
        let session_id = signed_in(&sessions).await;
        let app = test_app!(config, registry, sessions);

        let req = test::TestRequest::post()
            .uri("/api/forms")
            .insert_header(("Authorization", format!("Bearer {session_id}")))
            .set_json(serde_json::json!({
                "name": "Contacts",
                "templateId": "contact",
                // spreadsheetId missing
                "columns": []
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn get_and_delete_round_trip() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);
        let registry = RegistryState::load(&config.forms_file);
        let sessions = SessionsState::new();
        let session_id = signed_in(&sessions).await;
        let created = registry
            .create(
                "Contacts".to_string(),
                "contact".to_string(),
                "sheet-abc".to_string(),
                Vec::new(),
            )
            .await
            .unwrap();
        let app = test_app!(config, registry, sessions);

        let req = test::TestRequest::get()
            .uri(&format!("/api/forms/{}", created.id))
            .insert_header(("Authorization", format!("Bearer {session_id}")))
            .to_request();
        let fetched: Form = test::call_and_read_body_json(&app, req).await;
        assert_eq!(fetched, created);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/forms/{}", created.id))
            .insert_header(("Authorization", format!("Bearer {session_id}")))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::get()
            .uri(&format!("/api/forms/{}", created.id))
            .insert_header(("Authorization", format!("Bearer {session_id}")))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn wrong_method_is_method_not_allowed() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);
        let registry = RegistryState::load(&config.forms_file);
        let sessions = SessionsState::new();
        let app = test_app!(config, registry, sessions);

        let req = test::TestRequest::put().uri("/api/forms").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
