mod config;
mod error;
mod registry;
mod services;
mod session;
mod sheets;

use crate::config::AppConfig;
use crate::registry::store::RegistryState;
use crate::session::state::SessionsState;
use crate::sheets::client::SheetsClient;
use actix_web::{web, App, HttpServer};
use env_logger::Env;
use log::info;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    let config = AppConfig::from_env();

    // Registry is loaded once; all reads are served from memory afterwards.
    let registry = RegistryState::load(&config.forms_file);
    let sessions = SessionsState::new();
    let sheets = SheetsClient::new(config.sheets_base_url.clone());
    let bind_addr = (config.host.clone(), config.port);

    info!("Server running at http://{}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::JsonConfig::default().limit(1024 * 1024)) // 1 MB
            .app_data(web::Data::new(config.clone()))
            .app_data(web::Data::new(registry.clone()))
            .app_data(web::Data::new(sessions.clone()))
            .app_data(web::Data::new(sheets.clone()))
            .service(services::auth::configure_routes())
            .service(services::forms::configure_routes())
            .service(services::sheet::configure_routes())
            .service(services::templates::configure_routes())
            .default_service(web::route().to(services::not_found))
    })
    .bind(bind_addr)?
    .run()
    .await
}
