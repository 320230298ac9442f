//! # Template Catalog Endpoints
//!
//! Read-only enumeration of the predefined column schemas used to seed new
//! forms. The catalog is a directory of static JSON documents, one per
//! template, read fully on each request; there are no mutation operations.

mod list;

use actix_web::web::{get, resource, route, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/templates";

pub fn configure_routes() -> Scope {
    scope(API_PATH).service(
        resource("")
            .route(get().to(list::process))
            .default_service(route().to(super::method_not_allowed)),
    )
}
