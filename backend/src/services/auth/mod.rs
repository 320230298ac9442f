//! Session endpoints.
//!
//! The OAuth dance itself happens outside this server; the client completes
//! it against the identity provider and hands the resulting credential pair
//! to `POST /api/auth/session`, which answers with the opaque session id used
//! as the bearer token on every data endpoint.

mod sign_in;
mod sign_out;

use actix_web::web::{delete, post, resource, route, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/auth";

pub fn configure_routes() -> Scope {
    scope(API_PATH).service(
        resource("/session")
            .route(post().to(sign_in::process))
            .route(delete().to(sign_out::process))
            .default_service(route().to(super::method_not_allowed)),
    )
}
