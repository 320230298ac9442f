use crate::session::state::SessionsState;
use actix_web::{web, HttpResponse, Responder};
use common::requests::{CreateSessionRequest, SessionCreated};

pub async fn process(
    sessions: web::Data<SessionsState>,
    payload: web::Json<CreateSessionRequest>,
) -> impl Responder {
    let payload = payload.into_inner();
    let session_id = sessions
        .sign_in(
            payload.access_token,
            payload.refresh_token,
            payload.expires_at,
        )
        .await;
    HttpResponse::Created().json(SessionCreated { session_id })
}
