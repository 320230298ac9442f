//! Session storage and the bearer-token gate in front of every data endpoint.
//!
//! A session carries the access/refresh credential pair obtained at sign-in.
//! Before each use the gate checks the stored expiry; an expired access token
//! is exchanged for a fresh one at the identity provider's token endpoint.
//! Refresh is single-flight per session: the first request to observe the
//! expiry claims the refresh by marking the session [`SessionStatus::Refreshing`]
//! and performs the token call with no map lock held, while concurrent
//! requests for the same session poll until the claim resolves. Requests for
//! other sessions are never blocked by an in-flight refresh.
//!
//! A failed refresh does not evict the session; it marks it
//! [`SessionStatus::Failed`] so every later request answers 401 until the
//! client signs in again. No retry, no backoff.

use crate::config::AppConfig;
use crate::error::ApiError;
use actix_web::http::header;
use actix_web::HttpRequest;
use chrono::Utc;
use log::{info, warn};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use uuid::Uuid;

/// How long waiters sleep between polls of an in-flight refresh.
const REFRESH_POLL: Duration = Duration::from_millis(25);

/// A `Refreshing` mark older than this is considered abandoned (the claiming
/// request was cancelled mid-exchange) and may be reclaimed. Longer than the
/// token client's 10 s transport timeout, so a live refresh is never stolen.
const REFRESH_STALE_MS: i64 = 15_000;

/// Credential lifecycle. `Valid` covers both fresh and expiring credentials:
/// whether the access token is still usable is derived from the stored
/// expiry timestamp, not a separate state. `Refreshing` marks a claimed,
/// in-flight token exchange; `Failed` is permanent until re-authentication.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SessionStatus {
    Valid,
    Refreshing,
    Failed,
}

#[derive(Clone, Debug)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    /// Epoch milliseconds at which the access token stops being usable.
    pub expires_at_ms: i64,
    pub status: SessionStatus,
    /// Epoch milliseconds at which the current refresh claim was taken.
    /// Meaningful only while `status` is `Refreshing`.
    refresh_started_ms: i64,
}

/// Outcome of one look at the session under the map lock.
enum Claim {
    /// The credential is usable as-is.
    Token(String),
    /// This request claimed the refresh and must perform the exchange.
    Refresh(String),
    /// Another request's refresh is in flight; poll again shortly.
    InFlight,
}

/// Successful token-endpoint response.
#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

/// Thread-safe session store shared across the actix application.
#[derive(Clone)]
pub struct SessionsState {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
    http: reqwest::Client,
}

impl SessionsState {
    pub fn new() -> Self {
        let http = match reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
        {
            Ok(client) => client,
            Err(err) => {
                warn!("failed to configure token http client, using defaults: {err}");
                reqwest::Client::new()
            }
        };
        SessionsState {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            http,
        }
    }

    /// Registers a credential pair obtained from the identity provider and
    /// returns the opaque session id the client presents as a bearer token.
    /// `expires_at` is the provider's epoch-seconds expiry.
    pub async fn sign_in(
        &self,
        access_token: String,
        refresh_token: String,
        expires_at: i64,
    ) -> String {
        let id = Uuid::new_v4().to_string();
        let session = Session {
            access_token,
            refresh_token,
            expires_at_ms: expires_at * 1000,
            status: SessionStatus::Valid,
            refresh_started_ms: 0,
        };
        self.sessions.write().await.insert(id.clone(), session);
        info!("session registered");
        id
    }

    /// Discards the session named by the request's bearer token, if any.
    pub async fn sign_out(&self, req: &HttpRequest) -> Result<bool, ApiError> {
        let id = bearer_token(req)?;
        Ok(self.sessions.write().await.remove(id).is_some())
    }

    /// The gate: resolves the request's bearer token to a usable access
    /// token, refreshing it first when expired. Every failure is
    /// `Unauthenticated`.
    pub async fn authorize(
        &self,
        req: &HttpRequest,
        config: &AppConfig,
    ) -> Result<String, ApiError> {
        let id = bearer_token(req)?.to_string();
        loop {
            match self.claim(&id).await? {
                Claim::Token(token) => return Ok(token),
                Claim::InFlight => tokio::time::sleep(REFRESH_POLL).await,
                Claim::Refresh(refresh_token) => {
                    // The exchange runs with no map lock held; only this
                    // session is marked Refreshing meanwhile.
                    let result = self.refresh(config, &refresh_token).await;
                    return self.commit_refresh(&id, result).await;
                }
            }
        }
    }

    /// Decides, under the map lock, whether the caller can use the stored
    /// token, must wait for an in-flight refresh, or has claimed the refresh
    /// itself. The write lock is never held across an await.
    async fn claim(&self, id: &str) -> Result<Claim, ApiError> {
        {
            let sessions = self.sessions.read().await;
            let session = sessions.get(id).ok_or_else(no_session)?;
            match session.status {
                SessionStatus::Failed => return Err(refresh_failed()),
                SessionStatus::Refreshing
                    if now_ms() - session.refresh_started_ms < REFRESH_STALE_MS =>
                {
                    return Ok(Claim::InFlight)
                }
                SessionStatus::Valid if now_ms() < session.expires_at_ms => {
                    return Ok(Claim::Token(session.access_token.clone()))
                }
                _ => {}
            }
        }

        // Expired (or a stale claim). Re-check under the write lock: another
        // request may have claimed or finished the refresh while we waited.
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(id).ok_or_else(no_session)?;
        match session.status {
            SessionStatus::Failed => Err(refresh_failed()),
            SessionStatus::Refreshing
                if now_ms() - session.refresh_started_ms < REFRESH_STALE_MS =>
            {
                Ok(Claim::InFlight)
            }
            SessionStatus::Valid if now_ms() < session.expires_at_ms => {
                Ok(Claim::Token(session.access_token.clone()))
            }
            _ => {
                session.status = SessionStatus::Refreshing;
                session.refresh_started_ms = now_ms();
                Ok(Claim::Refresh(session.refresh_token.clone()))
            }
        }
    }

    /// Records the outcome of a claimed refresh and answers for the claiming
    /// request. Waiters observe the new status on their next poll.
    async fn commit_refresh(
        &self,
        id: &str,
        result: Result<TokenResponse, String>,
    ) -> Result<String, ApiError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(id).ok_or_else(no_session)?;
        match result {
            Ok(token) => {
                session.access_token = token.access_token;
                session.expires_at_ms = now_ms() + token.expires_in * 1000;
                session.status = SessionStatus::Valid;
                info!("access token refreshed");
                Ok(session.access_token.clone())
            }
            Err(detail) => {
                warn!("token refresh failed: {detail}");
                session.status = SessionStatus::Failed;
                Err(refresh_failed())
            }
        }
    }

    /// One form-encoded POST to the token endpoint. Any failure, transport or
    /// provider-side, is reported as a plain message for the caller to log.
    async fn refresh(
        &self,
        config: &AppConfig,
        refresh_token: &str,
    ) -> Result<TokenResponse, String> {
        let params = [
            ("client_id", config.client_id.as_str()),
            ("client_secret", config.client_secret.as_str()),
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ];
        let resp = self
            .http
            .post(&config.token_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.status().is_success() {
            return Err(format!("token endpoint answered {}", resp.status()));
        }
        resp.json::<TokenResponse>().await.map_err(|e| e.to_string())
    }

    #[cfg(test)]
    pub async fn status_of(&self, id: &str) -> Option<SessionStatus> {
        self.sessions.read().await.get(id).map(|s| s.status)
    }
}

fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

fn no_session() -> ApiError {
    ApiError::Unauthenticated("no active session".to_string())
}

/// The marker the original flow surfaced instead of raising: callers see it
/// on every request until the user re-authenticates.
fn refresh_failed() -> ApiError {
    ApiError::Unauthenticated("RefreshAccessTokenError".to_string())
}

fn bearer_token(req: &HttpRequest) -> Result<&str, ApiError> {
    let header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Unauthenticated("authentication required".to_string()))?;
    header
        .strip_prefix("Bearer ")
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::Unauthenticated("authentication required".to_string()))
}
