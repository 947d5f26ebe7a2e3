//! services/api/src/web/middleware.rs
//!
//! Authentication middleware for protecting routes.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use handspeak_core::ports::PortError;
use std::sync::Arc;
use tracing::{debug, error};

use crate::web::{auth::session_id_from_headers, state::AppState};

fn unauthorized() -> (StatusCode, String) {
    (StatusCode::UNAUTHORIZED, "Unauthorized".to_string())
}

/// Middleware that validates the auth session cookie and extracts the user id.
///
/// If valid, inserts the user id (`i64`) into request extensions for handlers to use.
/// If invalid or missing, returns 401 Unauthorized.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, (StatusCode, String)> {
    // 1. Parse session ID from the cookie header
    let auth_session_id = session_id_from_headers(req.headers())
        .ok_or_else(unauthorized)?
        .to_string();

    // 2. Validate auth session, get user_id
    let user_id = state
        .store
        .validate_auth_session(&auth_session_id)
        .await
        .map_err(|e| {
            match e {
                PortError::Unauthorized => debug!("Rejected auth session"),
                other => error!("Failed to validate auth session: {:?}", other),
            }
            unauthorized()
        })?;

    // 3. Insert user_id into request extensions
    req.extensions_mut().insert(user_id);

    // 4. Continue to the handler
    Ok(next.run(req).await)
}
