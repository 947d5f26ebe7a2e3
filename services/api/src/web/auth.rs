//! services/api/src/web/auth.rs
//!
//! Authentication endpoints for user registration, login, and logout.

use crate::config::Config;
use crate::error::port_error_response;
use crate::web::dto::{CredentialsRequest, UserResponse};
use crate::web::state::AppState;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use chrono::{Duration, Utc};
use handspeak_core::ports::PortError;
use std::sync::{Arc, LazyLock};
use tracing::{error, info};
use uuid::Uuid;

const SESSION_COOKIE: &str = "session";

const DUMMY_PASSWORD: &str = "handspeak-unknown-user";

/// Hash checked on logins for unknown usernames, so they cost as much as a
/// wrong password.
static DUMMY_HASH: LazyLock<Option<String>> = LazyLock::new(|| {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(DUMMY_PASSWORD.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| error!("Failed to build dummy password hash: {:?}", e))
        .ok()
});

fn verify_against_dummy(password: &str) -> bool {
    let Some(hash) = DUMMY_HASH.as_deref() else {
        return false;
    };
    PasswordHash::new(hash)
        .map(|parsed| Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok())
        .unwrap_or(false)
}

//=========================================================================================
// Cookie Helpers
//=========================================================================================

/// Extracts the auth session id from the `Cookie` header, if present.
pub(crate) fn session_id_from_headers(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .find_map(|c| {
            let (name, value) = c.trim().split_once('=')?;
            (name == SESSION_COOKIE && !value.is_empty()).then_some(value)
        })
}

fn session_cookie(config: &Config, session_id: &str) -> String {
    let mut cookie = format!(
        "{}={}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
        SESSION_COOKIE,
        session_id,
        Duration::days(config.session_ttl_days).num_seconds()
    );
    if config.cookie_secure {
        cookie.push_str("; Secure");
    }
    cookie
}

fn cleared_cookie(config: &Config) -> String {
    let mut cookie = format!("{}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0", SESSION_COOKIE);
    if config.cookie_secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Opens a new auth session for `user_id` and returns its `Set-Cookie` value.
async fn open_session(state: &AppState, user_id: i64) -> Result<String, (StatusCode, String)> {
    let auth_session_id = Uuid::new_v4().to_string();
    let expires_at = Utc::now() + Duration::days(state.config.session_ttl_days);

    state
        .store
        .create_auth_session(&auth_session_id, user_id, expires_at)
        .await
        .map_err(|e| {
            error!("Failed to create auth session: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to create session".to_string())
        })?;

    Ok(session_cookie(&state.config, &auth_session_id))
}

//=========================================================================================
// Handlers
//=========================================================================================

/// POST /api/register - Create a new user account
#[utoipa::path(
    post,
    path = "/api/register",
    request_body = CredentialsRequest,
    responses(
        (status = 201, description = "User created successfully", body = UserResponse),
        (status = 400, description = "Missing fields or username already exists"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn register_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CredentialsRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let username = req.username.trim();
    if username.is_empty() || req.password.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "Username and password are required".to_string(),
        ));
    }

    // 1. Hash the password
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(req.password.as_bytes(), &salt)
        .map_err(|e| {
            error!("Failed to hash password: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to hash password".to_string())
        })?
        .to_string();

    // 2. Create the user; a taken username is a conflict
    let user = state
        .store
        .create_user(username, &password_hash)
        .await
        .map_err(|e| port_error_response(e, "User not found"))?;

    // 3. Log the new user in
    let cookie = open_session(&state, user.id).await?;
    info!("Registered user {}", user.id);

    Ok((
        StatusCode::CREATED,
        [(header::SET_COOKIE, cookie)],
        Json(UserResponse::from(user)),
    ))
}

/// POST /api/login - Login with an existing account
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Login successful", body = UserResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CredentialsRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let invalid = || (StatusCode::UNAUTHORIZED, "Invalid username or password".to_string());

    // 1. Get user by username
    let creds = match state.store.get_user_by_username(req.username.trim()).await {
        Ok(creds) => creds,
        Err(PortError::NotFound(_)) => {
            verify_against_dummy(&req.password);
            return Err(invalid());
        }
        Err(e) => return Err(port_error_response(e, "User not found")),
    };

    // 2. Verify password
    let parsed_hash = PasswordHash::new(&creds.hashed_password).map_err(|e| {
        error!("Failed to parse password hash: {:?}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, "Authentication error".to_string())
    })?;

    if Argon2::default()
        .verify_password(req.password.as_bytes(), &parsed_hash)
        .is_err()
    {
        return Err(invalid());
    }

    // 3. Start a session
    let cookie = open_session(&state, creds.id).await?;

    let response = UserResponse {
        id: creds.id,
        username: creds.username,
    };

    Ok((StatusCode::OK, [(header::SET_COOKIE, cookie)], Json(response)))
}

/// POST /api/logout - Logout and invalidate the session
#[utoipa::path(
    post,
    path = "/api/logout",
    responses(
        (status = 200, description = "Logout successful; the cookie is cleared")
    )
)]
pub async fn logout_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    if let Some(auth_session_id) = session_id_from_headers(&headers) {
        state
            .store
            .delete_auth_session(auth_session_id)
            .await
            .map_err(|e| {
                error!("Failed to delete auth session: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to logout".to_string())
            })?;
    }

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cleared_cookie(&state.config))],
    ))
}

/// GET /api/user - The currently logged in user
#[utoipa::path(
    get,
    path = "/api/user",
    responses(
        (status = 200, description = "The current user", body = UserResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn current_user_handler(
    State(state): State<Arc<AppState>>,
    Extension(user_id): Extension<i64>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    // a session without a user counts as logged out
    let user = state.store.get_user(user_id).await.map_err(|e| match e {
        PortError::NotFound(_) => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
        other => port_error_response(other, "User not found"),
    })?;
    Ok(Json(UserResponse::from(user)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn finds_session_among_other_cookies() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; session=abc-123; lang=en"),
        );
        assert_eq!(session_id_from_headers(&headers), Some("abc-123"));
    }

    #[test]
    fn ignores_empty_or_missing_session() {
        let mut headers = HeaderMap::new();
        assert_eq!(session_id_from_headers(&headers), None);
        headers.insert(header::COOKIE, HeaderValue::from_static("session="));
        assert_eq!(session_id_from_headers(&headers), None);
        headers.insert(header::COOKIE, HeaderValue::from_static("xsession=abc"));
        assert_eq!(session_id_from_headers(&headers), None);
    }

    #[test]
    fn cookie_carries_ttl_and_secure_flag() {
        let config = Config::default();
        let cookie = session_cookie(&config, "id");
        assert!(cookie.starts_with("session=id; HttpOnly; SameSite=Lax; Path=/; Max-Age=2592000"));
        assert!(cookie.ends_with("; Secure"));

        let insecure = Config {
            cookie_secure: false,
            ..Config::default()
        };
        assert!(!session_cookie(&insecure, "id").contains("Secure"));
        assert!(cleared_cookie(&insecure).contains("Max-Age=0"));
    }

    #[test]
    fn dummy_hash_is_a_real_argon2_hash() {
        let hash = DUMMY_HASH.as_deref().expect("dummy hash");
        assert!(PasswordHash::new(hash).is_ok());
        assert!(hash.starts_with("$argon2"));
        assert!(verify_against_dummy(DUMMY_PASSWORD));
        assert!(!verify_against_dummy("secret-password"));
    }
}
