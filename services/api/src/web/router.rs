//! services/api/src/web/router.rs
//!
//! Builds the complete Axum application: public catalog, auth and gesture
//! routes, the session-protected progress routes, and the Swagger UI.

use crate::web::{
    auth::{current_user_handler, login_handler, logout_handler, register_handler},
    gesture_ws::gesture_ws_handler,
    gestures::{estimate_handler, list_gestures_handler},
    middleware::require_auth,
    progress::{
        course_progress_handler, list_progress_handler, record_practice_handler,
        update_progress_handler,
    },
    rest::{
        get_course_handler, get_lesson_handler, get_module_handler, list_course_lessons_handler,
        list_course_modules_handler, list_courses_handler, list_module_lessons_handler, ApiDoc,
    },
    state::AppState,
};
use axum::{
    http::{
        header::{ACCEPT, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::warn;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

fn cors_layer(state: &AppState) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, ACCEPT]);

    match HeaderValue::from_str(&state.config.cors_origin) {
        Ok(origin) => cors.allow_origin(origin),
        Err(_) => {
            warn!("Ignoring invalid CORS origin {}", state.config.cors_origin);
            cors
        }
    }
}

/// Creates the web router with all routes and layers applied.
pub fn app(app_state: Arc<AppState>) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/api/courses", get(list_courses_handler))
        .route("/api/courses/{id}", get(get_course_handler))
        .route("/api/courses/{id}/modules", get(list_course_modules_handler))
        .route("/api/courses/{id}/lessons", get(list_course_lessons_handler))
        .route("/api/modules/{id}", get(get_module_handler))
        .route("/api/modules/{id}/lessons", get(list_module_lessons_handler))
        .route("/api/lessons/{id}", get(get_lesson_handler))
        .route("/api/register", post(register_handler))
        .route("/api/login", post(login_handler))
        .route("/api/logout", post(logout_handler))
        .route("/api/gestures", get(list_gestures_handler))
        .route("/api/gestures/estimate", post(estimate_handler))
        .route("/api/gestures/ws", get(gesture_ws_handler));

    // Protected routes (auth required)
    let protected_routes = Router::new()
        .route("/api/user", get(current_user_handler))
        .route("/api/progress", get(list_progress_handler))
        .route("/api/progress/{lesson_id}", post(update_progress_handler))
        .route("/api/progress/{lesson_id}/practice", post(record_practice_handler))
        .route("/api/courses/{id}/progress", get(course_progress_handler))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            require_auth,
        ));

    let api_router = Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(cors_layer(&app_state))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    // Merge the API router with the Swagger UI router for a complete application.
    Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
