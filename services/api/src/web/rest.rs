//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the catalog endpoints and the master
//! definition for the OpenAPI specification.

use crate::error::port_error_response;
use crate::web::{auth, dto::*, gestures, progress, state::AppState};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use handspeak_core::domain::SignLanguage;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::{IntoParams, OpenApi};

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        list_courses_handler,
        get_course_handler,
        list_course_modules_handler,
        list_course_lessons_handler,
        get_module_handler,
        list_module_lessons_handler,
        get_lesson_handler,
        auth::register_handler,
        auth::login_handler,
        auth::logout_handler,
        auth::current_user_handler,
        progress::list_progress_handler,
        progress::update_progress_handler,
        progress::record_practice_handler,
        progress::course_progress_handler,
        gestures::list_gestures_handler,
        gestures::estimate_handler,
    ),
    components(
        schemas(
            CourseResponse,
            ModuleResponse,
            LessonResponse,
            PracticeExerciseResponse,
            ResourceResponse,
            UserResponse,
            CredentialsRequest,
            UserProgressResponse,
            PracticeResultResponse,
            ProgressRequest,
            PracticeRequest,
            CourseProgressResponse,
            ModuleProgressResponse,
            GestureMatchResponse,
            GestureListResponse,
            EstimateRequest,
            EstimateResponse,
        )
    ),
    tags(
        (name = "HandSpeak API", description = "Sign language courses, learner progress and hand sign recognition.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// Path and Query Parsing
//=========================================================================================

/// Parses a numeric path id. Anything that is not an integer behaves as an
/// unknown id and yields `404` with the given body.
pub(crate) fn parse_id(raw: &str, not_found: &str) -> Result<i64, (StatusCode, String)> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| (StatusCode::NOT_FOUND, not_found.to_string()))
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CourseQuery {
    /// Restrict to one track: `ASL`, `BSL` or `ISL`.
    pub language: Option<String>,
}

const COURSE_NOT_FOUND: &str = "Course not found";
const MODULE_NOT_FOUND: &str = "Module not found";
const LESSON_NOT_FOUND: &str = "Lesson not found";

//=========================================================================================
// Catalog Handlers
//=========================================================================================

/// List courses, optionally filtered by sign language.
#[utoipa::path(
    get,
    path = "/api/courses",
    params(CourseQuery),
    responses(
        (status = 200, description = "Courses in ascending id order", body = [CourseResponse]),
        (status = 400, description = "Unknown language")
    )
)]
pub async fn list_courses_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CourseQuery>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let language = match query.language.as_deref().filter(|l| !l.trim().is_empty()) {
        Some(raw) => Some(
            raw.parse::<SignLanguage>()
                .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?,
        ),
        None => None,
    };

    let courses = state
        .store
        .get_courses(language)
        .await
        .map_err(|e| port_error_response(e, COURSE_NOT_FOUND))?;

    Ok(Json(
        courses.into_iter().map(CourseResponse::from).collect::<Vec<_>>(),
    ))
}

/// Get a single course.
#[utoipa::path(
    get,
    path = "/api/courses/{id}",
    params(("id" = i64, Path, description = "Course id")),
    responses(
        (status = 200, description = "The course", body = CourseResponse),
        (status = 404, description = "Course not found")
    )
)]
pub async fn get_course_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let id = parse_id(&id, COURSE_NOT_FOUND)?;
    let course = state
        .store
        .get_course(id)
        .await
        .map_err(|e| port_error_response(e, COURSE_NOT_FOUND))?;
    Ok(Json(CourseResponse::from(course)))
}

/// List the modules of a course in ascending order.
#[utoipa::path(
    get,
    path = "/api/courses/{id}/modules",
    params(("id" = i64, Path, description = "Course id")),
    responses(
        (status = 200, description = "Modules sorted by order", body = [ModuleResponse]),
        (status = 404, description = "Course not found")
    )
)]
pub async fn list_course_modules_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let id = parse_id(&id, COURSE_NOT_FOUND)?;
    let modules = state
        .store
        .get_modules(id)
        .await
        .map_err(|e| port_error_response(e, COURSE_NOT_FOUND))?;
    Ok(Json(
        modules.into_iter().map(ModuleResponse::from).collect::<Vec<_>>(),
    ))
}

/// List every lesson of a course, by module order then lesson order.
#[utoipa::path(
    get,
    path = "/api/courses/{id}/lessons",
    params(("id" = i64, Path, description = "Course id")),
    responses(
        (status = 200, description = "Lessons of the course", body = [LessonResponse]),
        (status = 404, description = "Course not found")
    )
)]
pub async fn list_course_lessons_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let id = parse_id(&id, COURSE_NOT_FOUND)?;
    let lessons = state
        .store
        .get_course_lessons(id)
        .await
        .map_err(|e| port_error_response(e, COURSE_NOT_FOUND))?;
    Ok(Json(
        lessons.into_iter().map(LessonResponse::from).collect::<Vec<_>>(),
    ))
}

/// Get a single module.
#[utoipa::path(
    get,
    path = "/api/modules/{id}",
    params(("id" = i64, Path, description = "Module id")),
    responses(
        (status = 200, description = "The module", body = ModuleResponse),
        (status = 404, description = "Module not found")
    )
)]
pub async fn get_module_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let id = parse_id(&id, MODULE_NOT_FOUND)?;
    let module = state
        .store
        .get_module(id)
        .await
        .map_err(|e| port_error_response(e, MODULE_NOT_FOUND))?;
    Ok(Json(ModuleResponse::from(module)))
}

/// List the lessons of a module in ascending order.
#[utoipa::path(
    get,
    path = "/api/modules/{id}/lessons",
    params(("id" = i64, Path, description = "Module id")),
    responses(
        (status = 200, description = "Lessons sorted by order", body = [LessonResponse]),
        (status = 404, description = "Module not found")
    )
)]
pub async fn list_module_lessons_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let id = parse_id(&id, MODULE_NOT_FOUND)?;
    let lessons = state
        .store
        .get_lessons(id)
        .await
        .map_err(|e| port_error_response(e, MODULE_NOT_FOUND))?;
    Ok(Json(
        lessons.into_iter().map(LessonResponse::from).collect::<Vec<_>>(),
    ))
}

/// Get a single lesson.
#[utoipa::path(
    get,
    path = "/api/lessons/{id}",
    params(("id" = i64, Path, description = "Lesson id")),
    responses(
        (status = 200, description = "The lesson", body = LessonResponse),
        (status = 404, description = "Lesson not found")
    )
)]
pub async fn get_lesson_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let id = parse_id(&id, LESSON_NOT_FOUND)?;
    let lesson = state
        .store
        .get_lesson(id)
        .await
        .map_err(|e| port_error_response(e, LESSON_NOT_FOUND))?;
    Ok(Json(LessonResponse::from(lesson)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_numeric_ids_are_not_found() {
        assert_eq!(parse_id("42", COURSE_NOT_FOUND).unwrap(), 42);
        let (status, body) = parse_id("abc", COURSE_NOT_FOUND).unwrap_err();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, "Course not found");
    }
}
