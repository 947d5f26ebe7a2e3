//! services/api/src/web/progress.rs
//!
//! Learner progress endpoints. All routes here sit behind `require_auth`,
//! which supplies the caller's user id as an extension.

use crate::error::port_error_response;
use crate::web::dto::{CourseProgressResponse, PracticeRequest, ProgressRequest, UserProgressResponse};
use crate::web::rest::parse_id;
use crate::web::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use chrono::Utc;
use handspeak_core::domain::{CourseProgress, PracticeResult, ProgressValue};
use handspeak_core::ports::PortError;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

const LESSON_NOT_FOUND: &str = "Lesson not found";
const COURSE_NOT_FOUND: &str = "Course not found";

/// Reads a progress value from a JSON integer, a float (truncated toward
/// zero) or a numeric string. Returns `None` unless the result is in `0..=100`.
pub fn parse_progress(raw: &Value) -> Option<ProgressValue> {
    let number = match raw {
        Value::Number(n) => match n.as_i64() {
            Some(i) => return ProgressValue::try_from(i).ok(),
            None => n.as_f64()?,
        },
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    truncate(number).and_then(|i| ProgressValue::try_from(i).ok())
}

fn truncate(value: f64) -> Option<i64> {
    let t = value.trunc();
    t.is_finite().then_some(t as i64)
}

/// List the caller's progress rows.
#[utoipa::path(
    get,
    path = "/api/progress",
    responses(
        (status = 200, description = "Progress rows in creation order", body = [UserProgressResponse]),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_progress_handler(
    State(state): State<Arc<AppState>>,
    Extension(user_id): Extension<i64>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let rows = state
        .store
        .get_user_progress(user_id)
        .await
        .map_err(|e| port_error_response(e, "Progress not found"))?;
    Ok(Json(
        rows.into_iter().map(UserProgressResponse::from).collect::<Vec<_>>(),
    ))
}

/// Set the caller's progress on a lesson.
#[utoipa::path(
    post,
    path = "/api/progress/{lessonId}",
    params(("lessonId" = i64, Path, description = "Lesson id")),
    request_body = ProgressRequest,
    responses(
        (status = 200, description = "Progress stored"),
        (status = 400, description = "Invalid progress value"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Lesson not found")
    )
)]
pub async fn update_progress_handler(
    State(state): State<Arc<AppState>>,
    Extension(user_id): Extension<i64>,
    Path(lesson_id): Path<String>,
    payload: Result<Json<ProgressRequest>, JsonRejection>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let lesson_id = parse_id(&lesson_id, LESSON_NOT_FOUND)?;
    // a missing or non-JSON body is an invalid value, not a 415/422
    let progress = payload
        .ok()
        .and_then(|Json(req)| parse_progress(&req.progress))
        .ok_or_else(|| (StatusCode::BAD_REQUEST, "Invalid progress value".to_string()))?;

    let row = state
        .store
        .update_progress(user_id, lesson_id, progress)
        .await
        .map_err(|e| port_error_response(e, LESSON_NOT_FOUND))?;

    if row.completed {
        info!("User {} completed lesson {}", user_id, lesson_id);
    }
    Ok((StatusCode::OK, "OK"))
}

/// Record a practice exercise score for a lesson.
#[utoipa::path(
    post,
    path = "/api/progress/{lessonId}/practice",
    params(("lessonId" = i64, Path, description = "Lesson id")),
    request_body = PracticeRequest,
    responses(
        (status = 200, description = "The updated progress row", body = UserProgressResponse),
        (status = 400, description = "Invalid score value"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Lesson not found")
    )
)]
pub async fn record_practice_handler(
    State(state): State<Arc<AppState>>,
    Extension(user_id): Extension<i64>,
    Path(lesson_id): Path<String>,
    Json(req): Json<PracticeRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let lesson_id = parse_id(&lesson_id, LESSON_NOT_FOUND)?;
    let score = u8::try_from(req.score)
        .ok()
        .filter(|s| *s <= 100)
        .ok_or_else(|| (StatusCode::BAD_REQUEST, "Invalid score value".to_string()))?;

    let result = PracticeResult {
        exercise_id: req.exercise_id,
        score,
        completed_at: Utc::now(),
    };
    let row = state
        .store
        .record_practice_result(user_id, lesson_id, result)
        .await
        .map_err(|e| port_error_response(e, LESSON_NOT_FOUND))?;

    Ok(Json(UserProgressResponse::from(row)))
}

/// Summarise the caller's completion of a course.
#[utoipa::path(
    get,
    path = "/api/courses/{id}/progress",
    params(("id" = i64, Path, description = "Course id")),
    responses(
        (status = 200, description = "Completion per module and overall", body = CourseProgressResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Course not found")
    )
)]
pub async fn course_progress_handler(
    State(state): State<Arc<AppState>>,
    Extension(user_id): Extension<i64>,
    Path(course_id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let course_id = parse_id(&course_id, COURSE_NOT_FOUND)?;
    let store = &state.store;

    let result = async {
        let modules = store.get_modules(course_id).await?;
        let mut tree = Vec::with_capacity(modules.len());
        for module in modules {
            let lessons = store.get_lessons(module.id).await?;
            tree.push((module, lessons));
        }
        let progress = store.get_user_progress(user_id).await?;
        Ok::<_, PortError>(CourseProgress::summarize(course_id, &tree, &progress))
    }
    .await;

    result
        .map(|summary| Json(CourseProgressResponse::from(summary)))
        .map_err(|e| port_error_response(e, COURSE_NOT_FOUND))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parsed(raw: Value) -> Option<u8> {
        parse_progress(&raw).map(ProgressValue::get)
    }

    #[test]
    fn accepts_integers_in_range() {
        assert_eq!(parsed(json!(0)), Some(0));
        assert_eq!(parsed(json!(100)), Some(100));
        assert_eq!(parsed(json!(150)), None);
        assert_eq!(parsed(json!(-1)), None);
    }

    #[test]
    fn truncates_floats_toward_zero() {
        assert_eq!(parsed(json!(42.9)), Some(42));
        assert_eq!(parsed(json!(-0.5)), Some(0));
        assert_eq!(parsed(json!(100.5)), Some(100));
        assert_eq!(parsed(json!(101.0)), None);
    }

    #[test]
    fn accepts_numeric_strings() {
        assert_eq!(parsed(json!("75")), Some(75));
        assert_eq!(parsed(json!(" 12.5 ")), Some(12));
        assert_eq!(parsed(json!("abc")), None);
        assert_eq!(parsed(json!("")), None);
    }

    #[test]
    fn rejects_other_json_types() {
        assert_eq!(parsed(json!(null)), None);
        assert_eq!(parsed(json!(true)), None);
        assert_eq!(parsed(json!([50])), None);
    }
}
