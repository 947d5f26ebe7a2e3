//! services/api/src/web/dto.rs
//!
//! JSON payloads exchanged over the REST API. Domain types stay free of
//! serialization concerns; each response struct converts from its domain
//! counterpart.

use chrono::{DateTime, Utc};
use handspeak_core::domain::{
    Course, CourseProgress, Lesson, Module, ModuleProgress, PracticeExercise, PracticeResult,
    Resource, User, UserProgress,
};
use handspeak_core::gesture::GestureMatch;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

//=========================================================================================
// Users
//=========================================================================================

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
        }
    }
}

#[derive(Deserialize, ToSchema)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

//=========================================================================================
// Catalog
//=========================================================================================

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    /// `ASL`, `BSL` or `ISL`.
    pub language: String,
    pub image_url: String,
    pub lessons: u32,
    pub duration_hours: u32,
    pub level: String,
    pub category: String,
}

impl From<Course> for CourseResponse {
    fn from(course: Course) -> Self {
        Self {
            id: course.id,
            title: course.title,
            description: course.description,
            language: course.language.as_str().to_string(),
            image_url: course.image_url,
            lessons: course.lessons,
            duration_hours: course.duration_hours,
            level: course.level.as_str().to_string(),
            category: course.category,
        }
    }
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModuleResponse {
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub module_type: String,
    pub order: u32,
    pub lessons: u32,
}

impl From<Module> for ModuleResponse {
    fn from(module: Module) -> Self {
        Self {
            id: module.id,
            course_id: module.course_id,
            title: module.title,
            description: module.description,
            module_type: module.module_type.as_str().to_string(),
            order: module.order,
            lessons: module.lessons,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct PracticeExerciseResponse {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub description: String,
    #[schema(value_type = Object)]
    pub content: serde_json::Value,
}

impl From<PracticeExercise> for PracticeExerciseResponse {
    fn from(e: PracticeExercise) -> Self {
        Self {
            kind: e.kind,
            title: e.title,
            description: e.description,
            content: e.content,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct ResourceResponse {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub description: String,
    pub url: String,
}

impl From<Resource> for ResourceResponse {
    fn from(r: Resource) -> Self {
        Self {
            kind: r.kind,
            title: r.title,
            description: r.description,
            url: r.url,
        }
    }
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LessonResponse {
    pub id: i64,
    pub module_id: i64,
    pub title: String,
    pub description: String,
    pub content: String,
    pub video_url: String,
    pub thumbnail_url: Option<String>,
    pub order: u32,
    /// Video segment length in seconds.
    pub duration: u32,
    pub key_points: Vec<String>,
    pub practice_exercises: Vec<PracticeExerciseResponse>,
    pub resources: Vec<ResourceResponse>,
}

impl From<Lesson> for LessonResponse {
    fn from(lesson: Lesson) -> Self {
        Self {
            id: lesson.id,
            module_id: lesson.module_id,
            title: lesson.title,
            description: lesson.description,
            content: lesson.content,
            video_url: lesson.video_url,
            thumbnail_url: lesson.thumbnail_url,
            order: lesson.order,
            duration: lesson.duration,
            key_points: lesson.key_points,
            practice_exercises: lesson.practice_exercises.into_iter().map(Into::into).collect(),
            resources: lesson.resources.into_iter().map(Into::into).collect(),
        }
    }
}

//=========================================================================================
// Progress
//=========================================================================================

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PracticeResultResponse {
    pub exercise_id: i64,
    pub score: u8,
    pub completed_at: DateTime<Utc>,
}

impl From<PracticeResult> for PracticeResultResponse {
    fn from(r: PracticeResult) -> Self {
        Self {
            exercise_id: r.exercise_id,
            score: r.score,
            completed_at: r.completed_at,
        }
    }
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProgressResponse {
    pub id: i64,
    pub user_id: i64,
    pub lesson_id: i64,
    pub completed: bool,
    pub progress: u8,
    pub practice_results: Option<Vec<PracticeResultResponse>>,
}

impl From<UserProgress> for UserProgressResponse {
    fn from(p: UserProgress) -> Self {
        Self {
            id: p.id,
            user_id: p.user_id,
            lesson_id: p.lesson_id,
            completed: p.completed,
            progress: p.progress.get(),
            practice_results: p
                .practice_results
                .map(|results| results.into_iter().map(Into::into).collect()),
        }
    }
}

/// Body of `POST /api/progress/{lessonId}`. The value is validated by the handler.
#[derive(Deserialize, ToSchema)]
pub struct ProgressRequest {
    #[serde(default)]
    #[schema(value_type = i64)]
    pub progress: serde_json::Value,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PracticeRequest {
    pub exercise_id: i64,
    pub score: i64,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModuleProgressResponse {
    pub module_id: i64,
    pub total_lessons: u32,
    pub completed_lessons: u32,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseProgressResponse {
    pub course_id: i64,
    pub total_lessons: u32,
    pub completed_lessons: u32,
    pub percent: u8,
    pub modules: Vec<ModuleProgressResponse>,
}

impl From<ModuleProgress> for ModuleProgressResponse {
    fn from(m: ModuleProgress) -> Self {
        Self {
            module_id: m.module_id,
            total_lessons: m.total_lessons,
            completed_lessons: m.completed_lessons,
        }
    }
}

impl From<CourseProgress> for CourseProgressResponse {
    fn from(c: CourseProgress) -> Self {
        Self {
            course_id: c.course_id,
            total_lessons: c.total_lessons,
            completed_lessons: c.completed_lessons,
            percent: c.percent,
            modules: c.modules.into_iter().map(Into::into).collect(),
        }
    }
}

//=========================================================================================
// Gestures
//=========================================================================================

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct GestureMatchResponse {
    pub name: String,
    pub confidence: f32,
}

impl From<GestureMatch> for GestureMatchResponse {
    fn from(m: GestureMatch) -> Self {
        Self {
            name: m.name,
            confidence: m.confidence,
        }
    }
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EstimateRequest {
    /// 21 `[x, y, z]` points in image coordinates.
    #[schema(value_type = Vec<Vec<f32>>)]
    pub landmarks: Vec<[f32; 3]>,
    pub min_confidence: Option<f32>,
}

#[derive(Serialize, ToSchema)]
pub struct EstimateResponse {
    pub gestures: Vec<GestureMatchResponse>,
    pub best: Option<GestureMatchResponse>,
}

#[derive(Serialize, ToSchema)]
pub struct GestureListResponse {
    pub gestures: Vec<String>,
}
