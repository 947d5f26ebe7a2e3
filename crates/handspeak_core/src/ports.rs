//! crates/handspeak_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! The storage port keeps the catalog, user and progress logic independent
//! of the concrete store behind it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{
    Course, Lesson, Module, PracticeResult, ProgressValue, SignLanguage, User, UserCredentials,
    UserProgress,
};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait StorageService: Send + Sync {
    // --- User Management ---
    async fn create_user(&self, username: &str, hashed_password: &str) -> PortResult<User>;

    async fn get_user(&self, user_id: i64) -> PortResult<User>;

    async fn get_user_by_username(&self, username: &str) -> PortResult<UserCredentials>;

    // --- Auth Methods ---
    async fn create_auth_session(
        &self,
        session_id: &str,
        user_id: i64,
        expires_at: DateTime<Utc>,
    ) -> PortResult<()>;

    /// Returns the owning user id, or `Unauthorized` for unknown and expired sessions.
    async fn validate_auth_session(&self, session_id: &str) -> PortResult<i64>;

    async fn delete_auth_session(&self, session_id: &str) -> PortResult<()>;

    // --- Catalog ---
    async fn get_courses(&self, language: Option<SignLanguage>) -> PortResult<Vec<Course>>;

    async fn get_course(&self, course_id: i64) -> PortResult<Course>;

    /// Modules of a course, sorted by ascending `order`.
    async fn get_modules(&self, course_id: i64) -> PortResult<Vec<Module>>;

    async fn get_module(&self, module_id: i64) -> PortResult<Module>;

    /// Lessons of a module, sorted by ascending `order`.
    async fn get_lessons(&self, module_id: i64) -> PortResult<Vec<Lesson>>;

    async fn get_lesson(&self, lesson_id: i64) -> PortResult<Lesson>;

    /// Every lesson of a course, by module order then lesson order.
    async fn get_course_lessons(&self, course_id: i64) -> PortResult<Vec<Lesson>>;

    // --- Progress ---
    async fn get_user_progress(&self, user_id: i64) -> PortResult<Vec<UserProgress>>;

    async fn update_progress(
        &self,
        user_id: i64,
        lesson_id: i64,
        progress: ProgressValue,
    ) -> PortResult<UserProgress>;

    async fn record_practice_result(
        &self,
        user_id: i64,
        lesson_id: i64,
        result: PracticeResult,
    ) -> PortResult<UserProgress>;
}
