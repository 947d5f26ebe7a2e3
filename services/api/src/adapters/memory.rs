//! services/api/src/adapters/memory.rs
//!
//! This module contains the in-memory storage adapter, the concrete
//! implementation of the `StorageService` port from the `core` crate. The
//! catalog is loaded once from the seed; users, auth sessions and progress
//! live in maps behind a single `RwLock`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use handspeak_core::domain::{
    AuthSession, Course, Lesson, Module, PracticeResult, ProgressValue, SignLanguage, User,
    UserCredentials, UserProgress,
};
use handspeak_core::ports::{PortError, PortResult, StorageService};
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

use super::seed::{self, Catalog};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A storage adapter that implements the `StorageService` port in memory.
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    users: BTreeMap<i64, UserCredentials>,
    auth_sessions: HashMap<String, AuthSession>,
    courses: BTreeMap<i64, Course>,
    modules: BTreeMap<i64, Module>,
    lessons: BTreeMap<i64, Lesson>,
    progress: HashMap<(i64, i64), UserProgress>,
    next_user_id: i64,
    next_progress_id: i64,
}

impl MemoryStore {
    /// Creates a store holding the given catalog and no users.
    pub fn new(catalog: Catalog) -> Self {
        let inner = Inner {
            courses: catalog.courses.into_iter().map(|c| (c.id, c)).collect(),
            modules: catalog.modules.into_iter().map(|m| (m.id, m)).collect(),
            lessons: catalog.lessons.into_iter().map(|l| (l.id, l)).collect(),
            next_user_id: 1,
            next_progress_id: 1,
            ..Inner::default()
        };
        Self {
            inner: RwLock::new(inner),
        }
    }

    /// Creates a store holding the built-in course catalog.
    pub fn seeded() -> Self {
        Self::new(seed::catalog())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::seeded()
    }
}

impl Inner {
    fn course(&self, course_id: i64) -> PortResult<&Course> {
        self.courses
            .get(&course_id)
            .ok_or_else(|| PortError::NotFound(format!("Course {} not found", course_id)))
    }

    fn module(&self, module_id: i64) -> PortResult<&Module> {
        self.modules
            .get(&module_id)
            .ok_or_else(|| PortError::NotFound(format!("Module {} not found", module_id)))
    }

    fn lesson(&self, lesson_id: i64) -> PortResult<&Lesson> {
        self.lessons
            .get(&lesson_id)
            .ok_or_else(|| PortError::NotFound(format!("Lesson {} not found", lesson_id)))
    }

    fn modules_of(&self, course_id: i64) -> Vec<Module> {
        let mut modules: Vec<Module> = self
            .modules
            .values()
            .filter(|m| m.course_id == course_id)
            .cloned()
            .collect();
        modules.sort_by_key(|m| (m.order, m.id));
        modules
    }

    fn lessons_of(&self, module_id: i64) -> Vec<Lesson> {
        let mut lessons: Vec<Lesson> = self
            .lessons
            .values()
            .filter(|l| l.module_id == module_id)
            .cloned()
            .collect();
        lessons.sort_by_key(|l| (l.order, l.id));
        lessons
    }

    /// Returns the caller's row for a lesson, creating one at progress 0.
    fn progress_row(&mut self, user_id: i64, lesson_id: i64) -> &mut UserProgress {
        let next_id = &mut self.next_progress_id;
        self.progress.entry((user_id, lesson_id)).or_insert_with(|| {
            let id = *next_id;
            *next_id += 1;
            UserProgress {
                id,
                user_id,
                lesson_id,
                completed: false,
                progress: ProgressValue::default(),
                practice_results: None,
            }
        })
    }
}

//=========================================================================================
// `StorageService` Trait Implementation
//=========================================================================================

#[async_trait]
impl StorageService for MemoryStore {
    async fn create_user(&self, username: &str, hashed_password: &str) -> PortResult<User> {
        let mut inner = self.inner.write().await;
        if inner.users.values().any(|u| u.username == username) {
            return Err(PortError::Conflict("Username already exists".to_string()));
        }

        let id = inner.next_user_id;
        inner.next_user_id += 1;
        inner.users.insert(
            id,
            UserCredentials {
                id,
                username: username.to_string(),
                hashed_password: hashed_password.to_string(),
            },
        );
        Ok(User {
            id,
            username: username.to_string(),
        })
    }

    async fn get_user(&self, user_id: i64) -> PortResult<User> {
        let inner = self.inner.read().await;
        inner
            .users
            .get(&user_id)
            .map(|c| User {
                id: c.id,
                username: c.username.clone(),
            })
            .ok_or_else(|| PortError::NotFound(format!("User {} not found", user_id)))
    }

    async fn get_user_by_username(&self, username: &str) -> PortResult<UserCredentials> {
        let inner = self.inner.read().await;
        inner
            .users
            .values()
            .find(|u| u.username == username)
            .cloned()
            .ok_or_else(|| PortError::NotFound(format!("User {} not found", username)))
    }

    async fn create_auth_session(
        &self,
        session_id: &str,
        user_id: i64,
        expires_at: DateTime<Utc>,
    ) -> PortResult<()> {
        let mut inner = self.inner.write().await;
        if !inner.users.contains_key(&user_id) {
            return Err(PortError::NotFound(format!("User {} not found", user_id)));
        }
        let now = Utc::now();
        inner.auth_sessions.retain(|_, s| s.expires_at > now);
        inner.auth_sessions.insert(
            session_id.to_string(),
            AuthSession {
                id: session_id.to_string(),
                user_id,
                expires_at,
            },
        );
        Ok(())
    }

    async fn validate_auth_session(&self, session_id: &str) -> PortResult<i64> {
        let now = Utc::now();
        {
            let inner = self.inner.read().await;
            match inner.auth_sessions.get(session_id) {
                None => return Err(PortError::Unauthorized),
                Some(session) if session.expires_at > now => return Ok(session.user_id),
                Some(_) => {}
            }
        }

        // expired: purge under the write lock
        let mut inner = self.inner.write().await;
        inner.auth_sessions.retain(|_, s| s.expires_at > now);
        Err(PortError::Unauthorized)
    }

    async fn delete_auth_session(&self, session_id: &str) -> PortResult<()> {
        self.inner.write().await.auth_sessions.remove(session_id);
        Ok(())
    }

    async fn get_courses(&self, language: Option<SignLanguage>) -> PortResult<Vec<Course>> {
        let inner = self.inner.read().await;
        Ok(inner
            .courses
            .values()
            .filter(|c| language.map_or(true, |lang| c.language == lang))
            .cloned()
            .collect())
    }

    async fn get_course(&self, course_id: i64) -> PortResult<Course> {
        self.inner.read().await.course(course_id).cloned()
    }

    async fn get_modules(&self, course_id: i64) -> PortResult<Vec<Module>> {
        let inner = self.inner.read().await;
        inner.course(course_id)?;
        Ok(inner.modules_of(course_id))
    }

    async fn get_module(&self, module_id: i64) -> PortResult<Module> {
        self.inner.read().await.module(module_id).cloned()
    }

    async fn get_lessons(&self, module_id: i64) -> PortResult<Vec<Lesson>> {
        let inner = self.inner.read().await;
        inner.module(module_id)?;
        Ok(inner.lessons_of(module_id))
    }

    async fn get_lesson(&self, lesson_id: i64) -> PortResult<Lesson> {
        self.inner.read().await.lesson(lesson_id).cloned()
    }

    async fn get_course_lessons(&self, course_id: i64) -> PortResult<Vec<Lesson>> {
        let inner = self.inner.read().await;
        inner.course(course_id)?;
        Ok(inner
            .modules_of(course_id)
            .iter()
            .flat_map(|m| inner.lessons_of(m.id))
            .collect())
    }

    async fn get_user_progress(&self, user_id: i64) -> PortResult<Vec<UserProgress>> {
        let inner = self.inner.read().await;
        let mut rows: Vec<UserProgress> = inner
            .progress
            .values()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by_key(|p| p.id);
        Ok(rows)
    }

    async fn update_progress(
        &self,
        user_id: i64,
        lesson_id: i64,
        progress: ProgressValue,
    ) -> PortResult<UserProgress> {
        let mut inner = self.inner.write().await;
        inner.lesson(lesson_id)?;
        let row = inner.progress_row(user_id, lesson_id);
        row.set_progress(progress);
        Ok(row.clone())
    }

    async fn record_practice_result(
        &self,
        user_id: i64,
        lesson_id: i64,
        result: PracticeResult,
    ) -> PortResult<UserProgress> {
        let mut inner = self.inner.write().await;
        inner.lesson(lesson_id)?;
        let row = inner.progress_row(user_id, lesson_id);
        row.practice_results.get_or_insert_with(Vec::new).push(result);
        Ok(row.clone())
    }
}
