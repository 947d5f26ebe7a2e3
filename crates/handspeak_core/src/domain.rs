//! crates/handspeak_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any storage or serialization format.

use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

//=========================================================================================
// Users and Auth Sessions
//=========================================================================================

/// Represents a user - used throughout app
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub username: String,
}

// Only used internally for login/signup - contains sensitive data
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub id: i64,
    pub username: String,
    pub hashed_password: String,
}

// Represents a browser login session (auth cookie)
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub id: String,
    pub user_id: i64,
    pub expires_at: DateTime<Utc>,
}

//=========================================================================================
// Catalog
//=========================================================================================

/// The three course tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignLanguage {
    Asl,
    Bsl,
    Isl,
}

impl SignLanguage {
    pub const ALL: [SignLanguage; 3] = [SignLanguage::Asl, SignLanguage::Bsl, SignLanguage::Isl];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asl => "ASL",
            Self::Bsl => "BSL",
            Self::Isl => "ISL",
        }
    }

    pub fn full_name(&self) -> &'static str {
        match self {
            Self::Asl => "American Sign Language",
            Self::Bsl => "British Sign Language",
            Self::Isl => "Indian Sign Language",
        }
    }
}

impl fmt::Display for SignLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a language tag is not one of ASL, BSL or ISL.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown sign language: {0}")]
pub struct UnknownLanguage(pub String);

impl FromStr for SignLanguage {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ASL" => Ok(Self::Asl),
            "BSL" => Ok(Self::Bsl),
            "ISL" => Ok(Self::Isl),
            _ => Err(UnknownLanguage(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl CourseLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleType {
    Alphabets,
    Numbers,
    Greetings,
}

impl ModuleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alphabets => "alphabets",
            Self::Numbers => "numbers",
            Self::Greetings => "greetings",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Course {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub language: SignLanguage,
    pub image_url: String,
    /// Total number of lessons across all modules of the course.
    pub lessons: u32,
    pub duration_hours: u32,
    pub level: CourseLevel,
    pub category: String,
}

/// A named, ordered group of lessons within a course.
#[derive(Debug, Clone)]
pub struct Module {
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    pub description: String,
    pub module_type: ModuleType,
    pub order: u32,
    pub lessons: u32,
}

#[derive(Debug, Clone)]
pub struct PracticeExercise {
    /// One of `record`, `quiz` or `matching`.
    pub kind: String,
    pub title: String,
    pub description: String,
    pub content: serde_json::Value,
}

#[derive(Debug, Clone)]
pub struct Resource {
    /// One of `pdf`, `video` or `link`.
    pub kind: String,
    pub title: String,
    pub description: String,
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct Lesson {
    pub id: i64,
    pub module_id: i64,
    pub title: String,
    pub description: String,
    pub content: String,
    pub video_url: String,
    pub thumbnail_url: Option<String>,
    pub order: u32,
    /// Length of the lesson video segment in seconds.
    pub duration: u32,
    pub key_points: Vec<String>,
    pub practice_exercises: Vec<PracticeExercise>,
    pub resources: Vec<Resource>,
}

//=========================================================================================
// Progress
//=========================================================================================

/// Returned when a progress value falls outside `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Progress must be between 0 and 100, got {0}")]
pub struct InvalidProgress(pub i64);

/// A lesson completion percentage, always within `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct ProgressValue(u8);

impl ProgressValue {
    pub const COMPLETE: ProgressValue = ProgressValue(100);

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn is_complete(self) -> bool {
        self.0 == 100
    }
}

impl TryFrom<i64> for ProgressValue {
    type Error = InvalidProgress;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (0..=100).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(InvalidProgress(value))
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PracticeResult {
    pub exercise_id: i64,
    /// Score in `0..=100`.
    pub score: u8,
    pub completed_at: DateTime<Utc>,
}

/// A user's progress through a single lesson.
#[derive(Debug, Clone, PartialEq)]
pub struct UserProgress {
    pub id: i64,
    pub user_id: i64,
    pub lesson_id: i64,
    pub completed: bool,
    pub progress: ProgressValue,
    pub practice_results: Option<Vec<PracticeResult>>,
}

impl UserProgress {
    /// Sets the progress value, keeping `completed` in step with it.
    pub fn set_progress(&mut self, progress: ProgressValue) {
        self.progress = progress;
        self.completed = progress.is_complete();
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModuleProgress {
    pub module_id: i64,
    pub total_lessons: u32,
    pub completed_lessons: u32,
}

/// Aggregated completion of a course for one user.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseProgress {
    pub course_id: i64,
    pub total_lessons: u32,
    pub completed_lessons: u32,
    /// Rounded-down share of completed lessons, `0..=100`.
    pub percent: u8,
    pub modules: Vec<ModuleProgress>,
}

impl CourseProgress {
    /// Summarises `progress` over the given modules and their lessons.
    pub fn summarize(course_id: i64, modules: &[(Module, Vec<Lesson>)], progress: &[UserProgress]) -> Self {
        let is_done = |lesson_id: i64| {
            progress
                .iter()
                .any(|p| p.lesson_id == lesson_id && p.completed)
        };

        let modules: Vec<ModuleProgress> = modules
            .iter()
            .map(|(module, lessons)| ModuleProgress {
                module_id: module.id,
                total_lessons: lessons.len() as u32,
                completed_lessons: lessons.iter().filter(|l| is_done(l.id)).count() as u32,
            })
            .collect();

        let total_lessons: u32 = modules.iter().map(|m| m.total_lessons).sum();
        let completed_lessons: u32 = modules.iter().map(|m| m.completed_lessons).sum();
        let percent = if total_lessons == 0 {
            0
        } else {
            (completed_lessons * 100 / total_lessons) as u8
        };

        Self {
            course_id,
            total_lessons,
            completed_lessons,
            percent,
            modules,
        }
    }
}
