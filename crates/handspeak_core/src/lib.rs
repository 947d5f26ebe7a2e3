pub mod domain;
pub mod gesture;
pub mod ports;

pub use domain::{
    AuthSession, Course, CourseLevel, CourseProgress, InvalidProgress, Lesson, Module,
    ModuleProgress, ModuleType, PracticeExercise, PracticeResult, ProgressValue, Resource,
    SignLanguage, UnknownLanguage, User, UserCredentials, UserProgress,
};
pub use ports::{PortError, PortResult, StorageService};
