#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod exercise_service;
pub mod exercise_session;
pub mod lesson_feed;
pub mod lesson_service;
pub mod progress_service;
pub mod user_service;

pub use grammar_core::Clock;

pub use app_services::{AppServices, AppServicesOptions};
pub use error::{
    AppServicesError, ExerciseServiceError, ExerciseSessionError, LessonServiceError,
    ProgressServiceError, UserServiceError,
};
pub use exercise_service::ExerciseService;
pub use exercise_session::{ExerciseSession, NavigationPolicy, SessionProgress, SessionState};
pub use lesson_feed::{DEFAULT_LESSON_DELAY, LessonFeed, LessonFeedState};
pub use lesson_service::LessonService;
pub use progress_service::ProgressService;
pub use user_service::{OnboardingForm, UserService};
