mod enums;
mod exercise;
pub mod guide;
mod ids;
mod lesson;
mod progress;
mod user;

pub use enums::{ExerciseType, GrammarCategory, LearningGoal, ParseEnumError, ProficiencyLevel};
pub use exercise::{Exercise, ExerciseError, Question};
pub use guide::LessonGuide;
pub use ids::{ExerciseId, LessonId, ParseIdError, UserId};
pub use lesson::{Example, Lesson, LessonDraft, LessonError, sort_by_order};
pub use progress::{LearningProgress, ProgressError, clamp_mastery, daily_goal_progress};
pub use user::{DEFAULT_DAILY_GOAL_MINUTES, DEFAULT_PROFILE_IMAGE, User, UserDraft, UserError};
