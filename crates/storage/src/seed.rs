//! Built-in mock content and profile used until a real backend exists.

use chrono::{DateTime, Utc};
use grammar_core::model::{
    Example, Exercise, ExerciseError, ExerciseId, ExerciseType, GrammarCategory, LearningGoal,
    LearningProgress, Lesson, LessonDraft, LessonError, LessonId, ParseIdError, ProficiencyLevel,
    Question, User, UserDraft, UserError, UserId,
};
use thiserror::Error;

use crate::catalog::{Catalog, CatalogError};

pub const SEED_USER_ID: &str = "user-1";
pub const SEED_USER_NAME: &str = "Sarah Johnson";
pub const SEED_USER_EMAIL: &str = "sarah.j@example.com";
pub const SEED_TOTAL_MINUTES: u64 = 120;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SeedError {
    #[error(transparent)]
    Id(#[from] ParseIdError),
    #[error(transparent)]
    Lesson(#[from] LessonError),
    #[error(transparent)]
    Exercise(#[from] ExerciseError),
    #[error(transparent)]
    User(#[from] UserError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// The mock lesson and exercise catalog.
///
/// # Errors
///
/// Returns `SeedError` if any built-in entry fails validation.
pub fn catalog() -> Result<Catalog, SeedError> {
    Ok(Catalog::new(lessons()?, exercises()?)?)
}

/// The mock current user.
///
/// # Errors
///
/// Returns `SeedError` if the built-in profile fails validation.
pub fn current_user() -> Result<User, SeedError> {
    Ok(UserDraft {
        id: UserId::new(SEED_USER_ID)?,
        name: SEED_USER_NAME.into(),
        email: SEED_USER_EMAIL.into(),
        profile_image: String::new(),
        level: ProficiencyLevel::Intermediate,
        learning_goal: LearningGoal::Academic,
        daily_goal_minutes: 20,
        streak_days: 7,
    }
    .validate()?)
}

/// Progress record paired with the mock user.
#[must_use]
pub fn progress_for(user: &User, now: DateTime<Utc>) -> LearningProgress {
    LearningProgress::new(user.id().clone(), now).with_total_time(SEED_TOTAL_MINUTES)
}

fn examples(pairs: &[(&str, &str)]) -> Result<Vec<Example>, LessonError> {
    pairs
        .iter()
        .map(|(sentence, explanation)| Example::new(*sentence, *explanation))
        .collect()
}

#[allow(clippy::too_many_lines)]
fn lessons() -> Result<Vec<Lesson>, SeedError> {
    let drafts = vec![
        LessonDraft {
            id: LessonId::new("1")?,
            title: "Present Simple Tense".into(),
            description: "Learn when and how to use the present simple tense".into(),
            content: "The present simple tense is used to describe habits, unchanging \
                      situations, general truths, and fixed arrangements."
                .into(),
            category: GrammarCategory::VerbTenses,
            level: ProficiencyLevel::Beginner,
            order: 1,
            examples: examples(&[
                ("I play tennis every weekend.", "Regular habit"),
                ("The sun rises in the east.", "General truth"),
                ("The train leaves at 3pm.", "Fixed arrangement"),
            ])?,
        },
        LessonDraft {
            id: LessonId::new("2")?,
            title: "Present Continuous Tense".into(),
            description: "Master the present continuous tense for ongoing actions".into(),
            content: "The present continuous tense is used for actions happening now and \
                      temporary situations."
                .into(),
            category: GrammarCategory::VerbTenses,
            level: ProficiencyLevel::Beginner,
            order: 2,
            examples: examples(&[
                ("I am studying grammar now.", "Action happening now"),
                ("She is working in London this month.", "Temporary situation"),
            ])?,
        },
        LessonDraft {
            id: LessonId::new("3")?,
            title: "Past Simple Tense".into(),
            description: "Talk about finished actions in the past".into(),
            content: "The past simple tense is used for completed actions, series of \
                      completed actions, and past habits."
                .into(),
            category: GrammarCategory::VerbTenses,
            level: ProficiencyLevel::Intermediate,
            order: 3,
            examples: examples(&[
                ("I visited Paris last year.", "Completed action"),
                ("She walked in, sat down and opened her book.", "Series of actions"),
            ])?,
        },
        LessonDraft {
            id: LessonId::new("4")?,
            title: "Past Perfect Tense".into(),
            description: "Order events that happened before other past events".into(),
            content: "The past perfect tense shows that one past action was completed \
                      before another past action."
                .into(),
            category: GrammarCategory::VerbTenses,
            level: ProficiencyLevel::Advanced,
            order: 4,
            examples: examples(&[(
                "The film had started when we arrived.",
                "Action completed before another past action",
            )])?,
        },
        LessonDraft {
            id: LessonId::new("5")?,
            title: "Prepositions of Place".into(),
            description: "Say where things are with in, on and at".into(),
            content: "Prepositions of place describe the position of a person or thing \
                      relative to something else."
                .into(),
            category: GrammarCategory::Prepositions,
            level: ProficiencyLevel::Beginner,
            order: 1,
            examples: examples(&[
                ("The keys are on the table.", "Surface contact"),
                ("She is waiting at the bus stop.", "Specific point"),
            ])?,
        },
    ];

    drafts
        .into_iter()
        .map(|d| d.validate().map_err(SeedError::from))
        .collect()
}

fn options(values: &[&str]) -> Option<Vec<String>> {
    Some(values.iter().map(|v| (*v).to_owned()).collect())
}

fn exercises() -> Result<Vec<Exercise>, SeedError> {
    let present_simple = Exercise::new(
        ExerciseId::new("1")?,
        "Present Simple Practice",
        ExerciseType::MultipleChoice,
        "Choose the correct form of the verb in present simple tense.",
        LessonId::new("1")?,
        vec![
            Question::new(
                "She _____ to work every day.",
                options(&["go", "goes", "going", "went"]),
                "goes",
                "Use 'goes' because the subject is third person singular (she).",
            )?,
            Question::new(
                "They _____ in London.",
                options(&["lives", "live", "living", "lived"]),
                "live",
                "Use 'live' because the subject is plural (they).",
            )?,
        ],
    )?;

    let prepositions = Exercise::new(
        ExerciseId::new("2")?,
        "Prepositions Practice",
        ExerciseType::FillInTheBlank,
        "Fill in the blank with the correct preposition of place.",
        LessonId::new("5")?,
        vec![
            Question::new(
                "The cat is sleeping ___ the sofa.",
                None,
                "on",
                "Use 'on' for a surface.",
            )?,
            Question::new(
                "We met ___ the entrance.",
                None,
                "at",
                "Use 'at' for a specific point.",
            )?,
            Question::new(
                "The milk is ___ the fridge.",
                None,
                "in",
                "Use 'in' for an enclosed space.",
            )?,
        ],
    )?;

    Ok(vec![present_simple, prepositions])
}
