use serde::Serialize;
use thiserror::Error;

use crate::model::enums::{GrammarCategory, ProficiencyLevel};
use crate::model::ids::LessonId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LessonError {
    #[error("lesson title cannot be empty")]
    EmptyTitle,

    #[error("lesson order must be >= 1")]
    InvalidOrder,

    #[error("example sentence cannot be empty")]
    EmptyExampleSentence,
}

//
// ─── EXAMPLE ───────────────────────────────────────────────────────────────────
//

/// An example sentence illustrating a lesson's rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Example {
    sentence: String,
    explanation: String,
}

impl Example {
    /// # Errors
    ///
    /// Returns `LessonError::EmptyExampleSentence` if the sentence is blank.
    pub fn new(
        sentence: impl Into<String>,
        explanation: impl Into<String>,
    ) -> Result<Self, LessonError> {
        let sentence = sentence.into();
        if sentence.trim().is_empty() {
            return Err(LessonError::EmptyExampleSentence);
        }
        Ok(Self {
            sentence: sentence.trim().to_owned(),
            explanation: explanation.into().trim().to_owned(),
        })
    }

    #[must_use]
    pub fn sentence(&self) -> &str {
        &self.sentence
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }
}

//
// ─── LESSON ────────────────────────────────────────────────────────────────────
//

/// Fields needed to build a [`Lesson`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonDraft {
    pub id: LessonId,
    pub title: String,
    pub description: String,
    pub content: String,
    pub category: GrammarCategory,
    pub level: ProficiencyLevel,
    pub order: u32,
    pub examples: Vec<Example>,
}

impl LessonDraft {
    /// # Errors
    ///
    /// Returns `LessonError::EmptyTitle` for a blank title and
    /// `LessonError::InvalidOrder` when `order` is zero.
    pub fn validate(self) -> Result<Lesson, LessonError> {
        if self.title.trim().is_empty() {
            return Err(LessonError::EmptyTitle);
        }
        if self.order == 0 {
            return Err(LessonError::InvalidOrder);
        }
        Ok(Lesson {
            id: self.id,
            title: self.title.trim().to_owned(),
            description: self.description.trim().to_owned(),
            content: self.content,
            category: self.category,
            level: self.level,
            order: self.order,
            examples: self.examples,
        })
    }
}

/// A unit of grammar instruction.
///
/// `order` is the display position within the lesson's category; catalog
/// queries do not sort by it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lesson {
    id: LessonId,
    title: String,
    description: String,
    content: String,
    category: GrammarCategory,
    level: ProficiencyLevel,
    order: u32,
    examples: Vec<Example>,
}

impl Lesson {
    #[must_use]
    pub fn id(&self) -> &LessonId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Body text of the lesson.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[must_use]
    pub fn category(&self) -> GrammarCategory {
        self.category
    }

    #[must_use]
    pub fn level(&self) -> ProficiencyLevel {
        self.level
    }

    #[must_use]
    pub fn order(&self) -> u32 {
        self.order
    }

    #[must_use]
    pub fn examples(&self) -> &[Example] {
        &self.examples
    }
}

/// Sorts lessons by their display `order`, keeping ties in their current order.
pub fn sort_by_order(lessons: &mut [Lesson]) {
    lessons.sort_by_key(Lesson::order);
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
