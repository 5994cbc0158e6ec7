use serde::Serialize;
use thiserror::Error;

use crate::model::enums::ExerciseType;
use crate::model::ids::{ExerciseId, LessonId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExerciseError {
    #[error("exercise title cannot be empty")]
    EmptyTitle,

    #[error("exercise must contain at least one question")]
    NoQuestions,

    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("correct answer cannot be empty")]
    EmptyCorrectAnswer,

    #[error("correct answer {answer:?} is not one of the options")]
    AnswerNotInOptions { answer: String },

    #[error("question {index} needs options for a {kind} exercise")]
    MissingOptions { index: usize, kind: ExerciseType },

    #[error("question {index} must not carry options in a {kind} exercise")]
    UnexpectedOptions { index: usize, kind: ExerciseType },
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    prompt: String,
    options: Option<Vec<String>>,
    correct_answer: String,
    explanation: String,
}

impl Question {
    /// Builds a question.
    ///
    /// # Errors
    ///
    /// Returns `ExerciseError::EmptyPrompt` / `EmptyCorrectAnswer` for blank
    /// fields and `ExerciseError::AnswerNotInOptions` when options are given
    /// but do not contain the correct answer.
    pub fn new(
        prompt: impl Into<String>,
        options: Option<Vec<String>>,
        correct_answer: impl Into<String>,
        explanation: impl Into<String>,
    ) -> Result<Self, ExerciseError> {
        let prompt = prompt.into();
        let correct_answer = correct_answer.into();
        if prompt.trim().is_empty() {
            return Err(ExerciseError::EmptyPrompt);
        }
        if correct_answer.trim().is_empty() {
            return Err(ExerciseError::EmptyCorrectAnswer);
        }
        if let Some(options) = &options {
            if !options.iter().any(|o| *o == correct_answer) {
                return Err(ExerciseError::AnswerNotInOptions {
                    answer: correct_answer,
                });
            }
        }
        Ok(Self {
            prompt,
            options,
            correct_answer,
            explanation: explanation.into(),
        })
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> Option<&[String]> {
        self.options.as_deref()
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }
}

//
// ─── EXERCISE ──────────────────────────────────────────────────────────────────
//

/// A set of practice questions attached to a lesson.
///
/// `related_lesson_id` is not checked against any catalog here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Exercise {
    id: ExerciseId,
    title: String,
    #[serde(rename = "type")]
    kind: ExerciseType,
    instructions: String,
    related_lesson_id: LessonId,
    questions: Vec<Question>,
}

impl Exercise {
    /// Builds an exercise, checking that each question's options match the
    /// exercise type.
    ///
    /// # Errors
    ///
    /// Returns `ExerciseError` for a blank title, an empty question list, or
    /// options that do not fit `kind`.
    pub fn new(
        id: ExerciseId,
        title: impl Into<String>,
        kind: ExerciseType,
        instructions: impl Into<String>,
        related_lesson_id: LessonId,
        questions: Vec<Question>,
    ) -> Result<Self, ExerciseError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ExerciseError::EmptyTitle);
        }
        if questions.is_empty() {
            return Err(ExerciseError::NoQuestions);
        }
        for (index, question) in questions.iter().enumerate() {
            match (kind.uses_options(), question.options.is_some()) {
                (true, false) => return Err(ExerciseError::MissingOptions { index, kind }),
                (false, true) => return Err(ExerciseError::UnexpectedOptions { index, kind }),
                _ => {}
            }
        }
        Ok(Self {
            id,
            title: title.trim().to_owned(),
            kind,
            instructions: instructions.into(),
            related_lesson_id,
            questions,
        })
    }

    #[must_use]
    pub fn id(&self) -> &ExerciseId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn kind(&self) -> ExerciseType {
        self.kind
    }

    #[must_use]
    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    #[must_use]
    pub fn related_lesson_id(&self) -> &LessonId {
        &self.related_lesson_id
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn options(values: &[&str]) -> Option<Vec<String>> {
        Some(values.iter().map(|v| (*v).to_owned()).collect())
    }

    #[test]
    fn question_answer_must_be_an_option() {
        let err = Question::new("She _____.", options(&["go", "went"]), "goes", "").unwrap_err();
        assert_eq!(
            err,
            ExerciseError::AnswerNotInOptions {
                answer: "goes".into()
            }
        );
    }

    #[test]
    fn open_question_has_no_options() {
        let q = Question::new("The cat is ___ the box.", None, "in", "Inside").unwrap();
        assert!(q.options().is_none());
        assert_eq!(q.correct_answer(), "in");
    }

    #[test]
    fn multiple_choice_requires_options() {
        let q = Question::new("They _____ here.", None, "live", "").unwrap();
        let err = Exercise::new(
            ExerciseId::new("1").unwrap(),
            "Practice",
            ExerciseType::MultipleChoice,
            "",
            LessonId::new("1").unwrap(),
            vec![q],
        )
        .unwrap_err();
        assert!(matches!(err, ExerciseError::MissingOptions { index: 0, .. }));
    }

    #[test]
    fn fill_in_the_blank_rejects_options() {
        let q = Question::new("I ___ here.", options(&["am", "is"]), "am", "").unwrap();
        let err = Exercise::new(
            ExerciseId::new("2").unwrap(),
            "Practice",
            ExerciseType::FillInTheBlank,
            "",
            LessonId::new("1").unwrap(),
            vec![q],
        )
        .unwrap_err();
        assert!(matches!(err, ExerciseError::UnexpectedOptions { index: 0, .. }));
    }

    #[test]
    fn exercise_needs_questions() {
        let err = Exercise::new(
            ExerciseId::new("3").unwrap(),
            "Empty",
            ExerciseType::Reordering,
            "",
            LessonId::new("1").unwrap(),
            Vec::new(),
        )
        .unwrap_err();
        assert_eq!(err, ExerciseError::NoQuestions);
    }
}
