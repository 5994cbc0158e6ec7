use grammar_core::model::{Exercise, ExerciseId, Question};
use serde::Serialize;

use crate::error::ExerciseSessionError;

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SessionState {
    NotStarted,
    InProgress,
    Submitted,
}

/// How far `move_to_next` may go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NavigationPolicy {
    /// Forward only onto questions that already have an answer slot
    /// (`index < answers.len() - 1`). A learner cannot step onto a question
    /// past the last answered one.
    #[default]
    AnsweredOnly,
    /// Forward up to the exercise's last question, answered or not.
    AllQuestions,
}

/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionProgress {
    pub total: usize,
    pub answered: usize,
    pub current: usize,
    pub is_submitted: bool,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Transient state for one attempt at an exercise.
///
/// Answers are stored as given. Nothing here compares them to
/// `Question::correct_answer`; grading is left to the caller.
#[derive(Debug, Clone)]
pub struct ExerciseSession {
    exercise: Option<Exercise>,
    state: SessionState,
    current_question_index: usize,
    answers: Vec<String>,
    navigation: NavigationPolicy,
}

impl Default for ExerciseSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ExerciseSession {
    #[must_use]
    pub fn new() -> Self {
        Self::with_navigation(NavigationPolicy::default())
    }

    #[must_use]
    pub fn with_navigation(navigation: NavigationPolicy) -> Self {
        Self {
            exercise: None,
            state: SessionState::NotStarted,
            current_question_index: 0,
            answers: Vec::new(),
            navigation,
        }
    }

    /// Start (or restart) an attempt: index 0, no answers, not submitted.
    pub fn load_exercise(&mut self, exercise: Exercise) {
        tracing::debug!(exercise_id = %exercise.id(), "exercise session started");
        self.exercise = Some(exercise);
        self.state = SessionState::InProgress;
        self.current_question_index = 0;
        self.answers.clear();
    }

    /// Store `answer` at `question_index`, padding skipped slots with `""`.
    ///
    /// # Errors
    ///
    /// Returns `ExerciseSessionError::NotStarted` before an exercise is
    /// loaded, `AlreadySubmitted` after submission, and `QuestionOutOfRange`
    /// for an index past the last question.
    pub fn submit_answer(
        &mut self,
        question_index: usize,
        answer: impl Into<String>,
    ) -> Result<(), ExerciseSessionError> {
        match self.state {
            SessionState::NotStarted => return Err(ExerciseSessionError::NotStarted),
            SessionState::Submitted => return Err(ExerciseSessionError::AlreadySubmitted),
            SessionState::InProgress => {}
        }
        let total = self.question_count();
        if question_index >= total {
            return Err(ExerciseSessionError::QuestionOutOfRange {
                index: question_index,
                total,
            });
        }
        if self.answers.len() <= question_index {
            self.answers.resize(question_index + 1, String::new());
        }
        self.answers[question_index] = answer.into();
        Ok(())
    }

    /// Advance one question if the navigation policy allows it.
    ///
    /// Returns whether the index moved.
    pub fn move_to_next(&mut self) -> bool {
        let limit = match self.navigation {
            NavigationPolicy::AnsweredOnly => self.answers.len(),
            NavigationPolicy::AllQuestions => self.question_count(),
        };
        if self.current_question_index + 1 < limit {
            self.current_question_index += 1;
            true
        } else {
            false
        }
    }

    /// Go back one question unless already at the first.
    ///
    /// Returns whether the index moved.
    pub fn move_to_previous(&mut self) -> bool {
        if self.current_question_index > 0 {
            self.current_question_index -= 1;
            true
        } else {
            false
        }
    }

    /// Mark the attempt submitted. Terminal until the next `load_exercise`.
    ///
    /// # Errors
    ///
    /// Returns `ExerciseSessionError::NotStarted` before an exercise is loaded
    /// and `AlreadySubmitted` on a second call.
    pub fn submit(&mut self) -> Result<(), ExerciseSessionError> {
        match self.state {
            SessionState::NotStarted => Err(ExerciseSessionError::NotStarted),
            SessionState::Submitted => Err(ExerciseSessionError::AlreadySubmitted),
            SessionState::InProgress => {
                self.state = SessionState::Submitted;
                tracing::debug!(
                    exercise_id = ?self.exercise_id(),
                    answers = self.answers.len(),
                    "exercise submitted"
                );
                Ok(())
            }
        }
    }

    // Accessors
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn is_submitted(&self) -> bool {
        self.state == SessionState::Submitted
    }

    #[must_use]
    pub fn navigation(&self) -> NavigationPolicy {
        self.navigation
    }

    #[must_use]
    pub fn current_question_index(&self) -> usize {
        self.current_question_index
    }

    #[must_use]
    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    #[must_use]
    pub fn exercise(&self) -> Option<&Exercise> {
        self.exercise.as_ref()
    }

    #[must_use]
    pub fn exercise_id(&self) -> Option<&ExerciseId> {
        self.exercise.as_ref().map(Exercise::id)
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.exercise.as_ref().map_or(0, Exercise::question_count)
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.exercise
            .as_ref()
            .and_then(|e| e.questions().get(self.current_question_index))
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            total: self.question_count(),
            answered: self.answers.iter().filter(|a| !a.is_empty()).count(),
            current: self.current_question_index,
            is_submitted: self.is_submitted(),
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use grammar_core::model::{ExerciseType, LessonId};

    fn exercise(questions: usize) -> Exercise {
        let questions = (0..questions)
            .map(|i| Question::new(format!("Q{i} ___"), None, format!("a{i}"), "").unwrap())
            .collect();
        Exercise::new(
            ExerciseId::new("1").unwrap(),
            "Practice",
            ExerciseType::FillInTheBlank,
            "",
            LessonId::new("1").unwrap(),
            questions,
        )
        .unwrap()
    }

    fn started(questions: usize) -> ExerciseSession {
        let mut session = ExerciseSession::new();
        session.load_exercise(exercise(questions));
        session
    }

    #[test]
    fn new_session_is_not_started() {
        let mut session = ExerciseSession::new();
        assert_eq!(session.state(), SessionState::NotStarted);
        assert_eq!(
            session.submit_answer(0, "x").unwrap_err(),
            ExerciseSessionError::NotStarted
        );
        assert_eq!(session.submit().unwrap_err(), ExerciseSessionError::NotStarted);
        assert!(!session.move_to_next());
    }

    #[test]
    fn load_resets_state() {
        let mut session = started(2);
        session.submit_answer(0, "a0").unwrap();
        session.submit().unwrap();

        session.load_exercise(exercise(2));
        assert_eq!(session.state(), SessionState::InProgress);
        assert_eq!(session.current_question_index(), 0);
        assert!(session.answers().is_empty());
        assert!(!session.is_submitted());
    }

    #[test]
    fn submit_answer_pads_skipped_slots() {
        let mut session = started(2);
        session.submit_answer(1, "goes").unwrap();
        assert_eq!(session.answers(), ["", "goes"]);
        assert_eq!(session.progress().answered, 1);
    }

    #[test]
    fn submit_answer_overwrites() {
        let mut session = started(2);
        session.submit_answer(0, "first").unwrap();
        session.submit_answer(0, "second").unwrap();
        assert_eq!(session.answers(), ["second"]);
    }

    #[test]
    fn submit_answer_rejects_out_of_range_index() {
        let mut session = started(2);
        let err = session.submit_answer(2, "x").unwrap_err();
        assert_eq!(err, ExerciseSessionError::QuestionOutOfRange { index: 2, total: 2 });
        assert!(session.answers().is_empty());
    }

    #[test]
    fn answered_only_navigation_stops_at_last_answer() {
        let mut session = started(3);
        assert!(!session.move_to_next());

        session.submit_answer(0, "a0").unwrap();
        assert!(!session.move_to_next());
        assert_eq!(session.current_question_index(), 0);

        session.submit_answer(1, "a1").unwrap();
        assert!(session.move_to_next());
        assert_eq!(session.current_question_index(), 1);
        assert!(!session.move_to_next());
        assert_eq!(session.current_question_index(), 1);
    }

    #[test]
    fn all_questions_navigation_reaches_unanswered_questions() {
        let mut session = ExerciseSession::with_navigation(NavigationPolicy::AllQuestions);
        session.load_exercise(exercise(3));
        assert!(session.move_to_next());
        assert!(session.move_to_next());
        assert!(!session.move_to_next());
        assert_eq!(session.current_question_index(), 2);
        assert_eq!(session.current_question().unwrap().prompt(), "Q2 ___");
    }

    #[test]
    fn move_to_previous_is_clamped_at_zero() {
        let mut session = started(2);
        assert!(!session.move_to_previous());
        assert_eq!(session.current_question_index(), 0);

        session.submit_answer(1, "a1").unwrap();
        session.move_to_next();
        assert!(session.move_to_previous());
        assert_eq!(session.current_question_index(), 0);
    }

    #[test]
    fn submitted_session_rejects_more_answers() {
        let mut session = started(2);
        session.submit_answer(0, "a0").unwrap();
        session.submit().unwrap();

        assert_eq!(session.state(), SessionState::Submitted);
        assert_eq!(
            session.submit_answer(1, "a1").unwrap_err(),
            ExerciseSessionError::AlreadySubmitted
        );
        assert_eq!(
            session.submit().unwrap_err(),
            ExerciseSessionError::AlreadySubmitted
        );
        assert_eq!(session.answers(), ["a0"]);
    }

    #[test]
    fn navigation_still_works_after_submission() {
        let mut session = started(2);
        session.submit_answer(0, "a0").unwrap();
        session.submit_answer(1, "a1").unwrap();
        session.submit().unwrap();
        assert!(session.move_to_next());
        assert!(session.move_to_previous());
    }
}
