use std::sync::Arc;

use grammar_core::model::{Exercise, ExerciseId, LessonId};
use storage::repository::ContentRepository;

use crate::error::ExerciseServiceError;
use crate::exercise_session::{ExerciseSession, NavigationPolicy};

/// Read-only queries over exercises, plus session start-up.
#[derive(Clone)]
pub struct ExerciseService {
    content: Arc<dyn ContentRepository>,
    navigation: NavigationPolicy,
}

impl ExerciseService {
    #[must_use]
    pub fn new(content: Arc<dyn ContentRepository>) -> Self {
        Self {
            content,
            navigation: NavigationPolicy::default(),
        }
    }

    /// Navigation policy applied to sessions started by this service.
    #[must_use]
    pub fn with_navigation(mut self, navigation: NavigationPolicy) -> Self {
        self.navigation = navigation;
        self
    }

    /// # Errors
    ///
    /// Returns `ExerciseServiceError::Storage` if repository access fails.
    pub async fn get_exercises(&self) -> Result<Vec<Exercise>, ExerciseServiceError> {
        Ok(self.content.list_exercises().await?)
    }

    /// Returns `Ok(None)` when the exercise does not exist.
    ///
    /// # Errors
    ///
    /// Returns `ExerciseServiceError::Storage` if repository access fails.
    pub async fn get_exercise_by_id(
        &self,
        id: &ExerciseId,
    ) -> Result<Option<Exercise>, ExerciseServiceError> {
        Ok(self.content.get_exercise(id).await?)
    }

    /// Exercises attached to a lesson, in catalog order.
    ///
    /// # Errors
    ///
    /// Returns `ExerciseServiceError::Storage` if repository access fails.
    pub async fn get_exercises_for_lesson(
        &self,
        lesson_id: &LessonId,
    ) -> Result<Vec<Exercise>, ExerciseServiceError> {
        Ok(self.content.list_exercises_for_lesson(lesson_id).await?)
    }

    /// Open a fresh session on an exercise. `Ok(None)` for an unknown id.
    ///
    /// # Errors
    ///
    /// Returns `ExerciseServiceError::Storage` if repository access fails.
    pub async fn start_session(
        &self,
        id: &ExerciseId,
    ) -> Result<Option<ExerciseSession>, ExerciseServiceError> {
        let Some(exercise) = self.get_exercise_by_id(id).await? else {
            tracing::debug!(exercise_id = %id, "exercise not found");
            return Ok(None);
        };
        let mut session = ExerciseSession::with_navigation(self.navigation);
        session.load_exercise(exercise);
        Ok(Some(session))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use grammar_core::time::fixed_now;
    use storage::repository::InMemoryRepository;

    use crate::exercise_session::SessionState;

    fn service() -> ExerciseService {
        ExerciseService::new(Arc::new(InMemoryRepository::seeded(fixed_now()).unwrap()))
    }

    #[tokio::test]
    async fn start_session_loads_exercise() {
        let session = service()
            .start_session(&ExerciseId::new("1").unwrap())
            .await
            .unwrap()
            .expect("exercise 1");
        assert_eq!(session.state(), SessionState::InProgress);
        assert_eq!(session.current_question_index(), 0);
        assert!(session.answers().is_empty());
        assert!(!session.is_submitted());
        assert_eq!(session.question_count(), 2);
    }

    #[tokio::test]
    async fn start_session_unknown_exercise_is_none() {
        let session = service()
            .start_session(&ExerciseId::new("404").unwrap())
            .await
            .unwrap();
        assert!(session.is_none());
    }

    #[tokio::test]
    async fn sessions_inherit_navigation_policy() {
        let svc = service().with_navigation(NavigationPolicy::AllQuestions);
        let session = svc
            .start_session(&ExerciseId::new("2").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(session.navigation(), NavigationPolicy::AllQuestions);
    }

    #[tokio::test]
    async fn exercises_for_lesson_filters_by_relation() {
        let exercises = service()
            .get_exercises_for_lesson(&LessonId::new("5").unwrap())
            .await
            .unwrap();
        assert_eq!(exercises.len(), 1);
        assert_eq!(exercises[0].title(), "Prepositions Practice");
    }
}
