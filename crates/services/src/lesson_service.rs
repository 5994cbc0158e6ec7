use std::sync::Arc;

use grammar_core::model::{
    GrammarCategory, Lesson, LessonGuide, LessonId, ProficiencyLevel, sort_by_order,
};
use storage::repository::ContentRepository;

use crate::error::LessonServiceError;

/// Read-only queries over the lesson catalog.
#[derive(Clone)]
pub struct LessonService {
    content: Arc<dyn ContentRepository>,
}

impl LessonService {
    #[must_use]
    pub fn new(content: Arc<dyn ContentRepository>) -> Self {
        Self { content }
    }

    /// All lessons in catalog order.
    ///
    /// # Errors
    ///
    /// Returns `LessonServiceError::Storage` if repository access fails.
    pub async fn get_lessons(&self) -> Result<Vec<Lesson>, LessonServiceError> {
        Ok(self.content.list_lessons().await?)
    }

    /// Fetch a lesson by ID.
    ///
    /// Returns `Ok(None)` when the lesson does not exist.
    ///
    /// # Errors
    ///
    /// Returns `LessonServiceError::Storage` if repository access fails.
    pub async fn get_lesson_by_id(
        &self,
        id: &LessonId,
    ) -> Result<Option<Lesson>, LessonServiceError> {
        Ok(self.content.get_lesson(id).await?)
    }

    /// # Errors
    ///
    /// Returns `LessonServiceError::Storage` if repository access fails.
    pub async fn get_lessons_by_category(
        &self,
        category: GrammarCategory,
    ) -> Result<Vec<Lesson>, LessonServiceError> {
        Ok(self.content.list_lessons_by_category(category).await?)
    }

    /// # Errors
    ///
    /// Returns `LessonServiceError::Storage` if repository access fails.
    pub async fn get_lessons_by_level(
        &self,
        level: ProficiencyLevel,
    ) -> Result<Vec<Lesson>, LessonServiceError> {
        Ok(self.content.list_lessons_by_level(level).await?)
    }

    /// A category's lessons sorted by their display `order`.
    ///
    /// # Errors
    ///
    /// Returns `LessonServiceError::Storage` if repository access fails.
    pub async fn get_lessons_in_order(
        &self,
        category: GrammarCategory,
    ) -> Result<Vec<Lesson>, LessonServiceError> {
        let mut lessons = self.get_lessons_by_category(category).await?;
        sort_by_order(&mut lessons);
        Ok(lessons)
    }

    /// Formula and usage notes for a lesson; `Ok(None)` for an unknown id.
    ///
    /// # Errors
    ///
    /// Returns `LessonServiceError::Storage` if repository access fails.
    pub async fn lesson_guide(
        &self,
        id: &LessonId,
    ) -> Result<Option<LessonGuide>, LessonServiceError> {
        let lesson = self.get_lesson_by_id(id).await?;
        Ok(lesson.map(|l| LessonGuide::for_title(l.title())))
    }
}
