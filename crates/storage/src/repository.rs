use async_trait::async_trait;
use chrono::{DateTime, Utc};
use grammar_core::model::{
    Exercise, ExerciseId, GrammarCategory, LearningProgress, Lesson, LessonId, ProficiencyLevel,
    User, UserId,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::catalog::Catalog;
use crate::seed;

/// Errors surfaced by storage adapters.
///
/// The in-memory adapter only produces `Connection` (poisoned lock). Unknown
/// ids are reported as `Ok(None)` or an empty list, never as `NotFound`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Read-only access to lessons and exercises.
///
/// List results keep the backend's insertion order; they are not sorted by
/// `Lesson::order`.
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn list_lessons(&self) -> Result<Vec<Lesson>, StorageError>;

    /// Returns `Ok(None)` for an unknown id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn get_lesson(&self, id: &LessonId) -> Result<Option<Lesson>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn list_lessons_by_category(
        &self,
        category: GrammarCategory,
    ) -> Result<Vec<Lesson>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn list_lessons_by_level(
        &self,
        level: ProficiencyLevel,
    ) -> Result<Vec<Lesson>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn list_exercises(&self) -> Result<Vec<Exercise>, StorageError>;

    /// Returns `Ok(None)` for an unknown id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn get_exercise(&self, id: &ExerciseId) -> Result<Option<Exercise>, StorageError>;

    /// Exercises whose `related_lesson_id` equals `lesson_id`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn list_exercises_for_lesson(
        &self,
        lesson_id: &LessonId,
    ) -> Result<Vec<Exercise>, StorageError>;
}

/// The current user plus one progress record per user id.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// `Ok(None)` until a user has been set.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn current_user(&self) -> Result<Option<User>, StorageError>;

    /// Replace the current user.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the user cannot be stored.
    async fn set_current_user(&self, user: &User) -> Result<(), StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    async fn clear_current_user(&self) -> Result<(), StorageError>;

    /// Returns `Ok(None)` when no record exists for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn get_progress(
        &self,
        user_id: &UserId,
    ) -> Result<Option<LearningProgress>, StorageError>;

    /// Insert or replace the record for `progress.user_id()`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be stored.
    async fn upsert_progress(&self, progress: &LearningProgress) -> Result<(), StorageError>;
}

/// In-memory backend. Nothing survives the process.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    catalog: Arc<Catalog>,
    current_user: Arc<Mutex<Option<User>>>,
    progress: Arc<Mutex<HashMap<UserId, LearningProgress>>>,
}

impl InMemoryRepository {
    /// Empty catalog and no user.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_catalog(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
            ..Self::default()
        }
    }

    /// Mock catalog, mock user and that user's progress record.
    ///
    /// # Errors
    ///
    /// Returns `seed::SeedError` if the built-in data fails validation.
    pub fn seeded(now: DateTime<Utc>) -> Result<Self, seed::SeedError> {
        let user = seed::current_user()?;
        let progress = seed::progress_for(&user, now);
        Ok(Self {
            catalog: Arc::new(seed::catalog()?),
            current_user: Arc::new(Mutex::new(Some(user))),
            progress: Arc::new(Mutex::new(HashMap::from([(
                progress.user_id().clone(),
                progress,
            )]))),
        })
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

#[async_trait]
impl ContentRepository for InMemoryRepository {
    async fn list_lessons(&self) -> Result<Vec<Lesson>, StorageError> {
        Ok(self.catalog.lessons().to_vec())
    }

    async fn get_lesson(&self, id: &LessonId) -> Result<Option<Lesson>, StorageError> {
        Ok(self.catalog.lesson(id).cloned())
    }

    async fn list_lessons_by_category(
        &self,
        category: GrammarCategory,
    ) -> Result<Vec<Lesson>, StorageError> {
        Ok(self.catalog.lessons_where(|l| l.category() == category))
    }

    async fn list_lessons_by_level(
        &self,
        level: ProficiencyLevel,
    ) -> Result<Vec<Lesson>, StorageError> {
        Ok(self.catalog.lessons_where(|l| l.level() == level))
    }

    async fn list_exercises(&self) -> Result<Vec<Exercise>, StorageError> {
        Ok(self.catalog.exercises().to_vec())
    }

    async fn get_exercise(&self, id: &ExerciseId) -> Result<Option<Exercise>, StorageError> {
        Ok(self.catalog.exercise(id).cloned())
    }

    async fn list_exercises_for_lesson(
        &self,
        lesson_id: &LessonId,
    ) -> Result<Vec<Exercise>, StorageError> {
        Ok(self
            .catalog
            .exercises_where(|e| e.related_lesson_id() == lesson_id))
    }
}

#[async_trait]
impl ProfileRepository for InMemoryRepository {
    async fn current_user(&self) -> Result<Option<User>, StorageError> {
        let guard = self
            .current_user
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }

    async fn set_current_user(&self, user: &User) -> Result<(), StorageError> {
        let mut guard = self
            .current_user
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = Some(user.clone());
        Ok(())
    }

    async fn clear_current_user(&self) -> Result<(), StorageError> {
        let mut guard = self
            .current_user
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = None;
        Ok(())
    }

    async fn get_progress(
        &self,
        user_id: &UserId,
    ) -> Result<Option<LearningProgress>, StorageError> {
        let guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(user_id).cloned())
    }

    async fn upsert_progress(&self, progress: &LearningProgress) -> Result<(), StorageError> {
        let mut guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(progress.user_id().clone(), progress.clone());
        Ok(())
    }
}

/// Aggregates the content and profile stores behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub content: Arc<dyn ContentRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory(catalog: Catalog) -> Self {
        Self::from_repository(InMemoryRepository::with_catalog(catalog))
    }

    /// In-memory storage preloaded with the mock catalog and profile.
    ///
    /// # Errors
    ///
    /// Returns `seed::SeedError` if the built-in data fails validation.
    pub fn seeded(now: DateTime<Utc>) -> Result<Self, seed::SeedError> {
        Ok(Self::from_repository(InMemoryRepository::seeded(now)?))
    }

    fn from_repository(repo: InMemoryRepository) -> Self {
        let content: Arc<dyn ContentRepository> = Arc::new(repo.clone());
        let profiles: Arc<dyn ProfileRepository> = Arc::new(repo);
        Self { content, profiles }
    }
}
