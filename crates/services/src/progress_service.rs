use std::sync::Arc;

use grammar_core::model::{ExerciseId, LearningProgress, LessonId, UserId, daily_goal_progress};
use storage::repository::ProfileRepository;
use tokio::sync::Mutex;

use crate::Clock;
use crate::error::ProgressServiceError;

/// Reads and updates per-user learning progress.
///
/// Updates are read-modify-write against the profile store, serialized by an
/// internal lock so concurrent callers do not lose minutes.
#[derive(Clone)]
pub struct ProgressService {
    clock: Clock,
    profiles: Arc<dyn ProfileRepository>,
    write_lock: Arc<Mutex<()>>,
}

impl ProgressService {
    #[must_use]
    pub fn new(clock: Clock, profiles: Arc<dyn ProfileRepository>) -> Self {
        Self {
            clock,
            profiles,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// `min(1.0, minutes_spent / daily_goal_minutes)`.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Progress` when the daily goal is zero.
    pub fn compute_daily_goal_progress(
        minutes_spent: u32,
        daily_goal_minutes: u32,
    ) -> Result<f64, ProgressServiceError> {
        Ok(daily_goal_progress(minutes_spent, daily_goal_minutes)?)
    }

    /// Returns `Ok(None)` when the user has no progress record yet.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` if repository access fails.
    pub async fn get_user_progress(
        &self,
        user_id: &UserId,
    ) -> Result<Option<LearningProgress>, ProgressServiceError> {
        Ok(self.profiles.get_progress(user_id).await?)
    }

    /// Replace the stored record for `progress.user_id()`.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` if repository access fails.
    pub async fn save_progress(
        &self,
        progress: &LearningProgress,
    ) -> Result<(), ProgressServiceError> {
        let _guard = self.write_lock.lock().await;
        self.profiles.upsert_progress(progress).await?;
        tracing::info!(user_id = %progress.user_id(), "saved progress");
        Ok(())
    }

    /// Add study minutes to a user's total.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` if repository access fails.
    pub async fn record_minutes(
        &self,
        user_id: &UserId,
        minutes: u32,
    ) -> Result<LearningProgress, ProgressServiceError> {
        let now = self.clock.now();
        let progress = self
            .modify(user_id, |p| {
                p.record_minutes(minutes, now);
                Ok(())
            })
            .await?;
        tracing::info!(
            user_id = %user_id,
            minutes,
            total = progress.total_time_spent_minutes(),
            "recorded study time"
        );
        Ok(progress)
    }

    /// Mark a lesson complete and add the time spent on it.
    ///
    /// The lesson id is not checked against the catalog.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` if repository access fails.
    pub async fn update_lesson_progress(
        &self,
        user_id: &UserId,
        lesson_id: &LessonId,
        time_spent: u32,
    ) -> Result<LearningProgress, ProgressServiceError> {
        let now = self.clock.now();
        let progress = self
            .modify(user_id, |p| {
                p.complete_lesson(lesson_id.clone(), time_spent, now);
                Ok(())
            })
            .await?;
        tracing::info!(
            user_id = %user_id,
            lesson_id = %lesson_id,
            time_spent,
            "updated lesson progress"
        );
        Ok(progress)
    }

    /// Mark an exercise complete with a caller-computed score in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Progress` for an out-of-range score
    /// (nothing is stored) and `ProgressServiceError::Storage` if repository
    /// access fails.
    pub async fn update_exercise_progress(
        &self,
        user_id: &UserId,
        exercise_id: &ExerciseId,
        score: f32,
        time_spent: u32,
    ) -> Result<LearningProgress, ProgressServiceError> {
        let now = self.clock.now();
        let progress = self
            .modify(user_id, |p| {
                p.complete_exercise(exercise_id.clone(), score, time_spent, now)?;
                Ok(())
            })
            .await?;
        tracing::info!(
            user_id = %user_id,
            exercise_id = %exercise_id,
            score,
            time_spent,
            "updated exercise progress"
        );
        Ok(progress)
    }

    async fn modify(
        &self,
        user_id: &UserId,
        apply: impl FnOnce(&mut LearningProgress) -> Result<(), ProgressServiceError>,
    ) -> Result<LearningProgress, ProgressServiceError> {
        let _guard = self.write_lock.lock().await;
        let mut progress = match self.profiles.get_progress(user_id).await? {
            Some(existing) => existing,
            None => LearningProgress::new(user_id.clone(), self.clock.now()),
        };
        apply(&mut progress)?;
        self.profiles.upsert_progress(&progress).await?;
        Ok(progress)
    }
}
