use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::model::enums::GrammarCategory;
use crate::model::ids::{ExerciseId, LessonId, UserId};

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum ProgressError {
    #[error("daily goal must be at least one minute")]
    ZeroDailyGoal,

    #[error("exercise score must be within [0, 1], got {0}")]
    InvalidScore(f32),
}

/// Fraction of the daily goal reached: `min(1.0, minutes_spent / daily_goal_minutes)`.
///
/// Result is in `[0.0, 1.0]` and non-decreasing in `minutes_spent`.
///
/// # Errors
///
/// Returns `ProgressError::ZeroDailyGoal` when `daily_goal_minutes` is zero.
pub fn daily_goal_progress(minutes_spent: u32, daily_goal_minutes: u32) -> Result<f64, ProgressError> {
    if daily_goal_minutes == 0 {
        return Err(ProgressError::ZeroDailyGoal);
    }
    Ok((f64::from(minutes_spent) / f64::from(daily_goal_minutes)).min(1.0))
}

/// Clamp a mastery value into `[0, 1]`. NaN maps to 0.
#[must_use]
pub fn clamp_mastery(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Per-user learning record. One per user id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LearningProgress {
    user_id: UserId,
    completed_lessons: BTreeSet<LessonId>,
    completed_exercises: BTreeSet<ExerciseId>,
    mastery_levels: BTreeMap<GrammarCategory, f32>,
    exercise_scores: BTreeMap<ExerciseId, f32>,
    total_time_spent_minutes: u64,
    last_updated: DateTime<Utc>,
}

impl LearningProgress {
    /// Fresh record with nothing completed.
    #[must_use]
    pub fn new(user_id: UserId, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            completed_lessons: BTreeSet::new(),
            completed_exercises: BTreeSet::new(),
            mastery_levels: BTreeMap::new(),
            exercise_scores: BTreeMap::new(),
            total_time_spent_minutes: 0,
            last_updated: now,
        }
    }

    /// Builder used by seeds and adapters that already know the accumulated time.
    #[must_use]
    pub fn with_total_time(mut self, minutes: u64) -> Self {
        self.total_time_spent_minutes = minutes;
        self
    }

    #[must_use]
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    #[must_use]
    pub fn completed_lessons(&self) -> &BTreeSet<LessonId> {
        &self.completed_lessons
    }

    #[must_use]
    pub fn completed_exercises(&self) -> &BTreeSet<ExerciseId> {
        &self.completed_exercises
    }

    #[must_use]
    pub fn mastery_levels(&self) -> &BTreeMap<GrammarCategory, f32> {
        &self.mastery_levels
    }

    #[must_use]
    pub fn mastery(&self, category: GrammarCategory) -> Option<f32> {
        self.mastery_levels.get(&category).copied()
    }

    /// Latest caller-supplied score for an exercise.
    #[must_use]
    pub fn exercise_score(&self, exercise_id: &ExerciseId) -> Option<f32> {
        self.exercise_scores.get(exercise_id).copied()
    }

    #[must_use]
    pub fn total_time_spent_minutes(&self) -> u64 {
        self.total_time_spent_minutes
    }

    #[must_use]
    pub fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }

    /// Adds study time. Saturates instead of overflowing.
    pub fn record_minutes(&mut self, minutes: u32, now: DateTime<Utc>) {
        self.total_time_spent_minutes = self
            .total_time_spent_minutes
            .saturating_add(u64::from(minutes));
        self.touch(now);
    }

    pub fn complete_lesson(&mut self, lesson_id: LessonId, minutes: u32, now: DateTime<Utc>) {
        self.completed_lessons.insert(lesson_id);
        self.record_minutes(minutes, now);
    }

    /// Marks an exercise complete and stores its score.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::InvalidScore` if `score` is outside `[0, 1]`
    /// or not finite. Nothing is changed in that case.
    pub fn complete_exercise(
        &mut self,
        exercise_id: ExerciseId,
        score: f32,
        minutes: u32,
        now: DateTime<Utc>,
    ) -> Result<(), ProgressError> {
        if !score.is_finite() || !(0.0..=1.0).contains(&score) {
            return Err(ProgressError::InvalidScore(score));
        }
        self.exercise_scores.insert(exercise_id.clone(), score);
        self.completed_exercises.insert(exercise_id);
        self.record_minutes(minutes, now);
        Ok(())
    }

    /// Stores a mastery estimate, clamped into `[0, 1]`.
    pub fn set_mastery(&mut self, category: GrammarCategory, value: f32, now: DateTime<Utc>) {
        self.mastery_levels.insert(category, clamp_mastery(value));
        self.touch(now);
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.last_updated = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;
    use chrono::Duration;

    fn progress() -> LearningProgress {
        LearningProgress::new(UserId::new("user-1").unwrap(), fixed_now())
    }

    #[test]
    fn daily_goal_ratio_examples() {
        assert!((daily_goal_progress(12, 20).unwrap() - 0.6).abs() < f64::EPSILON);
        assert!((daily_goal_progress(30, 20).unwrap() - 1.0).abs() < f64::EPSILON);
        assert!(daily_goal_progress(0, 20).unwrap().abs() < f64::EPSILON);
    }

    #[test]
    fn daily_goal_ratio_is_bounded_and_monotonic() {
        let mut previous = 0.0;
        for minutes in 0..=60 {
            let ratio = daily_goal_progress(minutes, 25).unwrap();
            assert!((0.0..=1.0).contains(&ratio));
            assert!(ratio >= previous);
            previous = ratio;
        }
    }

    #[test]
    fn zero_daily_goal_is_rejected() {
        assert_eq!(
            daily_goal_progress(10, 0).unwrap_err(),
            ProgressError::ZeroDailyGoal
        );
    }

    #[test]
    fn record_minutes_accumulates_and_stamps() {
        let mut p = progress();
        let later = fixed_now() + Duration::minutes(30);
        p.record_minutes(15, later);
        p.record_minutes(5, later);
        assert_eq!(p.total_time_spent_minutes(), 20);
        assert_eq!(p.last_updated(), later);
    }

    #[test]
    fn mastery_is_clamped() {
        let mut p = progress();
        p.set_mastery(GrammarCategory::Nouns, 1.7, fixed_now());
        p.set_mastery(GrammarCategory::Articles, -0.2, fixed_now());
        p.set_mastery(GrammarCategory::Adverbs, f32::NAN, fixed_now());
        assert_eq!(p.mastery(GrammarCategory::Nouns), Some(1.0));
        assert_eq!(p.mastery(GrammarCategory::Articles), Some(0.0));
        assert_eq!(p.mastery(GrammarCategory::Adverbs), Some(0.0));
    }

    #[test]
    fn completing_exercise_validates_score() {
        let mut p = progress();
        let id = ExerciseId::new("1").unwrap();
        let err = p.complete_exercise(id.clone(), 1.5, 5, fixed_now()).unwrap_err();
        assert_eq!(err, ProgressError::InvalidScore(1.5));
        assert!(p.completed_exercises().is_empty());

        p.complete_exercise(id.clone(), 0.5, 5, fixed_now()).unwrap();
        assert!(p.completed_exercises().contains(&id));
        assert_eq!(p.exercise_score(&id), Some(0.5));
        assert_eq!(p.total_time_spent_minutes(), 5);
    }

    #[test]
    fn completed_lessons_are_a_set() {
        let mut p = progress();
        let id = LessonId::new("1").unwrap();
        p.complete_lesson(id.clone(), 10, fixed_now());
        p.complete_lesson(id, 10, fixed_now());
        assert_eq!(p.completed_lessons().len(), 1);
        assert_eq!(p.total_time_spent_minutes(), 20);
    }
}
