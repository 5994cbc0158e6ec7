use serde::Serialize;
use thiserror::Error;

use crate::model::enums::{LearningGoal, ProficiencyLevel};
use crate::model::ids::UserId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum UserError {
    #[error("user name cannot be empty")]
    EmptyName,

    #[error("user email cannot be empty")]
    EmptyEmail,

    #[error("daily goal must be at least one minute")]
    ZeroDailyGoal,
}

/// Profile image used when the learner has not picked one.
pub const DEFAULT_PROFILE_IMAGE: &str = "profile_default";

/// Daily goal assigned to newly onboarded learners.
pub const DEFAULT_DAILY_GOAL_MINUTES: u32 = 20;

/// Fields needed to build a [`User`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub profile_image: String,
    pub level: ProficiencyLevel,
    pub learning_goal: LearningGoal,
    pub daily_goal_minutes: u32,
    pub streak_days: u32,
}

impl UserDraft {
    /// # Errors
    ///
    /// Returns `UserError` for a blank name or email, or a zero daily goal.
    pub fn validate(self) -> Result<User, UserError> {
        if self.name.trim().is_empty() {
            return Err(UserError::EmptyName);
        }
        if self.email.trim().is_empty() {
            return Err(UserError::EmptyEmail);
        }
        if self.daily_goal_minutes == 0 {
            return Err(UserError::ZeroDailyGoal);
        }
        let profile_image = match self.profile_image.trim() {
            "" => DEFAULT_PROFILE_IMAGE.to_owned(),
            image => image.to_owned(),
        };
        Ok(User {
            id: self.id,
            name: self.name.trim().to_owned(),
            email: self.email.trim().to_owned(),
            profile_image,
            level: self.level,
            learning_goal: self.learning_goal,
            daily_goal_minutes: self.daily_goal_minutes,
            streak_days: self.streak_days,
        })
    }
}

/// The learner using the app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    id: UserId,
    name: String,
    email: String,
    profile_image: String,
    level: ProficiencyLevel,
    learning_goal: LearningGoal,
    daily_goal_minutes: u32,
    streak_days: u32,
}

impl User {
    #[must_use]
    pub fn id(&self) -> &UserId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn profile_image(&self) -> &str {
        &self.profile_image
    }

    #[must_use]
    pub fn level(&self) -> ProficiencyLevel {
        self.level
    }

    #[must_use]
    pub fn learning_goal(&self) -> LearningGoal {
        self.learning_goal
    }

    /// Always >= 1.
    #[must_use]
    pub fn daily_goal_minutes(&self) -> u32 {
        self.daily_goal_minutes
    }

    #[must_use]
    pub fn streak_days(&self) -> u32 {
        self.streak_days
    }

    pub fn set_level(&mut self, level: ProficiencyLevel) {
        self.level = level;
    }

    pub fn set_learning_goal(&mut self, goal: LearningGoal) {
        self.learning_goal = goal;
    }

    /// # Errors
    ///
    /// Returns `UserError::ZeroDailyGoal` if `minutes` is zero.
    pub fn set_daily_goal_minutes(&mut self, minutes: u32) -> Result<(), UserError> {
        if minutes == 0 {
            return Err(UserError::ZeroDailyGoal);
        }
        self.daily_goal_minutes = minutes;
        Ok(())
    }

    pub fn set_streak_days(&mut self, days: u32) {
        self.streak_days = days;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> UserDraft {
        UserDraft {
            id: UserId::new("user-1").unwrap(),
            name: "Sarah Johnson".into(),
            email: "sarah.j@example.com".into(),
            profile_image: String::new(),
            level: ProficiencyLevel::Intermediate,
            learning_goal: LearningGoal::Academic,
            daily_goal_minutes: 20,
            streak_days: 7,
        }
    }

    #[test]
    fn user_rejects_zero_daily_goal() {
        let mut d = draft();
        d.daily_goal_minutes = 0;
        assert_eq!(d.validate().unwrap_err(), UserError::ZeroDailyGoal);
    }

    #[test]
    fn user_rejects_blank_name_and_email() {
        let mut d = draft();
        d.name = " ".into();
        assert_eq!(d.validate().unwrap_err(), UserError::EmptyName);

        let mut d = draft();
        d.email = String::new();
        assert_eq!(d.validate().unwrap_err(), UserError::EmptyEmail);
    }

    #[test]
    fn blank_profile_image_uses_default() {
        let user = draft().validate().unwrap();
        assert_eq!(user.profile_image(), DEFAULT_PROFILE_IMAGE);
        assert_eq!(user.streak_days(), 7);
    }

    #[test]
    fn daily_goal_update_keeps_invariant() {
        let mut user = draft().validate().unwrap();
        assert!(user.set_daily_goal_minutes(0).is_err());
        assert_eq!(user.daily_goal_minutes(), 20);
        user.set_daily_goal_minutes(45).unwrap();
        assert_eq!(user.daily_goal_minutes(), 45);
    }
}
