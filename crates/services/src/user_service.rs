use std::sync::Arc;

use grammar_core::model::{
    DEFAULT_DAILY_GOAL_MINUTES, LearningGoal, LearningProgress, ProficiencyLevel, User, UserDraft,
    UserId, daily_goal_progress,
};
use storage::repository::ProfileRepository;
use storage::seed::{SEED_USER_EMAIL, SEED_USER_NAME};

use crate::Clock;
use crate::error::UserServiceError;
use crate::progress_service::ProgressService;

/// Answers collected by the onboarding flow.
///
/// Blank name or email fall back to the default profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnboardingForm {
    pub name: String,
    pub email: String,
    pub level: ProficiencyLevel,
    pub learning_goal: LearningGoal,
}

impl Default for OnboardingForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            level: ProficiencyLevel::Beginner,
            learning_goal: LearningGoal::General,
        }
    }
}

/// Manages the current user and their daily goal.
#[derive(Clone)]
pub struct UserService {
    clock: Clock,
    profiles: Arc<dyn ProfileRepository>,
    progress: Arc<ProgressService>,
}

impl UserService {
    #[must_use]
    pub fn new(
        clock: Clock,
        profiles: Arc<dyn ProfileRepository>,
        progress: Arc<ProgressService>,
    ) -> Self {
        Self {
            clock,
            profiles,
            progress,
        }
    }

    /// `Ok(None)` when nobody is logged in.
    ///
    /// # Errors
    ///
    /// Returns `UserServiceError::Storage` if repository access fails.
    pub async fn get_current_user(&self) -> Result<Option<User>, UserServiceError> {
        Ok(self.profiles.current_user().await?)
    }

    /// # Errors
    ///
    /// Returns `UserServiceError::Storage` if repository access fails.
    pub async fn is_logged_in(&self) -> Result<bool, UserServiceError> {
        Ok(self.get_current_user().await?.is_some())
    }

    /// Make `user` the current user.
    ///
    /// # Errors
    ///
    /// Returns `UserServiceError::Storage` if repository access fails.
    pub async fn save_user(&self, user: &User) -> Result<(), UserServiceError> {
        self.profiles.set_current_user(user).await?;
        tracing::info!(user_id = %user.id(), name = user.name(), "saved user");
        Ok(())
    }

    /// Record study minutes for the current user and return how much of the
    /// daily goal they cover.
    ///
    /// Returns `Ok(None)` without recording anything when nobody is logged in.
    ///
    /// # Errors
    ///
    /// Returns `UserServiceError` if storage access fails.
    pub async fn update_user_progress(
        &self,
        minutes_spent: u32,
    ) -> Result<Option<f64>, UserServiceError> {
        let Some(user) = self.get_current_user().await? else {
            tracing::debug!(minutes_spent, "no current user; progress not recorded");
            return Ok(None);
        };
        self.progress.record_minutes(user.id(), minutes_spent).await?;
        let ratio = daily_goal_progress(minutes_spent, user.daily_goal_minutes())?;
        Ok(Some(ratio))
    }

    /// Log out. The user's progress record is kept.
    ///
    /// # Errors
    ///
    /// Returns `UserServiceError::Storage` if repository access fails.
    pub async fn clear_user_data(&self) -> Result<(), UserServiceError> {
        self.profiles.clear_current_user().await?;
        tracing::info!("cleared user data");
        Ok(())
    }

    /// Create the current user from the onboarding answers.
    ///
    /// New users get a fresh id, the default daily goal, a zero streak and an
    /// empty progress record.
    ///
    /// # Errors
    ///
    /// Returns `UserServiceError` if the profile fails validation or cannot be stored.
    pub async fn complete_onboarding(
        &self,
        form: OnboardingForm,
    ) -> Result<User, UserServiceError> {
        let name = if form.name.trim().is_empty() {
            SEED_USER_NAME.to_owned()
        } else {
            form.name
        };
        let email = if form.email.trim().is_empty() {
            SEED_USER_EMAIL.to_owned()
        } else {
            form.email
        };
        let user = UserDraft {
            id: UserId::generate(),
            name,
            email,
            profile_image: String::new(),
            level: form.level,
            learning_goal: form.learning_goal,
            daily_goal_minutes: DEFAULT_DAILY_GOAL_MINUTES,
            streak_days: 0,
        }
        .validate()?;

        self.save_user(&user).await?;
        self.progress
            .save_progress(&LearningProgress::new(user.id().clone(), self.clock.now()))
            .await?;
        Ok(user)
    }
}
