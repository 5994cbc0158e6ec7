use std::sync::Arc;
use std::time::Duration;

use storage::repository::Storage;

use crate::Clock;
use crate::error::AppServicesError;
use crate::exercise_service::ExerciseService;
use crate::exercise_session::NavigationPolicy;
use crate::lesson_feed::{DEFAULT_LESSON_DELAY, LessonFeed};
use crate::lesson_service::LessonService;
use crate::progress_service::ProgressService;
use crate::user_service::UserService;

/// Options for wiring the app-facing services.
#[derive(Debug, Clone, Copy)]
pub struct AppServicesOptions {
    pub lesson_delay: Duration,
    pub navigation: NavigationPolicy,
}

impl Default for AppServicesOptions {
    fn default() -> Self {
        Self {
            lesson_delay: DEFAULT_LESSON_DELAY,
            navigation: NavigationPolicy::default(),
        }
    }
}

/// Assembles the user, lesson, exercise and progress services over one storage.
#[derive(Clone)]
pub struct AppServices {
    user_service: Arc<UserService>,
    lesson_service: Arc<LessonService>,
    exercise_service: Arc<ExerciseService>,
    progress_service: Arc<ProgressService>,
    lesson_delay: Duration,
}

impl AppServices {
    /// Build services over the seeded in-memory store.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Seed` if the built-in catalog fails validation.
    pub fn new_in_memory(
        clock: Clock,
        options: AppServicesOptions,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::seeded(clock.now())?;
        Ok(Self::from_storage(&storage, clock, options))
    }

    /// Build services over any storage backend.
    #[must_use]
    pub fn from_storage(storage: &Storage, clock: Clock, options: AppServicesOptions) -> Self {
        let progress_service = Arc::new(ProgressService::new(
            clock,
            Arc::clone(&storage.profiles),
        ));
        let user_service = Arc::new(UserService::new(
            clock,
            Arc::clone(&storage.profiles),
            Arc::clone(&progress_service),
        ));
        let lesson_service = Arc::new(LessonService::new(Arc::clone(&storage.content)));
        let exercise_service = Arc::new(
            ExerciseService::new(Arc::clone(&storage.content)).with_navigation(options.navigation),
        );

        Self {
            user_service,
            lesson_service,
            exercise_service,
            progress_service,
            lesson_delay: options.lesson_delay,
        }
    }

    #[must_use]
    pub fn user_service(&self) -> Arc<UserService> {
        Arc::clone(&self.user_service)
    }

    #[must_use]
    pub fn lesson_service(&self) -> Arc<LessonService> {
        Arc::clone(&self.lesson_service)
    }

    #[must_use]
    pub fn exercise_service(&self) -> Arc<ExerciseService> {
        Arc::clone(&self.exercise_service)
    }

    #[must_use]
    pub fn progress_service(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress_service)
    }

    /// A new lesson feed using the configured delay.
    #[must_use]
    pub fn lesson_feed(&self) -> LessonFeed {
        LessonFeed::new(self.lesson_service.as_ref().clone(), self.lesson_delay)
    }
}
