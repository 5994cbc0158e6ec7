use std::time::Duration;

use grammar_core::model::{GrammarCategory, Lesson};
use tokio::sync::watch;

use crate::error::LessonServiceError;
use crate::lesson_service::LessonService;

/// Simulated network latency before the lesson list arrives.
pub const DEFAULT_LESSON_DELAY: Duration = Duration::from_secs(1);

/// What the lesson list screen shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LessonFeedState {
    pub lessons: Vec<Lesson>,
    pub is_loading: bool,
}

/// Lesson list with a loading flag, published through a `watch` channel.
///
/// Loading happens on the caller's task: `load` sets `is_loading`, waits the
/// configured delay, then publishes the lessons.
pub struct LessonFeed {
    lessons: LessonService,
    delay: Duration,
    state_tx: watch::Sender<LessonFeedState>,
}

impl LessonFeed {
    #[must_use]
    pub fn new(lessons: LessonService, delay: Duration) -> Self {
        let (state_tx, _state_rx) = watch::channel(LessonFeedState::default());
        Self {
            lessons,
            delay,
            state_tx,
        }
    }

    /// Subscribe to state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<LessonFeedState> {
        self.state_tx.subscribe()
    }

    #[must_use]
    pub fn snapshot(&self) -> LessonFeedState {
        self.state_tx.borrow().clone()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state_tx.borrow().is_loading
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Flag the feed as loading. Returns immediately.
    pub fn begin_load(&self) {
        self.state_tx.send_modify(|state| state.is_loading = true);
    }

    /// Load the lesson list after the configured delay.
    ///
    /// On error the previous lessons are kept and `is_loading` is cleared.
    ///
    /// # Errors
    ///
    /// Returns `LessonServiceError` if the catalog cannot be read.
    pub async fn load(&self) -> Result<Vec<Lesson>, LessonServiceError> {
        self.begin_load();
        tokio::time::sleep(self.delay).await;

        match self.lessons.get_lessons().await {
            Ok(lessons) => {
                tracing::debug!(count = lessons.len(), "lesson feed loaded");
                self.state_tx.send_modify(|state| {
                    state.lessons = lessons.clone();
                    state.is_loading = false;
                });
                Ok(lessons)
            }
            Err(err) => {
                tracing::warn!(error = %err, "lesson feed failed to load");
                self.state_tx.send_modify(|state| state.is_loading = false);
                Err(err)
            }
        }
    }

    /// Loaded lessons in one category. Empty until a load has finished.
    #[must_use]
    pub fn lessons_by_category(&self, category: GrammarCategory) -> Vec<Lesson> {
        self.state_tx
            .borrow()
            .lessons
            .iter()
            .filter(|l| l.category() == category)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use grammar_core::time::fixed_now;
    use storage::repository::InMemoryRepository;

    fn feed() -> LessonFeed {
        let repo = Arc::new(InMemoryRepository::seeded(fixed_now()).unwrap());
        LessonFeed::new(LessonService::new(repo), DEFAULT_LESSON_DELAY)
    }

    #[test]
    fn begin_load_sets_flag_immediately() {
        let feed = feed();
        assert!(!feed.is_loading());
        feed.begin_load();
        assert!(feed.is_loading());
        assert!(feed.snapshot().lessons.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn load_publishes_after_delay() {
        let feed = feed();
        let mut rx = feed.subscribe();
        let started = tokio::time::Instant::now();

        let lessons = feed.load().await.unwrap();

        assert!(started.elapsed() >= DEFAULT_LESSON_DELAY);
        assert_eq!(lessons.len(), 5);
        assert!(rx.has_changed().unwrap());
        let state = rx.borrow_and_update().clone();
        assert!(!state.is_loading);
        assert_eq!(state.lessons, lessons);
    }

    #[tokio::test(start_paused = true)]
    async fn category_filter_uses_loaded_lessons() {
        let feed = feed();
        assert!(feed.lessons_by_category(GrammarCategory::VerbTenses).is_empty());

        feed.load().await.unwrap();
        assert_eq!(feed.lessons_by_category(GrammarCategory::VerbTenses).len(), 4);
        assert_eq!(feed.lessons_by_category(GrammarCategory::Prepositions).len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn subscriber_sees_loading_before_lessons() {
        let feed = Arc::new(feed());
        let mut rx = feed.subscribe();

        let loader = {
            let feed = Arc::clone(&feed);
            tokio::spawn(async move { feed.load().await.map(|l| l.len()) })
        };

        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_loading);

        rx.changed().await.unwrap();
        let state = rx.borrow_and_update().clone();
        assert!(!state.is_loading);
        assert_eq!(state.lessons.len(), 5);
        assert_eq!(loader.await.unwrap().unwrap(), 5);
    }
}
