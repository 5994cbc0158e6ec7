use grammar_core::model::{GrammarCategory, LessonId, ProficiencyLevel};
use grammar_core::time::fixed_now;
use storage::repository::{ContentRepository, InMemoryRepository};

#[tokio::test]
async fn every_lesson_is_found_once_by_id_category_and_level() {
    let repo = InMemoryRepository::seeded(fixed_now()).expect("seed");
    let lessons = repo.list_lessons().await.unwrap();
    assert!(!lessons.is_empty());

    for lesson in &lessons {
        let by_id = repo.get_lesson(lesson.id()).await.unwrap();
        assert_eq!(by_id.as_ref(), Some(lesson));

        let by_category = repo
            .list_lessons_by_category(lesson.category())
            .await
            .unwrap();
        assert_eq!(by_category.iter().filter(|l| *l == lesson).count(), 1);

        let by_level = repo.list_lessons_by_level(lesson.level()).await.unwrap();
        assert_eq!(by_level.iter().filter(|l| *l == lesson).count(), 1);
    }
}

#[tokio::test]
async fn every_exercise_is_listed_for_its_lesson() {
    let repo = InMemoryRepository::seeded(fixed_now()).expect("seed");
    for exercise in repo.list_exercises().await.unwrap() {
        let for_lesson = repo
            .list_exercises_for_lesson(exercise.related_lesson_id())
            .await
            .unwrap();
        assert!(for_lesson.contains(&exercise));
    }
}

#[tokio::test]
async fn filters_keep_insertion_order_not_display_order() {
    let repo = InMemoryRepository::seeded(fixed_now()).expect("seed");
    let verb_tenses = repo
        .list_lessons_by_category(GrammarCategory::VerbTenses)
        .await
        .unwrap();
    let ids: Vec<_> = verb_tenses.iter().map(|l| l.id().as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3", "4"]);

    let beginner = repo
        .list_lessons_by_level(ProficiencyLevel::Beginner)
        .await
        .unwrap();
    let ids: Vec<_> = beginner.iter().map(|l| l.id().as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "5"]);
}

#[tokio::test]
async fn unknown_keys_yield_empty_results() {
    let repo = InMemoryRepository::seeded(fixed_now()).expect("seed");
    let unknown = LessonId::new("999").unwrap();
    assert!(repo.get_lesson(&unknown).await.unwrap().is_none());
    assert!(repo.list_exercises_for_lesson(&unknown).await.unwrap().is_empty());
    assert!(
        repo.list_lessons_by_category(GrammarCategory::Conjunctions)
            .await
            .unwrap()
            .is_empty()
    );
}
