use grammar_core::model::{ExerciseId, LessonId};
use grammar_core::time::fixed_now;
use services::{AppServices, AppServicesOptions, Clock, SessionState};

#[tokio::test]
async fn present_simple_exercise_end_to_end() {
    let clock = Clock::fixed(fixed_now());
    let app = AppServices::new_in_memory(clock, AppServicesOptions::default()).expect("services");

    let lesson = app
        .lesson_service()
        .get_lesson_by_id(&LessonId::new("1").unwrap())
        .await
        .unwrap()
        .expect("lesson 1");
    assert_eq!(lesson.title(), "Present Simple Tense");

    let exercises = app
        .exercise_service()
        .get_exercises_for_lesson(lesson.id())
        .await
        .unwrap();
    assert_eq!(exercises.len(), 1);
    assert_eq!(exercises[0].id(), &ExerciseId::new("1").unwrap());

    let mut session = app
        .exercise_service()
        .start_session(exercises[0].id())
        .await
        .unwrap()
        .expect("session");
    assert_eq!(session.state(), SessionState::InProgress);

    session.submit_answer(0, "goes").unwrap();
    session.submit_answer(1, "live").unwrap();
    assert!(session.move_to_next());
    assert_eq!(session.current_question_index(), 1);
    assert!(!session.move_to_next());

    session.submit().unwrap();
    assert_eq!(session.state(), SessionState::Submitted);
    assert_eq!(session.answers(), ["goes", "live"]);

    let user = app
        .user_service()
        .get_current_user()
        .await
        .unwrap()
        .expect("seed user");
    let progress = app
        .progress_service()
        .update_exercise_progress(user.id(), exercises[0].id(), 1.0, 5)
        .await
        .unwrap();
    assert!(progress.completed_exercises().contains(exercises[0].id()));
    assert_eq!(progress.total_time_spent_minutes(), 125);
}

#[tokio::test]
async fn fresh_session_answer_padding() {
    let app = AppServices::new_in_memory(Clock::fixed(fixed_now()), AppServicesOptions::default())
        .expect("services");
    let mut session = app
        .exercise_service()
        .start_session(&ExerciseId::new("1").unwrap())
        .await
        .unwrap()
        .unwrap();
    session.submit_answer(1, "goes").unwrap();
    assert_eq!(session.answers(), ["", "goes"]);
    assert_eq!(session.current_question_index(), 0);
}

#[tokio::test]
async fn onboarding_replaces_current_user() {
    use services::OnboardingForm;

    let app = AppServices::new_in_memory(Clock::fixed(fixed_now()), AppServicesOptions::default())
        .expect("services");
    let users = app.user_service();
    users.clear_user_data().await.unwrap();
    assert!(!users.is_logged_in().await.unwrap());

    let user = users
        .complete_onboarding(OnboardingForm {
            name: "Alex".into(),
            email: "alex@example.com".into(),
            ..OnboardingForm::default()
        })
        .await
        .unwrap();
    assert!(users.is_logged_in().await.unwrap());

    let progress = app
        .progress_service()
        .get_user_progress(user.id())
        .await
        .unwrap()
        .expect("progress record");
    assert_eq!(progress.total_time_spent_minutes(), 0);

    let ratio = users.update_user_progress(5).await.unwrap().unwrap();
    assert!((ratio - 0.25).abs() < 1e-9);
}
