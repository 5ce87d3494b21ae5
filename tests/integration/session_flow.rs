use std::sync::atomic::Ordering;
use std::sync::Arc;

use prepbase::{
    Phase, QuestionSource, SessionError, StartTestError, TestConfiguration, TestEngine, TestKind,
};

use crate::support::{question_payload, CountingGenerator};

fn engine_with_payload(count: usize) -> TestEngine {
    let generator = CountingGenerator::new(question_payload(count));
    TestEngine::new(QuestionSource::new(Arc::new(generator)))
}

#[test]
fn subject_focused_flow_matches_the_exam_contract() {
    // Polity against UPSC misses the bank, so all 10 come generated.
    let mut engine = engine_with_payload(10);
    engine.select_kind(TestKind::SubjectFocused).expect("select kind");
    engine
        .start_test(TestConfiguration::subject_focused("UPSC", "Polity", 10, 15))
        .expect("start test");

    let view = engine.snapshot();
    assert_eq!(view.phase, Phase::InProgress);
    assert_eq!(view.total_questions, 10);
    assert_eq!(view.remaining_secs, 900);
    assert_eq!(view.current_index, 0);

    let first_option = view
        .current_question
        .as_ref()
        .expect("question 0 present")
        .options[0]
        .clone();
    assert!(engine.answer(&first_option).expect("record answer"));

    engine.go_to(1).expect("forward");
    engine.go_to(0).expect("back");
    assert_eq!(
        engine.snapshot().current_selection.as_deref(),
        Some(first_option.as_str()),
        "navigation must not disturb the recorded answer"
    );

    let result = engine.submit().expect("submit");
    assert_eq!(result.total, 10);
}

#[test]
fn chapter_focused_with_empty_topic_fails_before_resolution() {
    let generator = CountingGenerator::new(question_payload(5));
    let calls = generator.call_handle();
    let mut engine = TestEngine::new(QuestionSource::new(Arc::new(generator)));
    engine.select_kind(TestKind::ChapterFocused).expect("select kind");

    let config = TestConfiguration {
        kind: TestKind::ChapterFocused,
        exam: "OPSC Civil Services".into(),
        question_count: 10,
        duration_minutes: 15,
        subject: Some("Odisha History".into()),
        topic: Some("".into()),
    };
    let err = engine.start_test(config).expect_err("empty topic must fail");
    assert!(matches!(
        err,
        StartTestError::Session(SessionError::ConfigurationInvalid(_))
    ));
    assert_eq!(
        calls.load(Ordering::SeqCst),
        0,
        "validation failures must not reach the generator"
    );
    assert_eq!(engine.snapshot().phase, Phase::Configuring);
}

#[test]
fn answers_are_immutable_once_given() {
    let mut engine = engine_with_payload(3);
    engine.select_kind(TestKind::FullMock).expect("select kind");
    engine
        .start_test(TestConfiguration::full_mock("Railways NTPC", 3, 0))
        .expect("start test");

    assert!(engine.answer("Option A0").expect("first write"));
    assert!(!engine.answer("Option B0").expect("second write is a no-op"));

    let result = engine.submit().expect("submit");
    assert_eq!(result.breakdown[0].selected.as_deref(), Some("Option A0"));
    assert!(result.breakdown[0].is_correct);
}

#[test]
fn review_marks_never_affect_scoring() {
    let mut engine = engine_with_payload(2);
    engine.select_kind(TestKind::FullMock).expect("select kind");
    engine
        .start_test(TestConfiguration::full_mock("Railways NTPC", 2, 0))
        .expect("start test");

    engine.answer("Option A0").expect("answer");
    engine.toggle_review().expect("mark");
    assert_eq!(engine.snapshot().review_marked, vec![0]);

    let result = engine.submit().expect("submit");
    assert_eq!(result.correct_count, 1);
    assert_eq!(result.percentage, 50);
}

#[test]
fn completed_session_rejects_further_operations() {
    let mut engine = engine_with_payload(1);
    engine.select_kind(TestKind::FullMock).expect("select kind");
    engine
        .start_test(TestConfiguration::full_mock("Railways NTPC", 1, 0))
        .expect("start test");
    engine.submit().expect("submit");

    assert!(matches!(
        engine.answer("Option A0"),
        Err(SessionError::InvalidTransition { .. })
    ));
    assert!(matches!(
        engine.go_to(0),
        Err(SessionError::InvalidTransition { .. })
    ));
    // Submit stays idempotent.
    let again = engine.submit().expect("idempotent submit");
    assert_eq!(again.total, 1);
}
