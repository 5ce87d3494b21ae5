use std::sync::Arc;
use std::thread;
use std::time::Duration;

use prepbase::events::{EventType, SessionEventLog};
use prepbase::{Phase, QuestionSource, StartTestError, TestConfiguration, TestEngine, TestKind};
use tempfile::TempDir;

use crate::support::{question_payload, CountingGenerator, FlakyGenerator};

#[test]
fn source_failure_allows_a_second_attempt() {
    let generator = FlakyGenerator::new(question_payload(5), 1);
    let mut engine = TestEngine::new(QuestionSource::new(Arc::new(generator)));
    engine.select_kind(TestKind::FullMock).expect("select kind");

    let config = TestConfiguration::full_mock("Railways NTPC", 5, 0);
    let err = engine
        .start_test(config.clone())
        .expect_err("first attempt fails");
    assert!(matches!(err, StartTestError::Source(_)));
    assert_eq!(
        engine.snapshot().phase,
        Phase::Configuring,
        "failed start must leave the session on the configuration screen"
    );

    engine.start_test(config).expect("second attempt succeeds");
    assert_eq!(engine.snapshot().phase, Phase::InProgress);
    assert_eq!(engine.snapshot().total_questions, 5);
}

#[test]
fn lifecycle_events_land_in_the_log() {
    let dir = TempDir::new().expect("temp dir");
    let log_path = dir.path().join("events.jsonl");
    let generator = CountingGenerator::new(question_payload(2));
    let mut engine = TestEngine::new(QuestionSource::new(Arc::new(generator)))
        .with_event_log(SessionEventLog::at(&log_path));

    engine.select_kind(TestKind::FullMock).expect("select kind");
    engine
        .start_test(TestConfiguration::full_mock("Railways NTPC", 2, 0))
        .expect("start test");
    engine.answer("Option A0").expect("answer");
    engine.submit().expect("submit");

    let events = SessionEventLog::at(&log_path)
        .load_events()
        .expect("load events");
    let types: Vec<EventType> = events.iter().map(|e| e.event_type).collect();
    assert_eq!(
        types,
        vec![
            EventType::SourceResolved,
            EventType::SessionStarted,
            EventType::TestSubmitted,
        ]
    );
    let submitted = &events[2];
    assert_eq!(submitted.details["correct"], 1);
    assert_eq!(submitted.details["total"], 2);
    assert!(events.iter().all(|e| e.session_id == events[0].session_id));
}

#[test]
fn discard_abandons_without_a_result() {
    let generator = CountingGenerator::new(question_payload(3));
    let mut engine = TestEngine::new(QuestionSource::new(Arc::new(generator)));
    engine.select_kind(TestKind::FullMock).expect("select kind");
    engine
        .start_test(TestConfiguration::full_mock("Railways NTPC", 3, 15))
        .expect("start test");
    engine.answer("Option A0").expect("answer");

    let old_id = engine.snapshot().session_id;
    engine.discard();

    let view = engine.snapshot();
    assert_eq!(view.phase, Phase::Selecting);
    assert_ne!(view.session_id, old_id, "discard starts a fresh session");
    assert!(engine.result().is_none());
}

#[test]
fn timed_engine_ticks_in_the_background() {
    let generator = CountingGenerator::new(question_payload(2));
    let mut engine = TestEngine::new(QuestionSource::new(Arc::new(generator)));
    engine.select_kind(TestKind::FullMock).expect("select kind");
    engine
        .start_test(TestConfiguration::full_mock("Railways NTPC", 2, 15))
        .expect("start test");

    thread::sleep(Duration::from_millis(2400));
    let view = engine.snapshot();
    assert!(
        view.elapsed_secs >= 1,
        "background cadence should have ticked at least once"
    );
    assert_eq!(view.remaining_secs + view.elapsed_secs, 900);

    let result = engine.submit().expect("submit stops the cadence");
    let frozen = result.elapsed_secs;
    thread::sleep(Duration::from_millis(1200));
    assert_eq!(
        engine.result().expect("result cached").elapsed_secs,
        frozen,
        "no ticks may land after submission"
    );
}

#[test]
fn untimed_engine_never_schedules_a_cadence() {
    let generator = CountingGenerator::new(question_payload(2));
    let mut engine = TestEngine::new(QuestionSource::new(Arc::new(generator)));
    engine.select_kind(TestKind::FullMock).expect("select kind");
    engine
        .start_test(TestConfiguration::full_mock("Railways NTPC", 2, 0))
        .expect("start test");

    thread::sleep(Duration::from_millis(1500));
    assert_eq!(engine.snapshot().elapsed_secs, 0);
    assert_eq!(engine.snapshot().phase, Phase::InProgress);
}

#[test]
fn study_chat_flows_through_the_same_generator() {
    let generator = CountingGenerator::new(r#"{"reply": "Start with Odisha History."}"#);
    let calls = generator.call_handle();
    let engine = TestEngine::new(QuestionSource::new(Arc::new(generator)));

    let mut chat = engine.study_chat();
    let reply = chat.send("Where should I start for OPSC?").expect("tutor reply");
    assert_eq!(reply, "Start with Odisha History.");
    assert_eq!(chat.transcript().len(), 2);
    assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 1);
}

#[test]
fn study_plan_flows_through_the_same_generator() {
    let payload = r#"{
        "exam": "OSSC CGL",
        "duration": "5 days",
        "schedule": [
            {"day": "Day 1", "focus": "Odisha GK", "topics": ["History"], "activities": ["MCQ Practice"]}
        ]
    }"#;
    let dir = TempDir::new().expect("temp dir");
    let log_path = dir.path().join("events.jsonl");
    let engine = TestEngine::new(QuestionSource::new(Arc::new(CountingGenerator::new(payload))))
        .with_event_log(SessionEventLog::at(&log_path));

    let plan = engine
        .study_plan("OSSC CGL", "Beginner", 4)
        .expect("plan generation");
    assert_eq!(plan.exam, "OSSC CGL");
    assert_eq!(plan.schedule.len(), 1);

    let events = SessionEventLog::at(&log_path)
        .load_events()
        .expect("load events");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event_type, EventType::PlanGenerated);
    assert_eq!(events[0].details["exam"], "OSSC CGL");
}
