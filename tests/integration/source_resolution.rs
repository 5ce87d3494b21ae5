use std::sync::atomic::Ordering;
use std::sync::Arc;

use prepbase::questions::bank::GENERAL_STUDIES;
use prepbase::{QuestionSource, TestConfiguration};

use crate::support::{question_payload, CountingGenerator, FailingGenerator};

#[test]
fn opsc_bank_hits_resolve_without_a_remote_call() {
    let generator = CountingGenerator::new(question_payload(5));
    let calls = generator.call_handle();
    let source = QuestionSource::new(Arc::new(generator));

    let config = TestConfiguration::subject_focused("OPSC OAS", GENERAL_STUDIES, 10, 0);
    let questions = source.resolve(&config).expect("bank resolution");

    assert_eq!(questions.len(), 3, "exactly the three OPSC OAS bank items");
    assert_eq!(calls.load(Ordering::SeqCst), 0, "fast path must stay local");
    assert!(questions.iter().any(|q| q.id == "opsc-2022-gs-1"));
}

#[test]
fn every_resolved_answer_is_a_member_of_its_options() {
    let source = QuestionSource::new(Arc::new(CountingGenerator::new(question_payload(8))));
    let configs = vec![
        TestConfiguration::subject_focused("OPSC OAS", GENERAL_STUDIES, 10, 0),
        TestConfiguration::full_mock("Railways NTPC", 8, 15),
        TestConfiguration::chapter_focused("UPSC", "Polity", "Finance Commission", 8, 30),
    ];
    for config in configs {
        let questions = source.resolve(&config).expect("resolution");
        for question in &questions {
            assert!(
                question.options.contains(&question.correct_answer),
                "question {} violates the answer-in-options invariant",
                question.id
            );
        }
    }
}

#[test]
fn local_matches_precede_generated_ones() {
    // "Satyagraha" matches one OPSC bank item, below the threshold.
    let source = QuestionSource::new(Arc::new(CountingGenerator::new(question_payload(4))));
    let config = TestConfiguration::subject_focused("OPSC OAS", "Satyagraha", 5, 0);
    let questions = source.resolve(&config).expect("union resolution");
    assert_eq!(questions.len(), 5);
    assert_eq!(questions[0].id, "opsc-2022-gs-3", "bank item comes first");
    assert!(questions[1..].iter().all(|q| q.id != "opsc-2022-gs-3"));
}

#[test]
fn unavailable_source_reports_its_cause() {
    let source = QuestionSource::new(Arc::new(FailingGenerator));
    let config = TestConfiguration::full_mock("Railways NTPC", 10, 15);
    let err = source.resolve(&config).expect_err("down service");
    assert!(err.to_string().contains("unavailable"), "got: {err}");
    let cause = std::error::Error::source(&err).expect("cause preserved");
    assert!(cause.to_string().contains("unreachable"), "got: {cause}");
}
