//! End-to-end turn pipeline scenarios against the mock backend

use medscreen_chat::{MockBackend, Session, TurnOutcome, TurnPipeline};
use medscreen_classifiers::Lexicon;
use medscreen_policy::{diagnosis_deflection, prescription_deflection, SYSTEM_PROMPT};
use std::sync::Arc;

fn pipeline_with(mock: Arc<MockBackend>) -> TurnPipeline {
    TurnPipeline::new(mock).unwrap()
}

#[tokio::test]
async fn emergency_short_circuits_before_the_model() {
    let mock = Arc::new(MockBackend::new());
    let pipeline = pipeline_with(mock.clone());
    let mut session = Session::new();

    let outcome = pipeline
        .process_turn(&mut session, "I think I'm having chest pain")
        .await
        .unwrap();

    match &outcome {
        TurnOutcome::Emergency { term, reply } => {
            assert_eq!(term, "chest pain");
            assert!(reply.contains("\"chest pain\""));
            assert!(reply.contains("emergency"));
        }
        other => panic!("expected emergency outcome, got {}", other.stage()),
    }
    assert_eq!(mock.call_count(), 0, "model must not be called");
    assert_eq!(session.blocked_count(), 0);
    assert_eq!(session.message_count(), 2);
}

#[tokio::test]
async fn emergency_wins_over_prohibited_overlap() {
    // "chest pain" sits in both keyword lists; the emergency stage runs
    // first, so the blocked counter must stay untouched.
    let mock = Arc::new(MockBackend::new());
    let pipeline = pipeline_with(mock.clone());
    let mut session = Session::new();

    let outcome = pipeline
        .process_turn(&mut session, "chest pain and i want a prescription")
        .await
        .unwrap();

    assert!(matches!(outcome, TurnOutcome::Emergency { .. }));
    assert_eq!(session.blocked_count(), 0);
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn prohibited_query_is_refused_and_counted() {
    let mock = Arc::new(MockBackend::new());
    let pipeline = pipeline_with(mock.clone());
    let mut session = Session::new();

    let outcome = pipeline
        .process_turn(&mut session, "what medicine should i take for a headache")
        .await
        .unwrap();

    match &outcome {
        TurnOutcome::Blocked { term, reply } => {
            assert_eq!(term, "what medicine should i take");
            assert!(reply.contains("\"what medicine should i take\""));
        }
        other => panic!("expected blocked outcome, got {}", other.stage()),
    }
    assert_eq!(session.blocked_count(), 1);
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn blocked_counter_increments_once_per_prohibited_turn() {
    let mock = Arc::new(MockBackend::new());
    let pipeline = pipeline_with(mock.clone());
    let mut session = Session::new();

    pipeline
        .process_turn(&mut session, "tell me a lethal dose")
        .await
        .unwrap();
    pipeline
        .process_turn(&mut session, "where to buy fentanyl")
        .await
        .unwrap();

    assert_eq!(session.blocked_count(), 2);

    session.clear();
    assert_eq!(session.blocked_count(), 0);
    assert_eq!(session.message_count(), 0);
}

#[tokio::test]
async fn diagnosis_request_gets_fixed_deflection() {
    let mock = Arc::new(MockBackend::new());
    let pipeline = pipeline_with(mock.clone());
    let mut session = Session::new();

    let outcome = pipeline
        .process_turn(&mut session, "is this normal tiredness")
        .await
        .unwrap();

    match &outcome {
        TurnOutcome::DiagnosisDeflected { reply } => {
            assert_eq!(reply, diagnosis_deflection());
        }
        other => panic!("expected diagnosis deflection, got {}", other.stage()),
    }
    assert_eq!(session.blocked_count(), 0);
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn prescription_request_gets_fixed_deflection() {
    let mock = Arc::new(MockBackend::new());
    let pipeline = pipeline_with(mock.clone());
    let mut session = Session::new();

    let outcome = pipeline
        .process_turn(&mut session, "can i take ibuprofen on an empty stomach")
        .await
        .unwrap();

    match &outcome {
        TurnOutcome::PrescriptionDeflected { reply } => {
            assert_eq!(reply, prescription_deflection());
        }
        other => panic!("expected prescription deflection, got {}", other.stage()),
    }
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn warning_topic_adds_disclaimer_and_footer() {
    let mock = Arc::new(MockBackend::with_script([
        "Keep the room cool and offer fluids.",
    ]));
    let pipeline = pipeline_with(mock.clone());
    let mut session = Session::new();

    let outcome = pipeline
        .process_turn(&mut session, "my baby has a fever, any general advice?")
        .await
        .unwrap();

    match &outcome {
        TurnOutcome::Answered { reply } => {
            assert!(reply.starts_with("Keep the room cool and offer fluids."));
            assert!(reply.contains("Pediatric Notice"));
            assert!(reply.contains("educational information"));
        }
        other => panic!("expected answered outcome, got {}", other.stage()),
    }
    assert_eq!(mock.call_count(), 1);
    assert_eq!(session.blocked_count(), 0);
}

#[tokio::test]
async fn clean_reply_still_gets_universal_footer() {
    let mock = Arc::new(MockBackend::with_script(["Sunscreen blocks UV light."]));
    let pipeline = pipeline_with(mock.clone());
    let mut session = Session::new();

    let outcome = pipeline
        .process_turn(&mut session, "how does sunscreen work")
        .await
        .unwrap();

    let reply = outcome.reply();
    assert!(reply.starts_with("Sunscreen blocks UV light."));
    assert!(reply.contains("educational information"));
    // No warning keyword in the turn, so no topic disclaimer either.
    assert!(!reply.contains("Notice:"));
}

#[tokio::test]
async fn prompt_carries_system_instruction_and_full_history() {
    let mock = Arc::new(MockBackend::with_script(["ok", "ok again"]));
    let pipeline = pipeline_with(mock.clone());
    let mut session = Session::new();

    pipeline
        .process_turn(&mut session, "how do vaccines work")
        .await
        .unwrap();
    pipeline
        .process_turn(&mut session, "and how long do they last")
        .await
        .unwrap();

    let prompts = mock.prompts();
    assert_eq!(prompts.len(), 2);
    assert!(prompts[0].starts_with(SYSTEM_PROMPT));
    assert!(prompts[0].contains("User: how do vaccines work\n"));
    // The second prompt replays the first exchange in order.
    let second = &prompts[1];
    let user1 = second.find("User: how do vaccines work").unwrap();
    let assistant1 = second.find("Assistant: ok").unwrap();
    let user2 = second.find("User: and how long do they last").unwrap();
    assert!(user1 < assistant1 && assistant1 < user2);
}

#[tokio::test]
async fn backend_failure_surfaces_as_chat_message() {
    let mock = Arc::new(MockBackend::failing("quota exceeded"));
    let pipeline = pipeline_with(mock.clone());
    let mut session = Session::new();

    let outcome = pipeline
        .process_turn(&mut session, "general question about sleep")
        .await
        .unwrap();

    match &outcome {
        TurnOutcome::BackendFailed { reply } => {
            assert!(reply.contains("quota exceeded"));
            assert!(reply.contains("try again"));
        }
        other => panic!("expected backend failure outcome, got {}", other.stage()),
    }
    assert_eq!(session.blocked_count(), 0);
    assert_eq!(session.message_count(), 2, "user + assistant, same as success");

    let last = session.turns().last().unwrap();
    assert_eq!(last.content, outcome.reply());
}

#[tokio::test]
async fn history_is_trimmed_after_every_branch() {
    let mock = Arc::new(MockBackend::new());
    let pipeline = TurnPipeline::with_lexicon(mock.clone(), &Lexicon::default(), 6).unwrap();
    let mut session = Session::new();

    for _ in 0..3 {
        pipeline
            .process_turn(&mut session, "what is a balanced diet")
            .await
            .unwrap();
    }
    assert_eq!(session.message_count(), 6);

    // A guardrail branch must trim too.
    pipeline
        .process_turn(&mut session, "I think I'm having chest pain")
        .await
        .unwrap();
    assert_eq!(session.message_count(), 6);

    let last = session.turns().last().unwrap();
    assert!(last.content.contains("EMERGENCY"));
}

#[tokio::test]
async fn screening_is_idempotent_across_turns() {
    let mock = Arc::new(MockBackend::new());
    let pipeline = pipeline_with(mock.clone());

    let mut first = Session::new();
    let mut second = Session::new();
    let a = pipeline
        .process_turn(&mut first, "is this normal tiredness")
        .await
        .unwrap();
    let b = pipeline
        .process_turn(&mut second, "is this normal tiredness")
        .await
        .unwrap();

    assert_eq!(a.stage(), b.stage());
    assert_eq!(a.reply(), b.reply());
}

#[tokio::test]
async fn custom_lexicon_drives_the_screen() {
    let yaml = r#"
emergency:
  - "code blue"
prohibited:
  - "forbidden topic"
warning:
  - "caution"
diagnosis_requests:
  - "what ails me"
prescription_requests:
  - "dose me"
"#;
    let lexicon = Lexicon::from_yaml(yaml).unwrap();
    let mock = Arc::new(MockBackend::new());
    let pipeline = TurnPipeline::with_lexicon(mock.clone(), &lexicon, 20).unwrap();
    let mut session = Session::new();

    let outcome = pipeline
        .process_turn(&mut session, "nurse shouted code blue")
        .await
        .unwrap();
    assert!(matches!(outcome, TurnOutcome::Emergency { .. }));

    // The built-in emergency vocabulary is replaced, not merged.
    let outcome = pipeline
        .process_turn(&mut session, "I think I'm having chest pain")
        .await
        .unwrap();
    assert!(matches!(outcome, TurnOutcome::Answered { .. }));
    assert_eq!(mock.call_count(), 1);
}
