mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use common::*;
use email_reply_assistant::models::session_state::{SessionState, SubmitError};
use email_reply_assistant::services::prompt_service::build_prompt;
use email_reply_assistant::services::workflow_service::{run_workflow, translate_reply};

#[tokio::test]
async fn test_end_to_end_order_issue() {
    init_logging();
    let generator = Arc::new(EchoGenerator::new("Thank you for reaching out. We will send a replacement."));
    let pipelines = fake_pipelines(generator, Arc::new(TaggingTranslator::new()));

    let result = run_workflow(SAMPLE_EMAIL, &pipelines).await.unwrap();

    assert_eq!(result.classification.label, "Complaint");
    assert!((0.0..=1.0).contains(&result.classification.confidence));
    assert!(!result.reply_en.is_empty());
    assert!(!result.reply_en.contains("Reply:"));
    assert!(!result.reply_en.contains("Customer email"));
    assert!(!result.reply_zh.is_empty());
    assert_eq!(result.reply_zh, result.reply_zh.trim());
}

#[tokio::test]
async fn test_every_run_calls_the_pipelines_again() {
    let generator = Arc::new(EchoGenerator::new("Happy to help."));
    let translator = Arc::new(TaggingTranslator::new());
    let pipelines = fake_pipelines(generator.clone(), translator.clone());

    run_workflow(SAMPLE_EMAIL, &pipelines).await.unwrap();
    run_workflow(SAMPLE_EMAIL, &pipelines).await.unwrap();

    assert_eq!(generator.calls.load(Ordering::SeqCst), 2);
    assert_eq!(translator.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_translation_failure_yields_no_partial_result() {
    let generator = Arc::new(EchoGenerator::new("Happy to help."));
    let pipelines = fake_pipelines(generator, Arc::new(BrokenTranslator));

    let err = run_workflow(SAMPLE_EMAIL, &pipelines).await.unwrap_err();
    assert_eq!(err.stage(), "translate");
    assert!(err.to_string().contains("translation model crashed"));
}

#[tokio::test]
async fn test_translate_blank_input() {
    let translator = TaggingTranslator::new();
    assert_eq!(translate_reply("", &translator).await.unwrap(), "");
    assert_eq!(translate_reply("   ", &translator).await.unwrap(), "");
    assert_eq!(translator.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_prompt_for_hello_complaint() {
    let prompt = build_prompt("Hello", "Complaint");
    assert!(prompt.contains("Complaint"));
    assert!(prompt.contains("Hello"));
    assert!(prompt.ends_with("Reply:"));
}

#[test]
fn test_session_lifecycle() {
    let mut state = SessionState::default();
    assert_eq!(state.submit(" \n "), Err(SubmitError::EmptyEmail));
    assert_eq!(state, SessionState::Idle);

    state.submit(SAMPLE_EMAIL).unwrap();
    assert_eq!(state.raw_email(), Some(SAMPLE_EMAIL));

    state.clear();
    assert_eq!(state, SessionState::Idle);
}
