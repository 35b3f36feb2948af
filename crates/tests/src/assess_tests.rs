use crate::fixtures::provider_stub::{Reply, StubBehavior};
use crate::fixtures::test_app::{TestApp, assess_form, audio_part, challenge};
use serde_json::json;

#[tokio::test]
async fn translation_challenge_returns_scored_result() {
    let app = TestApp::spawn().await;

    let form = assess_form(
        &challenge("past-tense-1", "translation"),
        audio_part(b"Ayer fui al mercado", "audio/webm"),
    );
    let (status, json) = app.post_assess(form).await;

    assert_eq!(status, 200);
    assert_eq!(json["challenge_id"], "past-tense-1");
    assert_eq!(json["transcription"], "Ayer fui al mercado");
    assert!(json["translation"].is_null());
    assert_eq!(json["score"], 87);
    assert_eq!(json["feedback"]["overall_score"], 87);
    assert_eq!(json["feedback"]["strengths"], json!(["Accurate verb endings"]));
    assert!(json["timestamp"].as_str().is_some());

    assert_eq!(app.provider.transcription_calls(), 1);
    assert_eq!(app.provider.chat_calls(), 1);
    assert_eq!(app.provider.languages(), vec![Some("es".to_string())]);
    assert!(app.spool_is_empty());
}

#[tokio::test]
async fn open_ended_challenge_includes_translation() {
    let app = TestApp::spawn().await;

    let form = assess_form(
        &challenge("past-tense-2", "open-ended"),
        audio_part(b"Fui a la playa", "audio/webm"),
    );
    let (status, json) = app.post_assess(form).await;

    assert_eq!(status, 200);
    assert_eq!(json["translation"], "I went to the beach");
    assert_eq!(app.provider.chat_calls(), 2);
}

#[tokio::test]
async fn failed_translation_is_replaced_not_fatal() {
    let app = TestApp::spawn_with(StubBehavior {
        translation: Reply::Fail,
        ..Default::default()
    })
    .await;

    let form = assess_form(
        &challenge("past-tense-2", "open-ended"),
        audio_part(b"Fui a la playa", "audio/ogg"),
    );
    let (status, json) = app.post_assess(form).await;

    assert_eq!(status, 200);
    assert_eq!(json["translation"], "Translation unavailable");
    assert_eq!(json["score"], 87);
}

#[tokio::test]
async fn unparsable_evaluation_uses_first_fallback() {
    let app = TestApp::spawn_with(StubBehavior {
        evaluation: Reply::Text("Great answer, I'd give it an 8/10.".to_string()),
        ..Default::default()
    })
    .await;

    let form = assess_form(
        &challenge("past-tense-1", "translation"),
        audio_part(b"Ayer fui al mercado", "audio/webm"),
    );
    let (status, json) = app.post_assess(form).await;

    assert_eq!(status, 200);
    assert_eq!(json["score"], 76);
    assert_eq!(
        json["feedback"],
        json!({
            "pronunciation": 75,
            "grammar": 80,
            "vocabulary": 70,
            "fluency": 75,
            "concept_mastery": 78,
            "overall_score": 76,
            "feedback": "Good effort! Continue practicing to improve fluency and expand vocabulary.",
            "strengths": ["Clear pronunciation", "Good grammar foundation"],
            "improvements": ["Vocabulary expansion", "More natural expressions"]
        })
    );
}

#[tokio::test]
async fn failed_evaluation_uses_second_fallback() {
    let app = TestApp::spawn_with(StubBehavior {
        evaluation: Reply::Fail,
        ..Default::default()
    })
    .await;

    let form = assess_form(
        &challenge("past-tense-1", "translation"),
        audio_part(b"Ayer fui al mercado", "audio/webm"),
    );
    let (status, json) = app.post_assess(form).await;

    assert_eq!(status, 200);
    assert_eq!(json["score"], 75);
    assert_eq!(
        json["feedback"],
        json!({
            "pronunciation": 75,
            "grammar": 75,
            "vocabulary": 75,
            "fluency": 75,
            "concept_mastery": 75,
            "overall_score": 75,
            "feedback": "Assessment completed. Continue practicing to improve your skills.",
            "strengths": ["Completed the challenge"],
            "improvements": ["Continue regular practice"]
        })
    );
    assert!(app.spool_is_empty());
}

#[tokio::test]
async fn non_audio_upload_is_rejected() {
    let app = TestApp::spawn().await;

    let form = assess_form(
        &challenge("past-tense-1", "translation"),
        audio_part(b"just some text", "text/plain"),
    );
    let (status, json) = app.post_assess(form).await;

    assert_eq!(status, 400);
    assert_eq!(json["detail"], "Invalid audio file format");
    assert_eq!(app.provider.total_calls(), 0);
    assert!(app.spool_is_empty());
}

#[tokio::test]
async fn transcription_failure_is_a_server_error() {
    let app = TestApp::spawn().await;

    let form = assess_form(
        &challenge("past-tense-1", "open-ended"),
        audio_part(b"FAIL please", "audio/webm"),
    );
    let (status, json) = app.post_assess(form).await;

    assert_eq!(status, 500);
    let detail = json["detail"].as_str().unwrap();
    assert!(detail.starts_with("Assessment failed: Transcription failed:"), "{detail}");
    assert!(detail.contains("upstream exploded"), "{detail}");
    assert_eq!(app.provider.chat_calls(), 0);
    assert!(app.spool_is_empty());
}

#[tokio::test]
async fn missing_form_field_is_unprocessable() {
    let app = TestApp::spawn().await;

    let mut body = challenge("past-tense-1", "translation");
    body.as_object_mut().unwrap().remove("concept_name");
    let form = assess_form(&body, audio_part(b"Hola", "audio/webm"));
    let (status, json) = app.post_assess(form).await;

    assert_eq!(status, 422);
    assert_eq!(json["detail"], "Missing 'concept_name' field");
    assert_eq!(app.provider.total_calls(), 0);
}

#[tokio::test]
async fn unknown_challenge_type_is_unprocessable() {
    let app = TestApp::spawn().await;

    let form = assess_form(
        &challenge("past-tense-1", "essay"),
        audio_part(b"Hola", "audio/webm"),
    );
    let (status, _) = app.post_assess(form).await;

    assert_eq!(status, 422);
    assert_eq!(app.provider.total_calls(), 0);
}

#[tokio::test]
async fn unmapped_language_is_auto_detected() {
    let app = TestApp::spawn().await;

    let mut body = challenge("past-tense-1", "translation");
    body["target_language"] = json!("Quenya");
    body["expected_answer"] = json!("Ayer fui al mercado.");
    let form = assess_form(&body, audio_part(b"Ayer fui", "audio/webm"));
    let (status, _) = app.post_assess(form).await;

    assert_eq!(status, 200);
    assert_eq!(app.provider.languages(), vec![None]);
}
