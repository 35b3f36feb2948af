use crate::fixtures::test_app::TestApp;
use serde_json::Value;

#[tokio::test]
async fn list_concepts() {
    let app = TestApp::spawn().await;

    let resp = app.client.get(app.url("/concepts")).send().await.unwrap();

    assert_eq!(resp.status().as_u16(), 200);
    let json: Value = resp.json().await.unwrap();
    let concepts = json["concepts"].as_array().unwrap();
    assert_eq!(concepts.len(), 8);
    assert_eq!(concepts[7]["id"], "formal-informal");
    assert_eq!(concepts[7]["category"], "Communication");
}

#[tokio::test]
async fn known_concept_challenges() {
    let app = TestApp::spawn().await;

    let resp = app
        .client
        .get(app.url("/concepts/conditional-sentences/challenges"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 200);
    let json: Value = resp.json().await.unwrap();
    let challenges = json["challenges"].as_array().unwrap();
    assert!(!challenges.is_empty());
    for c in challenges {
        assert_eq!(c["conceptId"], "conditional-sentences");
        assert!(c["type"] == "translation" || c["type"] == "open-ended");
        assert_eq!(c["targetLanguage"], "Spanish");
    }
}

#[tokio::test]
async fn unknown_concept_returns_two_placeholders() {
    let app = TestApp::spawn().await;

    let resp = app
        .client
        .get(app.url("/concepts/origami/challenges"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 200);
    let json: Value = resp.json().await.unwrap();
    let challenges = json["challenges"].as_array().unwrap();
    assert_eq!(challenges.len(), 2);
    assert_eq!(challenges[0]["id"], "origami-1");
    assert_eq!(challenges[1]["id"], "origami-2");
    assert!(challenges.iter().all(|c| c["conceptId"] == "origami"));
}

#[tokio::test]
async fn cors_allows_configured_origin() {
    let app = TestApp::spawn().await;

    let resp = app
        .client
        .get(app.url("/health"))
        .header("Origin", "http://localhost:5173")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 200);
    assert_eq!(
        resp.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("http://localhost:5173")
    );
    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["status"], "healthy");
}
