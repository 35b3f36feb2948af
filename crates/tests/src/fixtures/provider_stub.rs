use std::net::SocketAddr;
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use axum::{
    Json, Router,
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use serde_json::{Value, json};
use tokio::net::TcpListener;

/// Evaluation payload the stub returns unless told otherwise.
pub const SCORED_EVALUATION: &str = r#"{
    "pronunciation": 90,
    "grammar": 85,
    "vocabulary": 80,
    "fluency": 88,
    "concept_mastery": 92,
    "overall_score": 87,
    "feedback": "Muy bien, the past tense is used correctly.",
    "strengths": ["Accurate verb endings"],
    "improvements": ["Use more linking words"]
}"#;

/// Audio whose bytes start with this marker makes the transcription endpoint fail.
pub const FAILING_AUDIO_PREFIX: &[u8] = b"FAIL";

#[derive(Debug, Clone)]
pub enum Reply {
    Text(String),
    Fail,
}

/// How the stub answers chat completions, split by the kind of request.
#[derive(Debug, Clone)]
pub struct StubBehavior {
    pub translation: Reply,
    pub evaluation: Reply,
}

impl Default for StubBehavior {
    fn default() -> Self {
        Self {
            translation: Reply::Text("I went to the beach".to_string()),
            evaluation: Reply::Text(SCORED_EVALUATION.to_string()),
        }
    }
}

#[derive(Default)]
struct StubState {
    behavior: Mutex<StubBehavior>,
    transcriptions: AtomicUsize,
    chats: AtomicUsize,
    languages: Mutex<Vec<Option<String>>>,
}

/// Stand-in for the transcription and chat-completion provider.
pub struct ProviderStub {
    pub addr: SocketAddr,
    pub base_url: String,
    state: Arc<StubState>,
}

impl ProviderStub {
    pub async fn spawn(behavior: StubBehavior) -> Self {
        let state = Arc::new(StubState {
            behavior: Mutex::new(behavior),
            ..Default::default()
        });

        let app = Router::new()
            .route("/v1/audio/transcriptions", post(transcriptions))
            .route("/v1/chat/completions", post(chat_completions))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind provider stub");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            base_url: format!("http://{}/v1", addr),
            state,
        }
    }

    pub fn transcription_calls(&self) -> usize {
        self.state.transcriptions.load(Ordering::SeqCst)
    }

    pub fn chat_calls(&self) -> usize {
        self.state.chats.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        self.transcription_calls() + self.chat_calls()
    }

    /// Language hints received by the transcription endpoint, in call order.
    pub fn languages(&self) -> Vec<Option<String>> {
        self.state.languages.lock().unwrap().clone()
    }
}

async fn transcriptions(State(state): State<Arc<StubState>>, mut multipart: Multipart) -> Response {
    state.transcriptions.fetch_add(1, Ordering::SeqCst);

    let mut audio = Vec::new();
    let mut language = None;
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => audio = field.bytes().await.map(|b| b.to_vec()).unwrap_or_default(),
            "language" => language = field.text().await.ok(),
            _ => {}
        }
    }
    state.languages.lock().unwrap().push(language);

    if audio.starts_with(FAILING_AUDIO_PREFIX) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response();
    }

    // Echo the audio bytes back as the transcript.
    (StatusCode::OK, format!("  {}\n", String::from_utf8_lossy(&audio))).into_response()
}

async fn chat_completions(State(state): State<Arc<StubState>>, Json(body): Json<Value>) -> Response {
    state.chats.fetch_add(1, Ordering::SeqCst);

    let system = body["messages"][0]["content"].as_str().unwrap_or("");
    let reply = {
        let behavior = state.behavior.lock().unwrap();
        if system.contains("translator") {
            behavior.translation.clone()
        } else {
            behavior.evaluation.clone()
        }
    };

    match reply {
        Reply::Text(content) => Json(json!({
            "choices": [{ "message": { "role": "assistant", "content": content } }]
        }))
        .into_response(),
        Reply::Fail => (StatusCode::SERVICE_UNAVAILABLE, "overloaded").into_response(),
    }
}
