pub mod remote_whisper;

use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Request to transcribe one recorded answer.
#[derive(Debug, Clone)]
pub struct AsrRequest {
    /// Spooled audio file. Only guaranteed to exist for the duration of the call.
    pub audio_path: PathBuf,
    /// File name reported to the provider; its extension drives format detection.
    pub file_name: String,
    pub content_type: String,
    /// Optional language hint (ISO 639-1, e.g. "es", "de").
    pub language_hint: Option<String>,
}

/// Result of an ASR transcription.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptionResult {
    pub text: String,
    pub language: Option<String>,
}

/// Trait for pluggable ASR backends.
#[async_trait]
pub trait AsrBackend: Send + Sync + 'static {
    /// Transcribes a complete recording.
    async fn transcribe(&self, request: AsrRequest) -> anyhow::Result<TranscriptionResult>;

    /// Human-readable backend name.
    fn name(&self) -> &str;
}
