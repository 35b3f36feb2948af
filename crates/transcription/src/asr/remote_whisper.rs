use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::multipart;

use super::{AsrBackend, AsrRequest, TranscriptionResult};

/// Whisper transcription over an OpenAI-compatible `/audio/transcriptions`
/// endpoint.
pub struct RemoteWhisperBackend {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl RemoteWhisperBackend {
    pub fn new(
        api_key: Option<String>,
        base_url: &str,
        model: &str,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build transcription HTTP client")?;
        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        })
    }
}

#[async_trait]
impl AsrBackend for RemoteWhisperBackend {
    async fn transcribe(&self, request: AsrRequest) -> anyhow::Result<TranscriptionResult> {
        let audio = tokio::fs::read(&request.audio_path)
            .await
            .with_context(|| format!("reading {}", request.audio_path.display()))?;

        let file_part = multipart::Part::bytes(audio)
            .file_name(request.file_name.clone())
            .mime_str(&request.content_type)
            .context("invalid audio content type")?;

        let mut form = multipart::Form::new()
            .text("model", self.model.clone())
            .text("response_format", "text")
            .part("file", file_part);
        if let Some(lang) = &request.language_hint {
            form = form.text("language", lang.clone());
        }

        tracing::debug!(
            model = %self.model,
            language = ?request.language_hint,
            "Sending audio to Whisper"
        );

        let mut builder = self
            .client
            .post(format!("{}/audio/transcriptions", self.base_url))
            .multipart(form);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await.context("transcription request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            anyhow::bail!("transcription service returned {status}: {body}");
        }

        let text = response
            .text()
            .await
            .context("failed to read transcription body")?;

        tracing::info!(chars = text.len(), "Whisper transcription completed");

        Ok(TranscriptionResult {
            text: text.trim().to_string(),
            language: request.language_hint,
        })
    }

    fn name(&self) -> &str {
        "remote_whisper"
    }
}
