use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use linguacoach_config::Settings;
use linguacoach_transcription::{AsrBackend, AsrRequest, RemoteWhisperBackend, language_code};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{error, info};

use crate::evaluation::{EvaluationRequest, Evaluator, overall_score};
use crate::generation::{ChatCompletionClient, TextGenerator};
use crate::models::{
    AssessmentResult, AudioUpload, BatchEntry, BatchItemError, ChallengeKind, ChallengeMetadata,
    Submission,
};
use crate::translation::Translator;

const DEFAULT_AUDIO_NAME: &str = "recording.webm";
const DEFAULT_AUDIO_EXTENSION: &str = "webm";

#[derive(Debug, Error)]
pub enum AssessmentError {
    #[error("Invalid audio file format")]
    InvalidAudio,
    #[error("Number of challenges must match number of audio files")]
    BatchLengthMismatch { challenges: usize, audio_files: usize },
    #[error("Transcription failed: {0}")]
    Transcription(String),
    #[error("Failed to spool audio: {0}")]
    Spool(#[from] std::io::Error),
}

impl AssessmentError {
    /// Whether the caller sent something unusable, as opposed to a failure on our side.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AssessmentError::InvalidAudio | AssessmentError::BatchLengthMismatch { .. }
        )
    }
}

/// Transcribe, optionally translate, then evaluate one recorded answer.
#[derive(Clone)]
pub struct AssessmentPipeline {
    asr: Arc<dyn AsrBackend>,
    translator: Translator,
    evaluator: Evaluator,
    translation_target: String,
    temp_dir: Option<PathBuf>,
}

impl AssessmentPipeline {
    pub fn new(
        asr: Arc<dyn AsrBackend>,
        generator: Arc<dyn TextGenerator>,
        translation_target: impl Into<String>,
        temp_dir: Option<PathBuf>,
    ) -> Self {
        Self {
            asr,
            translator: Translator::new(generator.clone()),
            evaluator: Evaluator::new(generator),
            translation_target: translation_target.into(),
            temp_dir,
        }
    }

    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let openai = &settings.openai;
        let timeout = Duration::from_secs(openai.timeout_secs);

        let asr = RemoteWhisperBackend::new(
            openai.api_key.clone(),
            &openai.base_url,
            &openai.transcription_model,
            timeout,
        )?;
        let chat = ChatCompletionClient::new(
            openai.api_key.clone(),
            &openai.base_url,
            &openai.chat_model,
            timeout,
        )?;

        Ok(Self::new(
            Arc::new(asr),
            Arc::new(chat),
            settings.assessment.translation_target.clone(),
            settings.assessment.temp_dir.as_ref().map(PathBuf::from),
        ))
    }

    pub async fn assess(&self, submission: &Submission) -> Result<AssessmentResult, AssessmentError> {
        let challenge = &submission.challenge;
        let audio = &submission.audio;

        if !audio.is_audio() {
            return Err(AssessmentError::InvalidAudio);
        }

        // Removed from disk when dropped, on every return path below.
        let spooled = self.spool(audio).await?;

        info!(
            challenge_id = %challenge.challenge_id,
            challenge_type = %challenge.challenge_type,
            bytes = audio.bytes.len(),
            "Processing assessment"
        );

        let transcription = self
            .transcribe(spooled.path(), audio, &challenge.target_language)
            .await?;
        info!(transcription = preview(&transcription), "Transcription completed");

        let translation = match challenge.challenge_type {
            ChallengeKind::OpenEnded => Some(
                self.translator
                    .translate(&transcription, &self.translation_target)
                    .await,
            ),
            ChallengeKind::Translation => None,
        };

        let evaluation = self
            .evaluator
            .evaluate(&EvaluationRequest {
                transcription: &transcription,
                challenge_type: challenge.challenge_type,
                prompt: &challenge.prompt,
                target_language: &challenge.target_language,
                expected_answer: challenge.expected_answer.as_deref(),
                concept_name: &challenge.concept_name,
            })
            .await;

        let feedback = evaluation.into_feedback();
        let score = overall_score(&feedback);

        Ok(AssessmentResult {
            challenge_id: challenge.challenge_id.clone(),
            transcription,
            translation,
            score,
            feedback,
            timestamp: now(),
        })
    }

    /// Assess `challenges[i]` against `audio_files[i]`, one after another.
    /// A failing item is recorded in place and does not stop the rest.
    pub async fn assess_batch(
        &self,
        challenges: Vec<ChallengeMetadata>,
        audio_files: Vec<AudioUpload>,
    ) -> Result<Vec<BatchEntry>, AssessmentError> {
        if challenges.len() != audio_files.len() {
            return Err(AssessmentError::BatchLengthMismatch {
                challenges: challenges.len(),
                audio_files: audio_files.len(),
            });
        }

        let mut results = Vec::with_capacity(challenges.len());
        for (index, (challenge, audio)) in challenges.into_iter().zip(audio_files).enumerate() {
            let submission = Submission { challenge, audio };
            match self.assess(&submission).await {
                Ok(result) => results.push(BatchEntry::Assessed(result)),
                Err(e) => {
                    error!(
                        index,
                        challenge_id = %submission.challenge.challenge_id,
                        error = %e,
                        "Failed to assess batch item"
                    );
                    results.push(BatchEntry::Failed(BatchItemError {
                        challenge_id: submission.challenge.challenge_id,
                        error: e.to_string(),
                        timestamp: now(),
                    }));
                }
            }
        }

        Ok(results)
    }

    async fn spool(&self, audio: &AudioUpload) -> Result<NamedTempFile, AssessmentError> {
        let suffix = format!(".{}", audio_extension(audio.file_name.as_deref()));
        let mut builder = tempfile::Builder::new();
        builder.prefix("linguacoach-").suffix(&suffix);

        let file = match &self.temp_dir {
            Some(dir) => {
                tokio::fs::create_dir_all(dir).await?;
                builder.tempfile_in(dir)?
            }
            None => builder.tempfile()?,
        };
        tokio::fs::write(file.path(), &audio.bytes).await?;
        Ok(file)
    }

    async fn transcribe(
        &self,
        path: &Path,
        audio: &AudioUpload,
        target_language: &str,
    ) -> Result<String, AssessmentError> {
        let request = AsrRequest {
            audio_path: path.to_path_buf(),
            file_name: audio
                .file_name
                .clone()
                .unwrap_or_else(|| DEFAULT_AUDIO_NAME.to_string()),
            content_type: audio
                .content_type
                .clone()
                .unwrap_or_else(|| format!("audio/{DEFAULT_AUDIO_EXTENSION}")),
            language_hint: language_code(target_language).map(str::to_string),
        };

        match self.asr.transcribe(request).await {
            Ok(result) => Ok(result.text.trim().to_string()),
            Err(e) => {
                error!(backend = self.asr.name(), error = %e, "Transcription failed");
                Err(AssessmentError::Transcription(format!("{e:#}")))
            }
        }
    }
}

fn audio_extension(file_name: Option<&str>) -> &str {
    file_name
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .unwrap_or(DEFAULT_AUDIO_EXTENSION)
}

fn preview(text: &str) -> &str {
    match text.char_indices().nth(100) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

fn now() -> String {
    Utc::now().to_rfc3339()
}
