use std::collections::HashMap;

use axum::{
    Json,
    extract::{Multipart, State, multipart::Field},
};
use linguacoach_services::models::{
    AssessmentResult, AudioUpload, BatchEntry, ChallengeKind, ChallengeMetadata, Submission,
};
use serde::Serialize;

use crate::{error::ApiError, state::AppState};

#[derive(Debug, Serialize)]
pub struct BatchResponse {
    pub results: Vec<BatchEntry>,
}

/// Assess one recorded answer.
/// Fields: `audio` (binary), `challenge_id`, `challenge_type`, `prompt`,
/// `target_language`, `concept_id`, `concept_name`, optional `expected_answer`.
pub async fn assess(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AssessmentResult>, ApiError> {
    let mut audio: Option<AudioUpload> = None;
    let mut fields: HashMap<String, String> = HashMap::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Multipart error: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "audio" => audio = Some(read_audio(field).await?),
            "" => {}
            _ => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read field: {}", e)))?;
                fields.insert(name.clone(), text);
            }
        }
    }

    let audio = audio.ok_or_else(|| ApiError::Validation("Missing 'audio' field".to_string()))?;
    let challenge = ChallengeMetadata {
        challenge_id: take_required(&mut fields, "challenge_id")?,
        challenge_type: take_required(&mut fields, "challenge_type")?
            .parse::<ChallengeKind>()
            .map_err(ApiError::Validation)?,
        prompt: take_required(&mut fields, "prompt")?,
        target_language: take_required(&mut fields, "target_language")?,
        expected_answer: fields.remove("expected_answer").filter(|s| !s.is_empty()),
        concept_id: take_required(&mut fields, "concept_id")?,
        concept_name: take_required(&mut fields, "concept_name")?,
    };

    let result = state
        .pipeline
        .assess(&Submission { challenge, audio })
        .await?;

    Ok(Json(result))
}

/// Assess several answers in one request.
/// Fields: `challenges` (JSON array of challenge metadata) and one
/// `audio_files` part per challenge, matched by position.
pub async fn batch_assess(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<BatchResponse>, ApiError> {
    let mut challenges: Option<Vec<ChallengeMetadata>> = None;
    let mut audio_files: Vec<AudioUpload> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Multipart error: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "challenges" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read field: {}", e)))?;
                let parsed = serde_json::from_str(&text)
                    .map_err(|e| ApiError::Validation(format!("Invalid 'challenges': {}", e)))?;
                challenges = Some(parsed);
            }
            "audio_files" => audio_files.push(read_audio(field).await?),
            _ => {}
        }
    }

    let challenges = challenges
        .ok_or_else(|| ApiError::Validation("Missing 'challenges' field".to_string()))?;

    let results = state.pipeline.assess_batch(challenges, audio_files).await?;

    Ok(Json(BatchResponse { results }))
}

async fn read_audio(field: Field<'_>) -> Result<AudioUpload, ApiError> {
    let file_name = field.file_name().map(str::to_string);
    let content_type = field.content_type().map(str::to_string);
    let bytes = field
        .bytes()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read file: {}", e)))?;

    Ok(AudioUpload {
        file_name,
        content_type,
        bytes: bytes.to_vec(),
    })
}

fn take_required(fields: &mut HashMap<String, String>, name: &str) -> Result<String, ApiError> {
    fields
        .remove(name)
        .ok_or_else(|| ApiError::Validation(format!("Missing '{}' field", name)))
}
