use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChallengeKind {
    Translation,
    OpenEnded,
}

impl ChallengeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChallengeKind::Translation => "translation",
            ChallengeKind::OpenEnded => "open-ended",
        }
    }
}

impl fmt::Display for ChallengeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChallengeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "translation" => Ok(ChallengeKind::Translation),
            "open-ended" => Ok(ChallengeKind::OpenEnded),
            other => Err(format!(
                "Unknown challenge_type '{other}', expected 'translation' or 'open-ended'"
            )),
        }
    }
}

/// Challenge metadata sent alongside a recording.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChallengeMetadata {
    pub challenge_id: String,
    pub challenge_type: ChallengeKind,
    pub prompt: String,
    pub target_language: String,
    #[serde(default)]
    pub expected_answer: Option<String>,
    pub concept_id: String,
    pub concept_name: String,
}

/// Raw uploaded recording as received from the client.
#[derive(Debug, Clone)]
pub struct AudioUpload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl AudioUpload {
    pub fn is_audio(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.starts_with("audio/"))
    }
}

#[derive(Debug, Clone)]
pub struct Submission {
    pub challenge: ChallengeMetadata,
    pub audio: AudioUpload,
}

/// Structured evaluation of one answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackPayload {
    pub pronunciation: i64,
    pub grammar: i64,
    pub vocabulary: i64,
    pub fluency: i64,
    pub concept_mastery: i64,
    pub overall_score: i64,
    pub feedback: String,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
}

impl FeedbackPayload {
    /// Substituted when the evaluator answered with something that is not a JSON object.
    pub fn unparsable_fallback() -> Self {
        Self {
            pronunciation: 75,
            grammar: 80,
            vocabulary: 70,
            fluency: 75,
            concept_mastery: 78,
            overall_score: 76,
            feedback: "Good effort! Continue practicing to improve fluency and expand vocabulary."
                .to_string(),
            strengths: vec![
                "Clear pronunciation".to_string(),
                "Good grammar foundation".to_string(),
            ],
            improvements: vec![
                "Vocabulary expansion".to_string(),
                "More natural expressions".to_string(),
            ],
        }
    }

    /// Substituted when the evaluation call itself failed.
    pub fn unavailable_fallback() -> Self {
        Self {
            pronunciation: 75,
            grammar: 75,
            vocabulary: 75,
            fluency: 75,
            concept_mastery: 75,
            overall_score: 75,
            feedback: "Assessment completed. Continue practicing to improve your skills."
                .to_string(),
            strengths: vec!["Completed the challenge".to_string()],
            improvements: vec!["Continue regular practice".to_string()],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub challenge_id: String,
    pub transcription: String,
    pub translation: Option<String>,
    pub score: i64,
    /// Evaluator payload, passed through verbatim.
    pub feedback: serde_json::Value,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchItemError {
    pub challenge_id: String,
    pub error: String,
    pub timestamp: String,
}

/// One position of a batch response.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum BatchEntry {
    Assessed(AssessmentResult),
    Failed(BatchItemError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Concept {
    pub id: String,
    pub name: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub category: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Challenge {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ChallengeKind,
    pub prompt: String,
    pub target_language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_answer: Option<String>,
    pub concept_id: String,
}
