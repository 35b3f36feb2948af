use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::generation::TextGenerator;
use crate::models::{ChallengeKind, FeedbackPayload};

/// Score reported when the evaluator's payload has no usable `overall_score`.
pub const DEFAULT_SCORE: i64 = 75;

const SYSTEM_PROMPT: &str = "You are an expert language assessment AI. Provide detailed, \
     constructive feedback in valid JSON format only.";

/// Everything the evaluator needs to know about one answer.
#[derive(Debug, Clone, Copy)]
pub struct EvaluationRequest<'a> {
    pub transcription: &'a str,
    pub challenge_type: ChallengeKind,
    pub prompt: &'a str,
    pub target_language: &'a str,
    pub expected_answer: Option<&'a str>,
    pub concept_name: &'a str,
}

/// Outcome of one evaluation call.
#[derive(Debug, Clone, PartialEq)]
pub enum Evaluation {
    /// The provider answered with a JSON object, kept verbatim.
    Scored(Map<String, Value>),
    /// The provider answered, but not with a JSON object.
    Unparsable,
    /// The call itself failed.
    Unavailable,
}

impl Evaluation {
    pub fn into_feedback(self) -> Value {
        match self {
            Evaluation::Scored(map) => Value::Object(map),
            Evaluation::Unparsable => fallback_value(FeedbackPayload::unparsable_fallback()),
            Evaluation::Unavailable => fallback_value(FeedbackPayload::unavailable_fallback()),
        }
    }
}

fn fallback_value(payload: FeedbackPayload) -> Value {
    serde_json::to_value(payload).unwrap_or(Value::Null)
}

/// Read `overall_score` from a feedback payload as an integer. Fractions are
/// truncated, numeric strings are accepted, anything else yields
/// [`DEFAULT_SCORE`].
pub fn overall_score(feedback: &Value) -> i64 {
    match feedback.get("overall_score") {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .unwrap_or(DEFAULT_SCORE),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(|f| f.trunc() as i64)
            .unwrap_or(DEFAULT_SCORE),
        _ => DEFAULT_SCORE,
    }
}

#[derive(Clone)]
pub struct Evaluator {
    generator: Arc<dyn TextGenerator>,
}

impl Evaluator {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    pub async fn evaluate(&self, request: &EvaluationRequest<'_>) -> Evaluation {
        let prompt = build_prompt(request);

        let text = match self.generator.complete(SYSTEM_PROMPT, &prompt).await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "Evaluation call failed, using fallback feedback");
                return Evaluation::Unavailable;
            }
        };

        match serde_json::from_str::<Value>(text.trim()) {
            Ok(Value::Object(map)) => {
                info!("Evaluation completed");
                Evaluation::Scored(map)
            }
            Ok(other) => {
                warn!(kind = json_kind(&other), "Evaluation was not a JSON object, using fallback feedback");
                Evaluation::Unparsable
            }
            Err(e) => {
                warn!(error = %e, "Failed to parse evaluation JSON, using fallback feedback");
                Evaluation::Unparsable
            }
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub fn build_prompt(request: &EvaluationRequest<'_>) -> String {
    let concept = request.concept_name;
    format!(
        r#"You are an expert language teacher grading a student's spoken answer.

Challenge Type: {challenge_type}
Original Prompt: {prompt}
Target Language: {target_language}
Student's Response: {transcription}
Expected Answer (if translation): {expected}
Language Concept Being Tested: {concept}

Score each of the following from 0 to 100:
1. Pronunciation, as far as it can be inferred from the text
2. Grammar correctness
3. Vocabulary appropriateness and richness
4. Fluency and naturalness
5. Concept mastery: how well the answer demonstrates {concept}

Then give an overall score from 0 to 100, written feedback, the things the
student did well and the areas to improve.

Respond with a single JSON object using exactly these keys:
{{
    "pronunciation": <score 0-100>,
    "grammar": <score 0-100>,
    "vocabulary": <score 0-100>,
    "fluency": <score 0-100>,
    "concept_mastery": <score 0-100>,
    "overall_score": <score 0-100>,
    "feedback": "detailed feedback text",
    "strengths": ["strength1", "strength2"],
    "improvements": ["area1", "area2"]
}}"#,
        challenge_type = request.challenge_type,
        prompt = request.prompt,
        target_language = request.target_language,
        transcription = request.transcription,
        expected = request.expected_answer.unwrap_or("N/A"),
    )
}
