use axum::{Json, extract::Path};
use linguacoach_services::{
    catalog,
    models::{Challenge, Concept},
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ConceptList {
    pub concepts: &'static [Concept],
}

#[derive(Debug, Serialize)]
pub struct ChallengeList {
    pub challenges: Vec<Challenge>,
}

pub async fn list_concepts() -> Json<ConceptList> {
    Json(ConceptList {
        concepts: catalog().concepts(),
    })
}

pub async fn list_challenges(Path(concept_id): Path<String>) -> Json<ChallengeList> {
    Json(ChallengeList {
        challenges: catalog().challenges_for(&concept_id),
    })
}
