//! Built-in concepts and the challenges that exercise them.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::models::{Challenge, ChallengeKind, Concept, Difficulty};

const DEFAULT_TARGET_LANGUAGE: &str = "Spanish";

static CATALOG: LazyLock<Catalog> = LazyLock::new(Catalog::builtin);

/// Read-only access to the process-wide catalog.
pub fn catalog() -> &'static Catalog {
    &CATALOG
}

pub struct Catalog {
    concepts: Vec<Concept>,
    challenges: HashMap<String, Vec<Challenge>>,
}

impl Catalog {
    fn builtin() -> Self {
        let concepts = CONCEPTS
            .iter()
            .map(|(id, name, description, difficulty, category)| Concept {
                id: id.to_string(),
                name: name.to_string(),
                description: description.to_string(),
                difficulty: *difficulty,
                category: category.to_string(),
            })
            .collect();

        let mut challenges: HashMap<String, Vec<Challenge>> = HashMap::new();
        for (concept_id, seq, kind, prompt, expected) in CHALLENGES {
            challenges
                .entry(concept_id.to_string())
                .or_default()
                .push(Challenge {
                    id: format!("{concept_id}-{seq}"),
                    kind: *kind,
                    prompt: prompt.to_string(),
                    target_language: DEFAULT_TARGET_LANGUAGE.to_string(),
                    expected_answer: expected.map(str::to_string),
                    concept_id: concept_id.to_string(),
                });
        }

        Self {
            concepts,
            challenges,
        }
    }

    pub fn concepts(&self) -> &[Concept] {
        &self.concepts
    }

    /// Challenges for a concept. Unknown ids get two generic challenges
    /// rather than an error.
    pub fn challenges_for(&self, concept_id: &str) -> Vec<Challenge> {
        match self.challenges.get(concept_id) {
            Some(list) => list.clone(),
            None => generic_challenges(concept_id),
        }
    }
}

fn generic_challenges(concept_id: &str) -> Vec<Challenge> {
    vec![
        Challenge {
            id: format!("{concept_id}-1"),
            kind: ChallengeKind::Translation,
            prompt: "Hello, how are you today?".to_string(),
            target_language: DEFAULT_TARGET_LANGUAGE.to_string(),
            expected_answer: Some("Hola, ¿cómo estás hoy?".to_string()),
            concept_id: concept_id.to_string(),
        },
        Challenge {
            id: format!("{concept_id}-2"),
            kind: ChallengeKind::OpenEnded,
            prompt: "Tell me about your favorite hobby.".to_string(),
            target_language: DEFAULT_TARGET_LANGUAGE.to_string(),
            expected_answer: None,
            concept_id: concept_id.to_string(),
        },
    ]
}

type ConceptRow = (&'static str, &'static str, &'static str, Difficulty, &'static str);

const CONCEPTS: &[ConceptRow] = &[
    (
        "past-tense",
        "Past Tense",
        "Master the use of past tense in various contexts",
        Difficulty::Intermediate,
        "Grammar",
    ),
    (
        "subjunctive-mood",
        "Subjunctive Mood",
        "Express doubt, emotion, and hypothetical situations",
        Difficulty::Advanced,
        "Grammar",
    ),
    (
        "travel-vocabulary",
        "Travel Vocabulary",
        "Essential words and phrases for traveling",
        Difficulty::Beginner,
        "Vocabulary",
    ),
    (
        "business-communication",
        "Business Communication",
        "Professional language for workplace interactions",
        Difficulty::Advanced,
        "Communication",
    ),
    (
        "conditional-sentences",
        "Conditional Sentences",
        "If-then statements and hypothetical scenarios",
        Difficulty::Intermediate,
        "Grammar",
    ),
    (
        "food-dining",
        "Food & Dining",
        "Restaurant vocabulary and food-related expressions",
        Difficulty::Beginner,
        "Vocabulary",
    ),
    (
        "expressing-emotions",
        "Expressing Emotions",
        "Vocabulary and structures for describing feelings",
        Difficulty::Intermediate,
        "Communication",
    ),
    (
        "formal-informal",
        "Formal vs Informal Speech",
        "Appropriate register for different social contexts",
        Difficulty::Advanced,
        "Communication",
    ),
];

type ChallengeRow = (
    &'static str,
    u32,
    ChallengeKind,
    &'static str,
    Option<&'static str>,
);

const CHALLENGES: &[ChallengeRow] = &[
    (
        "past-tense",
        1,
        ChallengeKind::Translation,
        "I went to the market yesterday and bought fresh bread.",
        Some("Ayer fui al mercado y compré pan fresco."),
    ),
    (
        "past-tense",
        2,
        ChallengeKind::OpenEnded,
        "Describe what you did last weekend.",
        None,
    ),
    (
        "subjunctive-mood",
        1,
        ChallengeKind::Translation,
        "I hope that you have a wonderful trip.",
        Some("Espero que tengas un viaje maravilloso."),
    ),
    (
        "subjunctive-mood",
        2,
        ChallengeKind::OpenEnded,
        "Talk about something you would like your friends to do for you, and why.",
        None,
    ),
    (
        "travel-vocabulary",
        1,
        ChallengeKind::Translation,
        "Where is the train station? I need to buy a ticket.",
        Some("¿Dónde está la estación de tren? Necesito comprar un boleto."),
    ),
    (
        "travel-vocabulary",
        2,
        ChallengeKind::OpenEnded,
        "Tell the hotel receptionist that something is wrong with your room and ask for help.",
        None,
    ),
    (
        "business-communication",
        1,
        ChallengeKind::Translation,
        "Could we schedule a meeting for next Tuesday?",
        Some("¿Podríamos programar una reunión para el próximo martes?"),
    ),
    (
        "business-communication",
        2,
        ChallengeKind::OpenEnded,
        "Introduce yourself and your role at a professional networking event.",
        None,
    ),
    (
        "conditional-sentences",
        1,
        ChallengeKind::Translation,
        "If I had more time, I would learn to play the guitar.",
        Some("Si tuviera más tiempo, aprendería a tocar la guitarra."),
    ),
    (
        "conditional-sentences",
        2,
        ChallengeKind::OpenEnded,
        "What would you do if you won the lottery?",
        None,
    ),
    (
        "food-dining",
        1,
        ChallengeKind::Translation,
        "I would like a table for two, please.",
        Some("Quisiera una mesa para dos, por favor."),
    ),
    (
        "food-dining",
        2,
        ChallengeKind::OpenEnded,
        "Order a three-course meal and ask the waiter about one of the dishes.",
        None,
    ),
    (
        "expressing-emotions",
        1,
        ChallengeKind::Translation,
        "I am very happy because my sister is coming to visit.",
        Some("Estoy muy feliz porque mi hermana viene de visita."),
    ),
    (
        "expressing-emotions",
        2,
        ChallengeKind::OpenEnded,
        "Describe a moment when you felt proud of yourself.",
        None,
    ),
    (
        "formal-informal",
        1,
        ChallengeKind::Translation,
        "Excuse me, sir, could you tell me what time it is?",
        Some("Disculpe, señor, ¿podría decirme qué hora es?"),
    ),
    (
        "formal-informal",
        2,
        ChallengeKind::OpenEnded,
        "Greet a close friend, then greet your new manager, and explain what you changed.",
        None,
    ),
];
