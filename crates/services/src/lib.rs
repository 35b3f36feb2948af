pub mod assessment;
pub mod catalog;
pub mod evaluation;
pub mod generation;
pub mod models;
pub mod translation;


pub use assessment::{AssessmentError, AssessmentPipeline};
pub use catalog::{Catalog, catalog};
pub use evaluation::{Evaluation, Evaluator};
pub use generation::{ChatCompletionClient, GenerationError, TextGenerator};
pub use translation::{TRANSLATION_UNAVAILABLE, Translator};
