use std::sync::Arc;

use tracing::{info, warn};

use crate::generation::TextGenerator;

/// Returned in place of a translation whenever the provider call fails.
pub const TRANSLATION_UNAVAILABLE: &str = "Translation unavailable";

#[derive(Clone)]
pub struct Translator {
    generator: Arc<dyn TextGenerator>,
}

impl Translator {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Translate `text` into `target_language`. Never fails: any provider
    /// error or blank answer yields [`TRANSLATION_UNAVAILABLE`].
    pub async fn translate(&self, text: &str, target_language: &str) -> String {
        let system = format!(
            "You are a professional translator. Translate the following text to {target_language}. \
             Only return the translation, no explanations."
        );

        match self.generator.complete(&system, text).await {
            Ok(translation) if !translation.trim().is_empty() => {
                info!(target_language, chars = translation.len(), "Translation completed");
                translation.trim().to_string()
            }
            Ok(_) => {
                warn!(target_language, "Translation came back empty");
                TRANSLATION_UNAVAILABLE.to_string()
            }
            Err(e) => {
                warn!(target_language, error = %e, "Translation failed");
                TRANSLATION_UNAVAILABLE.to_string()
            }
        }
    }
}
