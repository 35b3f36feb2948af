use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub app: AppSettings,
    pub openai: OpenAiSettings,
    pub assessment: AssessmentSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub host: String,
    pub port: u16,
    /// Allowed browser origins. Empty means any origin.
    pub cors_origins: Vec<String>,
    pub max_upload_bytes: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OpenAiSettings {
    pub api_key: Option<String>,
    pub base_url: String,
    pub transcription_model: String,
    pub chat_model: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AssessmentSettings {
    /// Language every open-ended transcript is translated into.
    pub translation_target: String,
    /// Where uploaded audio is spooled while a submission is processed.
    pub temp_dir: Option<String>,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(
                Environment::default()
                    .separator("__")
                    .prefix("LINGUACOACH"),
            )
            .set_default("app.host", "0.0.0.0")?
            .set_default("app.port", 8000)?
            .set_default(
                "app.cors_origins",
                vec!["http://localhost:5173", "http://localhost:3000"],
            )?
            .set_default("app.max_upload_bytes", 25 * 1024 * 1024)?
            .set_default("openai.api_key", None::<String>)?
            .set_default("openai.base_url", "https://api.openai.com/v1")?
            .set_default("openai.transcription_model", "whisper-1")?
            .set_default("openai.chat_model", "gpt-5-nano")?
            .set_default("openai.timeout_secs", 120)?
            .set_default("assessment.translation_target", "English")?
            .set_default("assessment.temp_dir", None::<String>)?
            .build()?;

        let mut settings: Settings = config.try_deserialize()?;
        if settings.openai.api_key.is_none() {
            settings.openai.api_key = std::env::var("OPENAI_API_KEY").ok();
        }
        Ok(settings)
    }
}
