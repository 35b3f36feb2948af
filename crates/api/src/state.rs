use linguacoach_config::Settings;
use linguacoach_services::AssessmentPipeline;

#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub pipeline: AssessmentPipeline,
}

impl AppState {
    pub fn new(settings: Settings) -> anyhow::Result<Self> {
        let pipeline = AssessmentPipeline::from_settings(&settings)?;
        Ok(Self::with_pipeline(settings, pipeline))
    }

    /// Build state around an already configured pipeline.
    pub fn with_pipeline(settings: Settings, pipeline: AssessmentPipeline) -> Self {
        Self { settings, pipeline }
    }
}
