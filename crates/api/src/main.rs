use linguacoach_api::{build_router, state::AppState};
use linguacoach_config::Settings;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file (silently ignore if missing)
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "linguacoach_api=debug,linguacoach_services=debug,linguacoach_transcription=debug,tower_http=debug"
                .into()
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load config
    let settings = Settings::load()?;
    info!("Starting LinguaCoach API on {}:{}", settings.app.host, settings.app.port);
    info!(
        base_url = %settings.openai.base_url,
        transcription_model = %settings.openai.transcription_model,
        chat_model = %settings.openai.chat_model,
        translation_target = %settings.assessment.translation_target,
        "Provider config"
    );
    if settings.openai.api_key.is_none() {
        warn!("No provider API key configured; remote calls will be unauthenticated");
    }

    let app_state = AppState::new(settings.clone())?;

    // Build router
    let app = build_router(app_state);

    // Start server
    let addr = format!("{}:{}", settings.app.host, settings.app.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
