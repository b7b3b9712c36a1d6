use std::error::Error;

use tracing::Level;
use tracing_subscriber::{Layer, filter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load environment variables from .env file, when one exists.
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("no .env file loaded: {e}");
    }

    // Global filter from RUST_LOG (default info), with the LLM library at
    // its own level.
    let env_filter = ai_llm_service::telemetry::env_filter_with_level("info", Level::INFO);

    // The LLM library ships its own scoped layer; keep the app layer from
    // rendering those events twice.
    let app_layer = fmt::layer()
        .with_target(false)
        .with_filter(filter::filter_fn(|meta| {
            !meta
                .target()
                .starts_with(ai_llm_service::telemetry::TARGET_PREFIX)
        }));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(ai_llm_service::telemetry::layer())
        .with(app_layer)
        .init();

    api::start().await?;

    Ok(())
}
