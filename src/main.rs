use animal_quiz::{
    config::Config,
    errors::AppError,
    handlers::AppState,
    images::OpenAiImageProvider,
    routes::create_router,
    store::RedisResultStore,
    synthesis::OpenAiSynthesizer,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize tracing (logging)
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "animal_quiz=debug,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration (loads .env if present) ---
    let config = Config::load()?;
    tracing::info!(bind_address = %config.bind_address, "Configuration loaded");

    // --- Result store ---
    tracing::info!("Connecting to the Redis result store...");
    let store = RedisResultStore::connect(&config.redis_url).await?;

    // --- Collaborators ---
    let http_client = reqwest::Client::new();
    let synthesizer = OpenAiSynthesizer::new(&config, http_client.clone());
    let image_provider = OpenAiImageProvider::new(&config, http_client);

    // --- Application State ---
    let state = Arc::new(AppState {
        store: Arc::new(store),
        synthesizer: Arc::new(synthesizer),
        image_provider: Arc::new(image_provider),
        result_ttl: config.result_ttl,
        public_base_url: config.public_base_url.clone(),
    });

    let app = create_router(state);

    // --- Server Startup ---
    tracing::info!("Server listening on http://{}", config.bind_address);

    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
