//! aac-server - AAC board assembly service
//!
//! HTTP service assembling communication boards from a vocabulary
//! pool, with translation, pictogram resolution, and speech locale
//! mapping. All external providers fail soft; the service keeps
//! answering with degraded content when they are down.

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{info, warn};

use aac_common::config::{resolve_data_dir, split_csv};
use aac_server::pipeline::{
    load_concept_map, BoardBuilder, ImageResolver, PoolStore, TranslationResolver,
};
use aac_server::providers::{
    ArasaacClient, GoogleImageClient, GoogleTranslateClient, GoogleTtsClient,
};
use aac_server::{build_router, refresh, AppState};

#[derive(Debug, Parser)]
#[command(name = "aac-server", version, about = "AAC board assembly service")]
struct Args {
    /// Address to listen on
    #[arg(long, env = "AAC_BIND", default_value = "127.0.0.1:5780")]
    bind: String,

    /// Directory holding aac_pool.json and aac_image_map.json
    #[arg(long)]
    data_dir: Option<String>,

    /// Minutes between vocabulary pool reloads
    #[arg(long, env = "AAC_REFRESH_MINUTES", default_value_t = 60)]
    refresh_minutes: u64,

    /// Comma-separated CORS origins
    #[arg(long, env = "AAC_CORS_ORIGINS", default_value = "http://localhost:5173")]
    cors_origins: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing first so startup problems are visible
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    info!("Starting aac-server v{}", env!("CARGO_PKG_VERSION"));

    let data_dir = resolve_data_dir(args.data_dir.as_deref());
    info!("Data directory: {}", data_dir.display());

    // Vocabulary pool and concept map; both degrade gracefully when
    // the files are absent.
    let pool = Arc::new(PoolStore::load(data_dir.join("aac_pool.json")));
    info!("Vocabulary categories: {:?}", pool.categories());

    let concept_map = load_concept_map(&data_dir.join("aac_image_map.json"));
    info!("Concept map entries: {}", concept_map.len());

    // Provider adapters
    let translator = GoogleTranslateClient::from_env()?;
    let pictograms = ArasaacClient::new()?;
    let images = GoogleImageClient::from_env()?;
    if !aac_server::providers::ImageSearchProvider::is_configured(&images) {
        info!("Generic image search not configured, tier skipped");
    }
    let speech = GoogleTtsClient::from_env()?;

    // Content-resolution pipeline
    let translation = Arc::new(TranslationResolver::new(Arc::new(translator)));
    let image_resolver = Arc::new(ImageResolver::new(
        Arc::new(pictograms),
        Arc::new(images),
        concept_map,
    ));
    let boards = Arc::new(BoardBuilder::new(
        Arc::clone(&pool),
        translation,
        image_resolver,
    ));

    let state = AppState::new(Arc::clone(&pool), boards, Arc::new(speech));

    // Periodic pool reload in the background
    refresh::spawn_pool_refresh(pool, Duration::from_secs(args.refresh_minutes * 60));

    let cors = CorsLayer::new()
        .allow_origin(cors_origins(&args.cors_origins))
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any);

    let app = build_router(state).layer(cors);

    let listener = tokio::net::TcpListener::bind(&args.bind).await?;
    info!("aac-server listening on http://{}", args.bind);
    info!("Health check: http://{}/health", args.bind);

    axum::serve(listener, app).await?;

    Ok(())
}

fn cors_origins(csv: &str) -> AllowOrigin {
    let origins: Vec<_> = split_csv(csv)
        .into_iter()
        .filter_map(|origin| match origin.parse::<axum::http::HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring unparseable CORS origin {:?}", origin);
                None
            }
        })
        .collect();
    AllowOrigin::list(origins)
}
