use std::{sync::Arc, time::Duration};

use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use cinetrend::{
    AppState, appwrite::AppwriteClient, config::Config, images::ImageUrls, ledger::SearchLedger,
    routes, tmdb::TmdbClient,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,cinetrend=debug".to_string()),
        )
        .init();

    let config = Arc::new(Config::from_env()?);

    let http = reqwest::Client::builder()
        .user_agent("cinetrend/0.1")
        .timeout(Duration::from_secs(config.http_timeout_secs))
        .build()?;

    let tmdb = TmdbClient::new(
        http.clone(),
        config.tmdb_api_key.clone(),
        config.tmdb_base_url.clone(),
        config.tmdb_rps,
    );

    let images = ImageUrls::new(config.tmdb_image_base_url.clone());

    let store = AppwriteClient::new(
        http.clone(),
        config.appwrite_endpoint.clone(),
        config.appwrite_project_id.clone(),
        config.appwrite_api_key.clone(),
        config.appwrite_database_id.clone(),
        config.appwrite_collection_id.clone(),
    );
    let ledger = SearchLedger::new(store, images.clone());

    let state = Arc::new(AppState {
        config: config.clone(),
        tmdb: Arc::new(tmdb),
        ledger: Arc::new(ledger),
        images,
    });

    let app = routes::app(state)
        .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
