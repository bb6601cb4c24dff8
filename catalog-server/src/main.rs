use std::sync::Arc;

use axum::http::HeaderValue;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use catalog_server::{api, config, db, seed, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catalog_server=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = config::Config::from_env()?;
    info!(port = config.port, database = %config.database_url, "catalog server starting");

    let db = db::connect(&config.database_url).await?;
    if config.seed {
        seed::seed_defaults(&db).await?;
    }

    let cors = match &config.allowed_origin {
        Some(origin) => CorsLayer::new().allow_origin(AllowOrigin::exact(
            HeaderValue::from_str(origin)
                .map_err(|e| anyhow::anyhow!("invalid CATALOG_ALLOWED_ORIGIN: {e}"))?,
        )),
        None => CorsLayer::new().allow_origin(AllowOrigin::any()),
    }
    .allow_methods(tower_http::cors::Any)
    .allow_headers(tower_http::cors::Any);

    let state = Arc::new(AppState::new(db));

    // Dioxus WASM frontend, served from the dx build output when present.
    let frontend_dist = config::frontend_dist_from_env();
    info!(path = %frontend_dist, "serving frontend assets from");

    let app = api::router()
        .fallback_service(ServeDir::new(frontend_dist))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.port);
    info!("listening on {addr}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
