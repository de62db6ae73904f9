//! Game catalog binary entrypoint wiring configuration, storage and the REST layer.

use std::{env, net::SocketAddr, sync::Arc};

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use game_catalog::{
    build_router,
    config::{AppConfig, StorageKind},
    dao::game_store::{GameStore, MemoryGameStore},
    services::game_service::CatalogService,
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::load();
    let store = open_store(config.storage).await?;

    let catalog = CatalogService::new(store.clone());
    if !config.games.is_empty() {
        let inserted = catalog
            .seed(config.games)
            .await
            .context("seeding catalog")?;
        info!(inserted, "seeded catalog from config");
    }

    let app = build_router(AppState::new(Arc::new(catalog), store));

    let port = env::var("PORT")
        .or_else(|_| env::var("SERVER_PORT"))
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(%addr, "starting server");

    let listener = TcpListener::bind(addr).await.context("binding server")?;
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving axum")?;

    Ok(())
}

/// Open the configured storage backend.
async fn open_store(kind: StorageKind) -> anyhow::Result<Arc<dyn GameStore>> {
    match kind {
        StorageKind::Memory => {
            info!("using in-memory catalog store");
            Ok(Arc::new(MemoryGameStore::new()))
        }
        StorageKind::Mongo => open_mongo_store().await,
    }
}

#[cfg(feature = "mongo-store")]
async fn open_mongo_store() -> anyhow::Result<Arc<dyn GameStore>> {
    use game_catalog::dao::game_store::mongodb::{MongoConfig, MongoGameStore, RetryPolicy};

    let uri = env::var("MONGO_URI").unwrap_or_else(|_| "mongodb://localhost:27017".into());
    let db_name = env::var("MONGO_DB").ok();
    let retry = RetryPolicy::default().with_overrides(
        env_number("MONGO_CONNECT_ATTEMPTS"),
        env_number("MONGO_MAX_BACKOFF_MS"),
    );

    let mongo_config = MongoConfig::from_uri(&uri, db_name.as_deref())
        .await
        .context("parsing MongoDB settings")?
        .with_retry(retry);
    let store = MongoGameStore::connect(mongo_config)
        .await
        .context("connecting to MongoDB")?;
    info!("connected to MongoDB catalog store");
    Ok(Arc::new(store))
}

#[cfg(feature = "mongo-store")]
fn env_number<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|value| value.parse().ok())
}

#[cfg(not(feature = "mongo-store"))]
async fn open_mongo_store() -> anyhow::Result<Arc<dyn GameStore>> {
    anyhow::bail!("storage `mongo` requested but the `mongo-store` feature is disabled")
}

/// Configure tracing subscribers so logs include spans by default.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Wait for Ctrl+C or SIGTERM and shut the server down gracefully.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut term = signal(SignalKind::terminate()).expect("install SIGTERM handler");
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = term.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
