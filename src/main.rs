use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};
use weekly_hours::{AppState, Config, LocalStorage, WeeklyStore, load_week, router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::parse();
    let storage = LocalStorage::new(config.data_path.clone());
    let week = load_week(&storage).await;
    info!("loaded week from {}", storage.path().display());

    let app = router(AppState::new(storage, WeeklyStore::from_state(week)));

    let addr = config.addr();
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutting down");
    }
}
