use tokio::fs;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};
use water_garden::{load_data, router, AppState, Config, Tracker};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env();
    if let Some(parent) = config.data_path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let tracker = Tracker::load(load_data(&config.data_path).await);
    info!(
        records = tracker.records().len(),
        bucket = tracker.bucket_level(),
        flowers = tracker.garden().len(),
        "loaded {}",
        config.data_path.display()
    );
    let app = router(AppState::new(config.data_path.clone(), tracker));

    let addr = config.addr();
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {err}");
    }
    info!("shutting down");
}
