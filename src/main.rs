mod model;
mod server;

use std::{net::SocketAddr, sync::Arc};

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use crate::server::{
    config::Config, error::AppError, metrics::Metrics, router, scheduler::business_metrics,
    startup, state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let http_client = startup::setup_reqwest_client()?;
    let rate_limiter = startup::setup_rate_limiter(&config).await;
    let file_host = startup::setup_file_host(&config, &http_client);
    let auth = startup::setup_auth(&config)?;
    let reporter = startup::setup_reporter(&config, &http_client);
    let metrics = Arc::new(Metrics::new()?);

    // Start business metrics scheduler
    let scheduler_db = db.clone();
    let scheduler_metrics = metrics.clone();
    tokio::spawn(async move {
        if let Err(e) = business_metrics::start_scheduler(scheduler_db, scheduler_metrics).await {
            tracing::error!("Business metrics scheduler error: {}", e);
        }
    });

    let state = AppState::new(db, rate_limiter, file_host, auth, metrics, reporter);
    let app = router::router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Starting server on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
