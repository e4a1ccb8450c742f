mod config;
mod db;
mod routes;
mod services;
mod state;

use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = config::Config::from_env()?;
    let pool = db::init_pool(&config.database_url, config.max_connections)
        .await
        .inspect_err(|e| error!(error = %e, "database init failed"))?;

    let app = routes::app(state::AppState::new(pool));
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;

    info!(port = config.port, "resumeboard listening");
    axum::serve(listener, app).await?;
    Ok(())
}
