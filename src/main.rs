mod config;
mod db;
mod routes;
mod services;
mod state;

use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = config::Config::from_env()?;
    let pool = db::init_pool(&config).await?;
    tracing::info!(min = config.bounds.min, max = config.bounds.max, "note size bounds");

    let state = state::AppState::new(pool, config.bounds);
    let app = routes::app(state, config.cors_origin.as_deref());
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;

    tracing::info!(port = config.port, "stickyboard listening");
    axum::serve(listener, app).await?;
    Ok(())
}
