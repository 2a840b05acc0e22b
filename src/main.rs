//! Server bootstrap: env config, tracing, database connection, router.

use std::sync::Arc;

use products_api::{app, connect_db, AppState, Config, PgProductStore};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("products_api=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env();
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect_lazy(&config.database_url)?;

    // Connection failure is not fatal: log it and keep serving; requests
    // fail inside the store until the database is reachable.
    if let Err(err) = connect_db(&pool).await {
        tracing::error!(error = %err, "failed to connect to the database");
    }

    let state = AppState::new(Arc::new(PgProductStore::new(pool)));
    let listener = TcpListener::bind(("0.0.0.0", config.port)).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app(state, &config)).await?;
    Ok(())
}
