//! Maintenance entry point: `clear_db --clear` removes every stored product
//! and restarts the id sequence. Without the flag it does nothing.

use products_api::{reset_products_table, Config};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().init();

    if !std::env::args().any(|arg| arg == "--clear") {
        return;
    }

    let config = Config::from_env();
    let pool = match sqlx::postgres::PgPoolOptions::new()
        .max_connections(1)
        .connect(&config.database_url)
        .await
    {
        Ok(pool) => pool,
        Err(err) => {
            tracing::error!(error = %err, "failed to connect to the database");
            std::process::exit(1);
        }
    };

    match reset_products_table(&pool).await {
        Ok(()) => {
            tracing::info!("all product data cleared");
            std::process::exit(0);
        }
        Err(err) => {
            tracing::error!(error = %err, "failed to clear product data");
            std::process::exit(1);
        }
    }
}
