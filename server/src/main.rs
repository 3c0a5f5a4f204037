use std::sync::Arc;

use anyhow::Context;
use dotenvy::dotenv;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use eventide_server::auth::TokenVerifier;
use eventide_server::config::Config;
use eventide_server::routes::create_routes;
use eventide_server::state::AppState;
use eventide_server::store::PgStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("eventide_server=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    tracing::info!("Successfully connected to database");

    sqlx::migrate!()
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    tracing::info!("Migrations run successfully");

    let state = AppState::new(
        Arc::new(PgStore::new(pool)),
        TokenVerifier::new(&config.jwt_secret, config.jwt_issuer.as_deref()),
    );
    let app = create_routes(state, &config);

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Server running at http://{}", addr);

    axum::serve(listener, app).await.context("Server failed")?;
    Ok(())
}
