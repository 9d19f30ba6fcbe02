use sea_orm::Database;
use tracing::info;

use skillbridge_backend::{config, routes, state::AppState};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = config::config().await;

    let db = Database::connect(config.db_url())
        .await
        .expect("Failed to connect to database");

    let state = AppState::new(db, config.jwt().clone());
    let app = routes::app_router(state);

    let addr = format!("{}:{}", config.server_host(), config.server_port());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    info!("Server listening on http://{addr}");

    axum::serve(listener, app).await.expect("Server error");
}
