use dotenvy::dotenv;
use tracing::{info, Level};

use confhub::app::{router, AppState};
use confhub::db;

#[tokio::main]
async fn main() -> Result<(), sqlx::Error> {
    dotenv().ok();

    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://confhub.db?mode=rwc".to_string());
    let pool = db::init_pool(&database_url).await?;

    let state = AppState::new(pool);
    let app = router(state);

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .expect("Failed to bind listener");

    info!("Server is running on http://{}", bind_addr);
    axum::serve(listener, app).await.expect("Server error");

    Ok(())
}
