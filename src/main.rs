use std::net::SocketAddr;
use std::sync::Arc;

use storefront_cart::router::create_app_router;
use storefront_cart::state::AppState;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Seeded catalog plus asset lookup
    let state = Arc::new(AppState::new());

    // Router with the JSON endpoints, static fallback and middleware
    let app = create_app_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], 8080));
    info!(%addr, "server running");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
