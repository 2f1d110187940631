pub mod routes;
pub mod state;

use axum::Router;
use callsense_core::config::AppConfig;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use state::AppState;

/// Build the axum Router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = state.config.server.cors;

    let mut app = Router::new()
        .merge(routes::page_routes())
        .merge(routes::call_routes())
        .with_state(state);

    // Middleware stack.
    app = app.layer(TraceLayer::new_for_http());

    // Permissive CORS for local dev; nothing here is credentialed.
    if cors {
        app = app.layer(CorsLayer::permissive());
    }

    app
}

/// Start the HTTP server.
pub async fn serve(config: AppConfig) -> anyhow::Result<()> {
    let state = AppState::new(config.clone());
    let router = build_router(state.clone());

    spawn_eviction_sweeper(&state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

/// Periodically drop rooms idle past the configured TTL.
///
/// Does nothing when no TTL is configured — rooms then live for the process
/// lifetime.
fn spawn_eviction_sweeper(state: &AppState) {
    if state.config.store.room_ttl_secs.is_none() {
        return;
    }
    let store = state.store.clone();
    let period = Duration::from_secs(state.config.store.sweep_interval_secs.max(1));
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        // The first tick fires immediately.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let purged = store.write().await.purge_expired(chrono::Utc::now());
            if purged > 0 {
                tracing::info!("Evicted {} idle room(s)", purged);
            }
        }
    });
}
