//! Axum server setup.

use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::Config;

use super::routes::api_router;
use super::state::AppState;

/// Assemble the router around shared state
pub fn build_app(state: Arc<AppState>, config: &Config) -> Router {
    let app = api_router().with_state(state);

    if config.server.cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app.layer(cors)
    } else {
        app
    }
}

/// Run the web server
pub async fn run_server(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let bind = config.bind_addr()?;
    let state = Arc::new(AppState::new(&config).await?);
    let app = build_app(state, &config);

    log::info!(
        "Starting board API on http://{} (max_iterations {})",
        bind,
        config.engine.max_iterations
    );

    let listener = tokio::net::TcpListener::bind(bind).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
