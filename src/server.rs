//! Router assembly and the serve loop.

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;
use crate::config::BlogConfig;
use crate::persistence::{PostStore, StoreOptions};
use crate::{api, web};

/// Builds the full application: JSON API, HTML pages, health check,
/// API docs and a not-found fallback.
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .merge(api::build_router())
        .merge(web::build_router())
        .fallback(web::handlers::fallback)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Connects the store, seeds it if configured, and returns the state
/// handlers share.
///
/// # Errors
///
/// Returns [`crate::error::BlogError`] if the database cannot be opened,
/// the schema cannot be created, or seeding fails.
pub async fn prepare_state(config: &BlogConfig) -> Result<AppState, crate::error::BlogError> {
    let store = PostStore::connect(&StoreOptions::from(config)).await?;
    if config.seed_on_startup {
        store.seed_if_empty().await?;
    }
    Ok(AppState::new(store))
}

/// Serves `app` on `listener` until Ctrl+C or SIGTERM.
///
/// # Errors
///
/// Returns an I/O error if the server fails while accepting connections.
pub async fn serve(listener: TcpListener, app: Router) -> std::io::Result<()> {
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("server shutdown complete");
    Ok(())
}

/// Waits for Ctrl+C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %err, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received Ctrl+C, starting shutdown"),
        () = terminate => tracing::info!("received SIGTERM, starting shutdown"),
    }
}
