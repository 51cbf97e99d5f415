use anyhow::Result;
use axum::{extract::Extension, routing::get, routing::put, Router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::handlers;
use crate::store::Store;

/// State shared by every request.
#[derive(Debug, Clone)]
pub(crate) struct State {
    pub(crate) store: Store,
}

impl State {
    /// Attempt to create a new State instance, creating the users table if needed.
    pub(crate) async fn try_new(config: &Config) -> Result<State> {
        let store = Store::connect(&config.database_url, config.max_connections).await?;
        store.bootstrap().await?;

        Ok(State { store })
    }
}

/// Route table of the users resource. Anything it doesn't name is an empty 404.
pub(crate) fn router(state: State) -> Router {
    let by_id = put(handlers::update_user)
        .delete(handlers::delete_user)
        .fallback(handlers::not_found);

    Router::new()
        .route(
            "/users",
            get(handlers::list_users)
                .post(handlers::create_user)
                .head(handlers::not_found)
                .fallback(handlers::not_found),
        )
        .route("/users/", by_id.clone())
        .route("/users/*rest", by_id)
        .fallback(handlers::not_found)
        .layer(Extension(Arc::new(state)))
        .layer(TraceLayer::new_for_http())
}

/// Run the server until Ctrl-C.
pub(crate) async fn run(config: Config) -> Result<()> {
    let state = State::try_new(&config).await?;
    let app = router(state);

    let listener = TcpListener::bind(config.addr).await?;
    tracing::info!("Starting server on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for ctrl-c: {}", e);
        // never resolve, so the server keeps running
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn state_bootstraps_a_fresh_database() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = Config {
            addr: "127.0.0.1:0".parse().unwrap(),
            database_url: format!("sqlite://{}?mode=rwc", dir.path().join("users.db").display()),
            max_connections: 1,
        };

        let state = State::try_new(&config).await.unwrap();
        assert!(state.store.list_users().await.unwrap().is_empty());
        assert!(dir.path().join("users.db").exists());
    }

    #[tokio::test]
    async fn unreachable_database_is_fatal() {
        let config = Config {
            addr: "127.0.0.1:0".parse().unwrap(),
            database_url: "sqlite:///nonexistent-dir/users.db?mode=ro".to_owned(),
            max_connections: 1,
        };
        assert!(State::try_new(&config).await.is_err());
    }
}
