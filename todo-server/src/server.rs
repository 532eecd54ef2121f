//! Server core: shared state, routing table, and listener startup.

use std::sync::Arc;

use axum::Router;
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::{Authenticator, TokenAuthority};
use crate::config::TodoConfig;
use crate::error::ApiError;
use crate::handlers;
use crate::labels::LabelManager;
use crate::tasks::TaskManager;

/// State shared by every handler.
pub struct AppState {
    /// Access guard and login authority, created once per process.
    pub auth: Arc<dyn Authenticator>,
    /// Task collection.
    pub tasks: TaskManager,
    /// Label collection.
    pub labels: LabelManager,
}

impl Default for AppState {
    fn default() -> Self {
        let defaults = TodoConfig::default();
        Self::new(Arc::new(TokenAuthority::new(defaults.username, defaults.password)))
    }
}

impl AppState {
    /// Creates state with the given authenticator and empty in-memory collections.
    #[must_use]
    pub fn new(auth: Arc<dyn Authenticator>) -> Self {
        Self::with_managers(auth, TaskManager::default(), LabelManager::default())
    }

    /// Creates state from pre-built managers.
    #[must_use]
    pub fn with_managers(
        auth: Arc<dyn Authenticator>,
        tasks: TaskManager,
        labels: LabelManager,
    ) -> Self {
        Self {
            auth,
            tasks,
            labels,
        }
    }

    /// Creates state from a resolved configuration.
    #[must_use]
    pub fn from_config(config: &TodoConfig) -> Self {
        Self::new(Arc::new(TokenAuthority::with_max_tokens(
            config.username.clone(),
            config.password.clone(),
            config.max_tokens,
        )))
    }

    /// Runs the access guard over the request's `Authorization` header.
    ///
    /// A missing or non-UTF-8 header is treated as an empty token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidToken`] if the guard rejects the token.
    pub fn authorize(&self, headers: &HeaderMap) -> Result<(), ApiError> {
        let token = headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        if self.auth.validate(token) {
            Ok(())
        } else {
            tracing::warn!("request rejected: invalid token");
            Err(ApiError::InvalidToken)
        }
    }
}

/// Builds the routing table over the given state.
///
/// Unknown paths and unrouted methods fall back to envelope responses.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/v1/auth/login", post(handlers::login))
        .route(
            "/api/v1/task",
            get(handlers::list_tasks).post(handlers::create_task),
        )
        .route(
            "/api/v1/task/{id}",
            get(handlers::get_task)
                .put(handlers::update_task)
                .delete(handlers::delete_task),
        )
        .route(
            "/api/v1/label",
            get(handlers::list_labels).post(handlers::create_label),
        )
        .route(
            "/api/v1/label/{id}",
            get(handlers::get_label).put(handlers::update_label),
        )
        .method_not_allowed_fallback(handlers::method_not_allowed)
        .fallback(handlers::route_not_found)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Starts the server on the given address with default state.
///
/// # Errors
///
/// Returns an error if the TCP listener cannot bind to the given address.
pub async fn start_server(
    addr: &str,
) -> Result<
    (std::net::SocketAddr, tokio::task::JoinHandle<()>),
    Box<dyn std::error::Error + Send + Sync>,
> {
    start_server_with_state(addr, Arc::new(AppState::default())).await
}

/// Starts the server with a pre-configured [`AppState`].
///
/// Returns the bound address (useful with port `0`) and the serve task.
///
/// # Errors
///
/// Returns an error if the TCP listener cannot bind to the given address.
pub async fn start_server_with_state(
    addr: &str,
    state: Arc<AppState>,
) -> Result<
    (std::net::SocketAddr, tokio::task::JoinHandle<()>),
    Box<dyn std::error::Error + Send + Sync>,
> {
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let bound_addr = listener.local_addr()?;

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = %e, "todo server error");
        }
    });

    Ok((bound_addr, handle))
}
