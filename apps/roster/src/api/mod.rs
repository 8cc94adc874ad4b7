//! # Web Console
//!
//! Server-rendered rendition of the console.
//!
//! Routes:
//! - `GET /` login form, `POST /` log in
//! - `GET /users` guarded listing (`q`, `page`, `edit` query parameters)
//! - `POST /users/{id}` submit an edit, `POST /users/{id}/cancel` drop it
//! - `POST /users/{id}/delete` delete a user
//! - `POST /logout`
//! - `GET /health`
//!
//! The `token` cookie plays the part of browser local storage. Each token
//! owns a [`Console`]: its own copy of the user list and view state.

pub mod console;
pub mod handlers;
pub mod pages;

pub use console::{Console, NOTICE_TTL, Notice};

use crate::AppError;
use crate::auth::LoginMode;
use crate::config::RemoteConfig;
use axum::Router;
use axum::routing::{get, post};
use roster_client::DirectoryClient;
use roster_core::SessionToken;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Shared state of the web console.
#[derive(Debug, Clone)]
pub struct AppState {
    client: DirectoryClient,
    login_mode: LoginMode,
    sessions: Arc<RwLock<HashMap<SessionToken, Console>>>,
}

impl AppState {
    pub fn new(client: DirectoryClient, login_mode: LoginMode) -> Self {
        Self {
            client,
            login_mode,
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn from_config(config: &RemoteConfig) -> Result<Self, AppError> {
        Ok(Self::new(config.client()?, config.login_mode()))
    }

    /// Number of sessions with live console state.
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Start a fresh console for `token`.
    pub(crate) async fn open_session(&self, token: SessionToken, email: Option<String>) {
        self.sessions.write().await.insert(token, Console::new(email));
    }

    pub(crate) async fn close_session(&self, token: &SessionToken) -> bool {
        self.sessions.write().await.remove(token).is_some()
    }

    /// Fetch the full user list for `token` unless it already has one.
    ///
    /// A failed fetch is logged and leaves the list empty; the next page
    /// view tries again. The sessions lock is not held while fetching.
    pub(crate) async fn ensure_loaded(&self, token: &SessionToken) {
        let loaded = {
            let sessions = self.sessions.read().await;
            sessions.get(token).is_some_and(|c| c.loaded)
        };
        if loaded {
            return;
        }

        let fetched = match self.client.fetch_all_users().await {
            Ok(users) => {
                info!(count = users.len(), "fetched user directory");
                Some(users)
            }
            Err(err) => {
                error!(error = %err, "Error fetching users");
                None
            }
        };

        let mut sessions = self.sessions.write().await;
        let console = sessions.entry(token.clone()).or_default();
        if let Some(users) = fetched {
            if !console.loaded {
                console.view.replace_users(users);
                console.loaded = true;
            }
        }
    }

    /// Run `f` against the console for `token`, creating an anonymous one
    /// if the token is unknown. Only the listing page mounts consoles.
    pub(crate) async fn with_console<T>(
        &self,
        token: &SessionToken,
        f: impl FnOnce(&mut Console) -> T,
    ) -> T {
        let mut sessions = self.sessions.write().await;
        f(sessions.entry(token.clone()).or_default())
    }

    /// Run `f` against the console for `token` if it has one.
    ///
    /// Unknown tokens yield `None` and leave the session map untouched.
    pub(crate) async fn with_session<T>(
        &self,
        token: &SessionToken,
        f: impl FnOnce(&mut Console) -> T,
    ) -> Option<T> {
        let mut sessions = self.sessions.write().await;
        sessions.get_mut(token).map(f)
    }

    pub(crate) async fn has_session(&self, token: &SessionToken) -> bool {
        self.sessions.read().await.contains_key(token)
    }
}

/// Build the web console router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::login_page).post(handlers::login_submit))
        .route("/users", get(handlers::users_page))
        .route("/users/{id}", post(handlers::update_user))
        .route("/users/{id}/cancel", post(handlers::cancel_edit))
        .route("/users/{id}/delete", post(handlers::delete_user))
        .route("/logout", post(handlers::logout))
        .route("/health", get(handlers::health))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

/// Serve the web console on `addr` until Ctrl-C.
pub async fn serve(state: AppState, addr: SocketAddr) -> Result<(), AppError> {
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "web console listening");
    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
