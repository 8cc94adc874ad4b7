//! Request handlers of the web console.

use super::{AppState, Notice, pages};
use crate::AppError;
use crate::auth::obtain_token;
use axum::Json;
use axum::extract::{Form, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use roster_core::{
    Access, Credentials, Route, SessionToken, TOKEN_KEY, UserId, UserUpdate, guard,
};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Notice shown after a successful delete.
pub const DELETED_NOTICE: &str = "User deleted successfully!";

// =============================================================================
// COOKIE HELPERS
// =============================================================================

fn session_token(jar: &CookieJar) -> Option<SessionToken> {
    jar.get(TOKEN_KEY)
        .and_then(|cookie| SessionToken::new(cookie.value()).ok())
}

fn token_cookie(token: &SessionToken) -> Cookie<'static> {
    Cookie::build((TOKEN_KEY, token.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// The caller's token, or the redirect the guard demands.
fn require_session(jar: &CookieJar, route: Route) -> Result<SessionToken, Redirect> {
    let token = session_token(jar);
    match (guard(route, token.as_ref()), token) {
        (Access::Render, Some(token)) => Ok(token),
        (Access::Redirect(to), _) => Err(Redirect::to(to.path())),
        (Access::Render, None) => Err(Redirect::to(Route::Login.path())),
    }
}

fn back_to_listing() -> Redirect {
    Redirect::to(Route::Users.path())
}

// =============================================================================
// LOGIN / LOGOUT
// =============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

pub async fn login_page() -> Html<String> {
    Html(pages::login(None, ""))
}

pub async fn login_submit(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    let credentials = Credentials::new(form.email.trim(), form.password);
    match obtain_token(&state.client, state.login_mode, &credentials).await {
        Ok(token) => {
            if let Some(previous) = session_token(&jar) {
                if state.close_session(&previous).await {
                    debug!("previous session replaced");
                }
            }
            info!(email = %credentials.email, "session opened");
            state
                .open_session(token.clone(), Some(credentials.email.clone()))
                .await;
            (jar.add(token_cookie(&token)), back_to_listing()).into_response()
        }
        Err(err) => {
            warn!(error = %err, "login rejected");
            let message = err.to_string();
            (
                err.status_code(),
                Html(pages::login(Some(&message), &credentials.email)),
            )
                .into_response()
        }
    }
}

pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> Response {
    if let Some(token) = session_token(&jar) {
        if state.close_session(&token).await {
            info!("session closed");
        }
    }
    let jar = jar.remove(Cookie::build(TOKEN_KEY).path("/"));
    (jar, Redirect::to(Route::Login.path())).into_response()
}

// =============================================================================
// LISTING
// =============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub q: Option<String>,
    pub page: Option<usize>,
    pub edit: Option<u64>,
}

pub async fn users_page(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(params): Query<ListParams>,
) -> Result<Response, AppError> {
    let token = match require_session(&jar, Route::Users) {
        Ok(token) => token,
        Err(redirect) => return Ok(redirect.into_response()),
    };

    state.ensure_loaded(&token).await;

    let now = Instant::now();
    state
        .with_console(&token, |console| -> Result<Response, AppError> {
            if let Some(query) = params.q {
                if query != console.view.query() {
                    console.view.set_query(query);
                }
            }
            if let Some(page) = params.page {
                console.view.go_to_page(page);
            }
            if let Some(id) = params.edit {
                console.view.begin_edit(UserId(id))?;
            }
            console.expire_notice(now);
            Ok(Html(pages::users(console, now)).into_response())
        })
        .await
}

// =============================================================================
// MUTATIONS
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct EditForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl From<EditForm> for UserUpdate {
    fn from(form: EditForm) -> Self {
        Self {
            first_name: form.first_name,
            last_name: form.last_name,
            email: form.email,
        }
    }
}

/// Submit the edit draft of user `id`.
///
/// The list only changes once the directory accepts the update; a refused
/// update is logged and the draft stays open with the submitted values.
/// Tokens without a mounted console are sent back to the listing untouched.
pub async fn update_user(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<u64>,
    Form(form): Form<EditForm>,
) -> Result<Response, AppError> {
    let token = match require_session(&jar, Route::Users) {
        Ok(token) => token,
        Err(redirect) => return Ok(redirect.into_response()),
    };
    let id = UserId(id);
    let update = UserUpdate::from(form);

    let staged = state
        .with_session(&token, |console| -> Result<(), AppError> {
            if console.view.editing().is_none_or(|draft| draft.id != id) {
                console.view.begin_edit(id)?;
            }
            console.view.update_draft(&update);
            Ok(())
        })
        .await;
    match staged {
        Some(result) => result?,
        None => {
            debug!(%id, "edit for unknown session ignored");
            return Ok(back_to_listing().into_response());
        }
    }

    match state.client.update_user(id, &update).await {
        Ok(_) => {
            state
                .with_session(&token, |console| console.view.commit_edit())
                .await
                .transpose()?;
            info!(%id, "user updated");
        }
        Err(err) => error!(%id, error = %err, "Error updating user"),
    }
    Ok(back_to_listing().into_response())
}

pub async fn cancel_edit(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(_id): Path<u64>,
) -> Response {
    match require_session(&jar, Route::Users) {
        Ok(token) => {
            state
                .with_session(&token, |console| console.view.cancel_edit())
                .await;
            back_to_listing().into_response()
        }
        Err(redirect) => redirect.into_response(),
    }
}

/// Delete user `id` remotely, then drop it from the session's list.
pub async fn delete_user(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<u64>,
) -> Response {
    let token = match require_session(&jar, Route::Users) {
        Ok(token) => token,
        Err(redirect) => return redirect.into_response(),
    };
    let id = UserId(id);
    if !state.has_session(&token).await {
        debug!(%id, "delete for unknown session ignored");
        return back_to_listing().into_response();
    }

    match state.client.delete_user(id).await {
        Ok(()) => {
            let removed = state
                .with_session(&token, |console| {
                    let removed = console.view.remove(id);
                    console.notice = Some(Notice::new(DELETED_NOTICE, Instant::now()));
                    removed
                })
                .await
                .flatten();
            if removed.is_none() {
                warn!(%id, "deleted user was not in the local list");
            } else {
                info!(%id, "user deleted");
            }
        }
        Err(err) => error!(%id, error = %err, "Error deleting user"),
    }
    back_to_listing().into_response()
}

// =============================================================================
// HEALTH
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

pub async fn health() -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}
