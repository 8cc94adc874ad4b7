//! # Roster Client - The Remote
//!
//! HTTP client for the remote user directory the console is backed by.
//!
//! The directory speaks the reqres.in dialect: a paginated listing under
//! `/api/users?page=N`, per-user `PUT`/`DELETE` under `/api/users/{id}`, and
//! a demo `/api/login` that answers with a token. Writes are accepted by the
//! demo service but never persisted.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use roster_client::DirectoryClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), roster_client::Error> {
//!     let client = DirectoryClient::with_api_key("https://reqres.in", "reqres-free-v1")?;
//!
//!     let users = client.fetch_all_users().await?;
//!     println!("{} users in the directory", users.len());
//!
//!     Ok(())
//! }
//! ```

use reqwest::header::{HeaderMap, HeaderValue};
use roster_core::{Credentials, User, UserId, UserUpdate};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Header carrying the directory API key.
pub const API_KEY_HEADER: &str = "x-api-key";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// =============================================================================
// ERROR TYPE
// =============================================================================

/// Errors from the directory client.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not the expected JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Server answered with a non-success status.
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// The listing reported more pages than the configured limit.
    #[error("Page limit of {0} exceeded while fetching users")]
    PageLimit(u32),

    /// The API key cannot be sent as a header.
    #[error("Invalid API key: {0}")]
    InvalidApiKey(String),
}

// =============================================================================
// RESPONSE TYPES
// =============================================================================

/// One page of the user listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsersPage {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub per_page: u32,
    #[serde(default)]
    pub total: u32,
    pub total_pages: u32,
    pub data: Vec<User>,
}

/// Echo of an accepted update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatedUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(rename = "updatedAt", default)]
    pub updated_at: Option<String>,
}

/// Token handed out by the demo login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

// =============================================================================
// CLIENT
// =============================================================================

/// HTTP client for the user directory.
#[derive(Debug, Clone)]
pub struct DirectoryClient {
    base_url: String,
    client: reqwest::Client,
    page_limit: Option<u32>,
}

impl DirectoryClient {
    /// Create a client for the directory at `base_url` (scheme and host,
    /// without the `/api` prefix).
    ///
    /// Should the HTTP client fail to build, the failure is logged and a
    /// client without the request timeout is used instead.
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = build_client(HeaderMap::new()).unwrap_or_else(|err| {
            warn!(error = %err, "HTTP client build failed, requests will have no timeout");
            reqwest::Client::default()
        });
        Self {
            base_url: normalize(base_url.into()),
            client,
            page_limit: None,
        }
    }

    /// Create a client that sends `x-api-key: <api_key>` with every request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidApiKey`] if the key contains invalid header
    /// characters, or [`Error::Http`] if the HTTP client fails to build.
    pub fn with_api_key(base_url: impl Into<String>, api_key: &str) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        let value =
            HeaderValue::from_str(api_key).map_err(|e| Error::InvalidApiKey(e.to_string()))?;
        headers.insert(API_KEY_HEADER, value);
        Ok(Self {
            base_url: normalize(base_url.into()),
            client: build_client(headers)?,
            page_limit: None,
        })
    }

    /// Refuse to fetch more than `limit` listing pages in one
    /// [`fetch_all_users`](Self::fetch_all_users) call.
    #[must_use]
    pub fn with_page_limit(mut self, limit: u32) -> Self {
        self.page_limit = Some(limit);
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch one page of the user listing (1-based).
    pub async fn list_users(&self, page: u32) -> Result<UsersPage, Error> {
        let url = format!("{}/api/users", self.base_url);
        let resp = self
            .client
            .get(&url)
            .query(&[("page", page)])
            .send()
            .await?;
        decode(resp).await
    }

    /// Fetch every page of the listing and concatenate the users.
    ///
    /// Pages are requested one after another starting at 1, until the page
    /// number passes the `total_pages` reported by the last response. Page 1
    /// is always requested. A failing page aborts the whole fetch.
    pub async fn fetch_all_users(&self) -> Result<Vec<User>, Error> {
        let mut users = Vec::new();
        let mut current: u32 = 1;
        loop {
            if let Some(limit) = self.page_limit {
                if current > limit {
                    warn!(limit, "user listing exceeds page limit");
                    return Err(Error::PageLimit(limit));
                }
            }

            let page = self.list_users(current).await?;
            debug!(
                page = current,
                total_pages = page.total_pages,
                count = page.data.len(),
                "fetched user page"
            );
            users.extend(page.data);

            match next_page(current, page.total_pages) {
                Some(next) => current = next,
                None => break,
            }
        }
        Ok(users)
    }

    /// Send the editable fields of user `id`.
    pub async fn update_user(&self, id: UserId, update: &UserUpdate) -> Result<UpdatedUser, Error> {
        let url = format!("{}/api/users/{}", self.base_url, id);
        let resp = self.client.put(&url).json(update).send().await?;
        decode(resp).await
    }

    /// Delete user `id`.
    pub async fn delete_user(&self, id: UserId) -> Result<(), Error> {
        let url = format!("{}/api/users/{}", self.base_url, id);
        let resp = self.client.delete(&url).send().await?;
        check(resp).await?;
        Ok(())
    }

    /// Exchange credentials for a token with the demo login endpoint.
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, Error> {
        let url = format!("{}/api/login", self.base_url);
        let resp = self.client.post(&url).json(credentials).send().await?;
        decode(resp).await
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn build_client(headers: HeaderMap) -> Result<reqwest::Client, Error> {
    Ok(reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .default_headers(headers)
        .build()?)
}

/// The page after `current`, or `None` once `total_pages` is reached.
fn next_page(current: u32, total_pages: u32) -> Option<u32> {
    current.checked_add(1).filter(|next| *next <= total_pages)
}

fn normalize(base_url: String) -> String {
    base_url.trim_end_matches('/').to_string()
}

/// Turn a non-success response into [`Error::Server`].
///
/// The message is the `error` field of a JSON body when present, the raw
/// body otherwise.
async fn check(resp: reqwest::Response) -> Result<reqwest::Response, Error> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .map(|b| b.error)
        .unwrap_or(body);
    Err(Error::Server {
        status: status.as_u16(),
        message,
    })
}

async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
    let bytes = check(resp).await?.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_page_stops_at_reported_total() {
        assert_eq!(next_page(1, 2), Some(2));
        assert_eq!(next_page(2, 2), None);
        assert_eq!(next_page(1, 0), None);
    }

    #[test]
    fn next_page_stops_at_u32_max() {
        assert_eq!(next_page(u32::MAX - 1, u32::MAX), Some(u32::MAX));
        assert_eq!(next_page(u32::MAX, u32::MAX), None);
    }

    #[test]
    fn default_client_builds_with_timeout() {
        assert!(build_client(HeaderMap::new()).is_ok());
    }

    #[test]
    fn base_url_loses_trailing_slash() {
        assert_eq!(DirectoryClient::new("http://localhost:8080/").base_url(), "http://localhost:8080");
    }
}
