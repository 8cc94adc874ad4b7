//! Remote directory configuration, read from flags or the environment.

use crate::AppError;
use crate::auth::LoginMode;
use clap::Args;
use roster_client::DirectoryClient;

/// The public demo directory.
pub const DEFAULT_API_URL: &str = "https://reqres.in";

/// How to reach the remote user directory.
#[derive(Debug, Clone, Args)]
pub struct RemoteConfig {
    /// Base URL of the directory (without the `/api` prefix)
    #[arg(long, env = "ROSTER_API_URL", default_value = DEFAULT_API_URL, global = true)]
    pub api_url: String,

    /// API key sent as `x-api-key`
    #[arg(long, env = "ROSTER_API_KEY", global = true)]
    pub api_key: Option<String>,

    /// Abort a full fetch after this many listing pages
    #[arg(long, env = "ROSTER_PAGE_LIMIT", global = true)]
    pub page_limit: Option<u32>,

    /// Get session tokens from the directory's /api/login instead of minting them
    #[arg(long, env = "ROSTER_REMOTE_LOGIN", global = true)]
    pub remote_login: bool,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: None,
            page_limit: None,
            remote_login: false,
        }
    }
}

impl RemoteConfig {
    /// Directory at `api_url` with every other setting at its default.
    pub fn for_url(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ..Self::default()
        }
    }

    pub fn login_mode(&self) -> LoginMode {
        if self.remote_login {
            LoginMode::Remote
        } else {
            LoginMode::Local
        }
    }

    /// Build the directory client these settings describe.
    pub fn client(&self) -> Result<DirectoryClient, AppError> {
        let client = match self.api_key.as_deref() {
            Some(key) => DirectoryClient::with_api_key(&self.api_url, key)?,
            None => DirectoryClient::new(&self.api_url),
        };
        Ok(match self.page_limit {
            Some(limit) => client.with_page_limit(limit),
            None => client,
        })
    }
}
