//! Login: turning credentials into a session token.
//!
//! Credentials are never verified locally. In the default mode the token is
//! minted on the spot; in remote mode it is whatever the directory's demo
//! login hands back.

use crate::AppError;
use roster_client::DirectoryClient;
use roster_core::{Credentials, SessionToken};
use tracing::debug;
use uuid::Uuid;

/// Where session tokens come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginMode {
    /// Mint a random token locally.
    #[default]
    Local,
    /// Ask the directory's `/api/login`.
    Remote,
}

/// Validate `credentials` and obtain a token for them.
pub async fn obtain_token(
    client: &DirectoryClient,
    mode: LoginMode,
    credentials: &Credentials,
) -> Result<SessionToken, AppError> {
    credentials.validate()?;
    let token = match mode {
        LoginMode::Local => SessionToken::new(Uuid::new_v4().simple().to_string())?,
        LoginMode::Remote => {
            let response = client.login(credentials).await?;
            SessionToken::new(response.token)?
        }
    };
    debug!(?mode, "issued session token");
    Ok(token)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use roster_core::RosterError;

    #[tokio::test]
    async fn local_mode_mints_distinct_tokens() {
        let client = DirectoryClient::new("http://127.0.0.1:1");
        let creds = Credentials::new("eve.holt@reqres.in", "cityslicka");

        let first = obtain_token(&client, LoginMode::Local, &creds).await;
        let second = obtain_token(&client, LoginMode::Local, &creds).await;

        match (first, second) {
            (Ok(a), Ok(b)) => assert_ne!(a, b),
            other => panic!("expected two tokens, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn empty_password_never_reaches_the_network() {
        let client = DirectoryClient::new("http://127.0.0.1:1");
        let creds = Credentials::new("eve.holt@reqres.in", "");

        let result = obtain_token(&client, LoginMode::Remote, &creds).await;
        assert!(matches!(
            result,
            Err(AppError::Core(RosterError::MissingPassword))
        ));
    }
}
