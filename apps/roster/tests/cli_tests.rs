//! Integration tests for Roster CLI commands.
//!
//! Uses tempfile or an in-memory store for the token and wiremock for the
//! remote directory.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

mod common;

use common::{directory_server, mount_directory};
use roster::AppError;
use roster::auth::LoginMode;
use roster::cli::{
    EditFields, cmd_delete, cmd_edit, cmd_login, cmd_logout, cmd_users, cmd_whoami,
    require_session,
};
use roster::store::FileTokenStore;
use roster_client::DirectoryClient;
use roster_core::{Credentials, MemoryTokenStore, RosterError, SessionToken, TokenStore, UserId};
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Create a temporary directory for tests.
fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

fn token_store(dir: &TempDir) -> FileTokenStore {
    FileTokenStore::new(dir.path().join("token"))
}

fn logged_in_store(dir: &TempDir) -> FileTokenStore {
    let store = token_store(dir);
    store.save(&SessionToken::new("local-token").unwrap()).unwrap();
    store
}

/// An in-memory store already holding a token.
fn memory_session() -> MemoryTokenStore {
    let store = MemoryTokenStore::new();
    store.save(&SessionToken::new("memory-token").unwrap()).unwrap();
    store
}

fn eve() -> Credentials {
    Credentials::new("eve.holt@reqres.in", "cityslicka")
}

// =============================================================================
// SESSION COMMAND TESTS
// =============================================================================

#[tokio::test]
async fn test_login_saves_token() {
    let temp = create_temp_dir();
    let store = token_store(&temp);
    let remote = MockServer::start().await;
    let client = DirectoryClient::new(remote.uri());

    let token = cmd_login(&client, LoginMode::Local, &store, &eve())
        .await
        .unwrap();

    assert_eq!(store.load().unwrap(), Some(token));
    assert!(store.path().exists());
}

#[tokio::test]
async fn test_login_with_blank_email_saves_nothing() {
    let temp = create_temp_dir();
    let store = token_store(&temp);
    let remote = MockServer::start().await;
    let client = DirectoryClient::new(remote.uri());

    let result = cmd_login(
        &client,
        LoginMode::Local,
        &store,
        &Credentials::new("   ", "pw"),
    )
    .await;

    assert!(matches!(
        result,
        Err(AppError::Core(RosterError::MissingEmail))
    ));
    assert_eq!(store.load().unwrap(), None);
}

#[tokio::test]
async fn test_remote_login_stores_directory_token() {
    let temp = create_temp_dir();
    let store = token_store(&temp);
    let remote = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "QpwL5tke4Pnpja7X4"})))
        .expect(1)
        .mount(&remote)
        .await;
    let client = DirectoryClient::new(remote.uri());

    cmd_login(&client, LoginMode::Remote, &store, &eve())
        .await
        .unwrap();

    assert_eq!(store.load().unwrap().unwrap().as_str(), "QpwL5tke4Pnpja7X4");
}

#[test]
fn test_logout_clears_token() {
    let temp = create_temp_dir();
    let store = logged_in_store(&temp);

    cmd_logout(&store).unwrap();

    assert_eq!(store.load().unwrap(), None);
    assert!(matches!(cmd_whoami(&store), Err(AppError::NotLoggedIn)));
}

#[test]
fn test_logout_without_token_is_ok() {
    let temp = create_temp_dir();
    let store = token_store(&temp);

    assert!(cmd_logout(&store).is_ok());
}

#[test]
fn test_whoami_reports_stored_token() {
    let temp = create_temp_dir();
    let store = logged_in_store(&temp);

    assert_eq!(cmd_whoami(&store).unwrap().as_str(), "local-token");
}

#[test]
fn test_blank_token_file_is_not_a_session() {
    let temp = create_temp_dir();
    let store = token_store(&temp);
    std::fs::write(store.path(), "  \n").unwrap();

    assert!(matches!(require_session(&store), Err(AppError::NotLoggedIn)));
}

// =============================================================================
// USERS COMMAND TESTS
// =============================================================================

#[tokio::test]
async fn test_users_requires_login() {
    let store = MemoryTokenStore::new();
    let remote = MockServer::start().await;
    mount_directory(&remote, 0).await;
    let client = DirectoryClient::new(remote.uri());

    let result = cmd_users(&client, &store, None, 1, false).await;

    assert!(matches!(result, Err(AppError::NotLoggedIn)));
}

#[tokio::test]
async fn test_users_first_page() {
    let store = memory_session();
    let remote = directory_server().await;
    let client = DirectoryClient::new(remote.uri());

    let view = cmd_users(&client, &store, None, 1, false).await.unwrap();

    assert_eq!(view.users().len(), 12);
    assert_eq!(view.total_pages(), 2);
    let ids: Vec<u64> = view.displayed().iter().map(|u| u.id.0).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
}

#[tokio::test]
async fn test_users_search_and_page_clamp() {
    let store = memory_session();
    let remote = directory_server().await;
    let client = DirectoryClient::new(remote.uri());

    let view = cmd_users(&client, &store, Some("george"), 5, true)
        .await
        .unwrap();

    assert_eq!(view.page(), 1);
    assert_eq!(view.total_pages(), 1);
    let names: Vec<String> = view.displayed().iter().map(|u| u.full_name()).collect();
    assert_eq!(names, vec!["George Bluth", "George Edwards"]);
}

#[tokio::test]
async fn test_users_propagates_fetch_failure() {
    let store = memory_session();
    let remote = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&remote)
        .await;
    let client = DirectoryClient::new(remote.uri());

    let result = cmd_users(&client, &store, None, 1, false).await;

    assert!(matches!(result, Err(AppError::Remote(_))));
}

// =============================================================================
// MUTATION COMMAND TESTS
// =============================================================================

#[tokio::test]
async fn test_edit_changes_only_given_fields() {
    let store = memory_session();
    let remote = directory_server().await;
    Mock::given(method("PUT"))
        .and(path("/api/users/2"))
        .and(body_json(json!({
            "first_name": "Jan",
            "last_name": "Weaver",
            "email": "janet.weaver@reqres.in"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "first_name": "Jan",
            "last_name": "Weaver",
            "email": "janet.weaver@reqres.in",
            "updatedAt": "2026-10-19T12:00:00.000Z"
        })))
        .expect(1)
        .mount(&remote)
        .await;
    let client = DirectoryClient::new(remote.uri());

    let fields = EditFields {
        first_name: Some("Jan".into()),
        ..EditFields::default()
    };
    let user = cmd_edit(&client, &store, UserId(2), fields).await.unwrap();

    assert_eq!(user.id, UserId(2));
    assert_eq!(user.full_name(), "Jan Weaver");
    assert_eq!(user.email, "janet.weaver@reqres.in");
}

#[tokio::test]
async fn test_edit_unknown_user_is_not_found() {
    let store = memory_session();
    let remote = directory_server().await;
    let client = DirectoryClient::new(remote.uri());

    let result = cmd_edit(&client, &store, UserId(99), EditFields::default()).await;

    assert!(matches!(
        result,
        Err(AppError::Core(RosterError::UserNotFound(UserId(99))))
    ));
}

#[tokio::test]
async fn test_delete_calls_directory() {
    let store = memory_session();
    let remote = directory_server().await;
    Mock::given(method("DELETE"))
        .and(path("/api/users/4"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&remote)
        .await;
    let client = DirectoryClient::new(remote.uri());

    let removed = cmd_delete(&client, &store, UserId(4)).await.unwrap();

    assert_eq!(removed.full_name(), "Eve Holt");
}

#[tokio::test]
async fn test_delete_unlisted_user_sends_nothing() {
    let store = memory_session();
    let remote = directory_server().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&remote)
        .await;
    let client = DirectoryClient::new(remote.uri());

    let result = cmd_delete(&client, &store, UserId(99)).await;

    assert!(matches!(
        result,
        Err(AppError::Core(RosterError::UserNotFound(UserId(99))))
    ));
}

#[tokio::test]
async fn test_delete_requires_login() {
    let store = MemoryTokenStore::new();
    let remote = MockServer::start().await;
    mount_directory(&remote, 0).await;
    let client = DirectoryClient::new(remote.uri());

    let result = cmd_delete(&client, &store, UserId(4)).await;

    assert!(matches!(result, Err(AppError::NotLoggedIn)));
}

#[tokio::test]
async fn test_delete_failure_is_reported() {
    let store = memory_session();
    let remote = directory_server().await;
    Mock::given(method("DELETE"))
        .and(path("/api/users/4"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({})))
        .mount(&remote)
        .await;
    let client = DirectoryClient::new(remote.uri());

    let result = cmd_delete(&client, &store, UserId(4)).await;

    assert!(matches!(result, Err(AppError::Remote(_))));
}
