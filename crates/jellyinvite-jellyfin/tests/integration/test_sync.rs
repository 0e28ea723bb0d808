//! Integration tests for user reconciliation against a mock server

use std::sync::Arc;

use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use jellyinvite_core::domain::ServiceError;
use jellyinvite_core::usecases::SyncUsersUseCase;
use jellyinvite_jellyfin::JellyfinMediaServer;

use crate::common::{self, MemoryUsers};

#[tokio::test]
async fn test_sync_converges_local_users_on_remote() {
    let (server, client) = common::setup_jellyfin_mock().await;
    common::mount_users(&server, &[("u1", "alice"), ("u2", "bob")]).await;

    let store = Arc::new(MemoryUsers::new(&[("u1", "alice"), ("u9", "zed")]));
    let uc = SyncUsersUseCase::new(Arc::new(JellyfinMediaServer::new(client)), store.clone());

    let outcome = uc.execute().await.expect("sync failed");

    assert_eq!(store.tokens(), vec!["u1", "u2"]);
    assert_eq!(outcome.imported, 1);
    assert_eq!(outcome.pruned, 1);
    assert_eq!(outcome.users.len(), 2);
}

#[tokio::test]
async fn test_sync_handles_ids_with_reserved_characters() {
    let (server, client) = common::setup_jellyfin_mock().await;
    common::mount_users(
        &server,
        &[("u1", "alice"), ("svc&bot", "bot"), ("bob smith", "bob")],
    )
    .await;

    let store = Arc::new(MemoryUsers::new(&[("u1", "alice"), ("u9", "zed")]));
    let uc = SyncUsersUseCase::new(Arc::new(JellyfinMediaServer::new(client)), store.clone());

    let outcome = uc.execute().await.expect("sync failed");

    assert_eq!(store.tokens(), vec!["bob smith", "svc&bot", "u1"]);
    assert_eq!(outcome.imported, 2);
    assert_eq!(outcome.pruned, 1);
}

#[tokio::test]
async fn test_sync_fetches_users_twice() {
    let (server, client) = common::setup_jellyfin_mock().await;

    Mock::given(method("GET"))
        .and(path("/Users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(2)
        .mount(&server)
        .await;

    let uc = SyncUsersUseCase::new(
        Arc::new(JellyfinMediaServer::new(client)),
        Arc::new(MemoryUsers::new(&[])),
    );

    uc.execute().await.expect("sync failed");
}

#[tokio::test]
async fn test_sync_aborts_on_remote_error() {
    let (server, client) = common::setup_jellyfin_mock().await;

    Mock::given(method("GET"))
        .and(path("/Users"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryUsers::new(&[("u1", "alice")]));
    let uc = SyncUsersUseCase::new(Arc::new(JellyfinMediaServer::new(client)), store.clone());

    let err = uc.execute().await.unwrap_err();

    assert_eq!(
        err.downcast_ref::<ServiceError>(),
        Some(&ServiceError::RemoteApi { status: 401 })
    );
    assert_eq!(store.tokens(), vec!["u1"]);
}
