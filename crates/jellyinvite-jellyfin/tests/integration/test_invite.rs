//! Integration tests for invited-user provisioning against a mock server

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use jellyinvite_core::domain::{Invitation, ServiceError};
use jellyinvite_core::usecases::{InviteRequest, InviteUserUseCase};
use jellyinvite_jellyfin::JellyfinMediaServer;

use crate::common::{self, lid, MemoryCatalog};

fn request() -> InviteRequest {
    InviteRequest {
        username: "dave".into(),
        password: "pa55word".into(),
        code: "WELCOME".into(),
        email: "dave@example.com".into(),
    }
}

fn use_case(server: &MockServer, catalog: MemoryCatalog) -> InviteUserUseCase {
    let catalog = Arc::new(catalog);
    InviteUserUseCase::new(
        Arc::new(JellyfinMediaServer::new(common::client_for(server))),
        catalog.clone(),
        catalog,
    )
}

async fn mount_create(server: &MockServer, policy: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path("/Users/New"))
        .and(body_json(json!({ "Name": "dave", "Password": "pa55word" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Id": "u-dave",
            "Name": "dave",
            "Policy": policy
        })))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_invite_scopes_policy_to_invitation_libraries() {
    let (server, _) = common::setup_jellyfin_mock().await;
    mount_create(&server, json!({ "IsAdministrator": false })).await;

    Mock::given(method("POST"))
        .and(path("/Users/u-dave/Policy"))
        .and(body_json(json!({
            "EnableAllFolders": false,
            "EnabledFolders": ["a", "b"],
            "IsAdministrator": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Updated": true })))
        .expect(1)
        .mount(&server)
        .await;

    let invitation = Invitation::new("WELCOME").with_libraries(&[lid("a"), lid("b")]);
    let uc = use_case(&server, MemoryCatalog::new(vec![invitation], &["a", "b", "c"]));

    let response = uc.execute(&request()).await.expect("invite failed");
    assert_eq!(response, json!({ "Updated": true }));
}

#[tokio::test]
async fn test_invite_without_specific_libraries_grants_catalog() {
    let (server, _) = common::setup_jellyfin_mock().await;
    mount_create(&server, json!({})).await;

    Mock::given(method("POST"))
        .and(path("/Users/u-dave/Policy"))
        .and(body_json(json!({
            "EnableAllFolders": false,
            "EnabledFolders": ["m", "t"]
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let uc = use_case(
        &server,
        MemoryCatalog::new(vec![Invitation::new("WELCOME")], &["m", "t"]),
    );

    uc.execute(&request()).await.expect("invite failed");
}

#[tokio::test]
async fn test_invite_server_policy_wins_on_collision() {
    let (server, _) = common::setup_jellyfin_mock().await;
    mount_create(&server, json!({ "EnableAllFolders": true })).await;

    Mock::given(method("POST"))
        .and(path("/Users/u-dave/Policy"))
        .and(body_json(json!({
            "EnableAllFolders": true,
            "EnabledFolders": ["a"]
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let invitation = Invitation::new("WELCOME").with_libraries(&[lid("a")]);
    let uc = use_case(&server, MemoryCatalog::new(vec![invitation], &[]));

    uc.execute(&request()).await.expect("invite failed");
}

#[tokio::test]
async fn test_invite_missing_input_makes_no_requests() {
    let (server, _) = common::setup_jellyfin_mock().await;
    let uc = use_case(
        &server,
        MemoryCatalog::new(vec![Invitation::new("WELCOME")], &["a"]),
    );

    let mut req = request();
    req.email.clear();
    let err = uc.execute(&req).await.unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ServiceError>(),
        Some(ServiceError::Validation(_))
    ));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_invite_rejected_creation_is_remote_api_error() {
    let (server, _) = common::setup_jellyfin_mock().await;

    Mock::given(method("POST"))
        .and(path("/Users/New"))
        .respond_with(ResponseTemplate::new(400))
        .mount(&server)
        .await;

    let uc = use_case(
        &server,
        MemoryCatalog::new(vec![Invitation::new("WELCOME")], &["a"]),
    );

    let err = uc.execute(&request()).await.unwrap_err();
    assert_eq!(
        err.downcast_ref::<ServiceError>(),
        Some(&ServiceError::RemoteApi { status: 400 })
    );
}
