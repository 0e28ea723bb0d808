//! Integration tests for media folder listing and library scans

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use jellyinvite_core::domain::ServiceError;
use jellyinvite_jellyfin::JellyfinMediaServer;

use crate::common;

#[tokio::test]
async fn test_list_libraries() {
    let (server, client) = common::setup_jellyfin_mock().await;

    Mock::given(method("GET"))
        .and(path("/Library/MediaFolders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Items": [
                { "Id": "lib-movies", "Name": "Movies", "CollectionType": "movies" },
                { "Id": "lib-music", "Name": "Music" }
            ],
            "TotalRecordCount": 2
        })))
        .mount(&server)
        .await;

    let libraries = client.list_libraries().await.expect("list_libraries failed");

    assert_eq!(libraries.len(), 2);
    assert_eq!(libraries[0].id, common::lid("lib-movies"));
    assert_eq!(libraries[0].collection_type.as_deref(), Some("movies"));
    assert!(libraries[1].collection_type.is_none());
}

#[tokio::test]
async fn test_list_libraries_without_items_is_not_found() {
    for body in [json!({ "TotalRecordCount": 0 }), json!({ "Items": null })] {
        let (server, client) = common::setup_jellyfin_mock().await;

        Mock::given(method("GET"))
            .and(path("/Library/MediaFolders"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let err = client.list_libraries().await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }
}

#[tokio::test]
async fn test_list_libraries_empty_items_is_ok() {
    let (server, client) = common::setup_jellyfin_mock().await;

    Mock::given(method("GET"))
        .and(path("/Library/MediaFolders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Items": [] })))
        .mount(&server)
        .await;

    assert!(client.list_libraries().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_scan_surfaces_not_found() {
    use jellyinvite_core::usecases::ScanLibrariesUseCase;

    let (server, client) = common::setup_jellyfin_mock().await;

    Mock::given(method("GET"))
        .and(path("/Library/MediaFolders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let catalog = Arc::new(common::MemoryCatalog::new(vec![], &[]));
    let uc = ScanLibrariesUseCase::new(Arc::new(JellyfinMediaServer::new(client)), catalog);

    let err = uc.execute().await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ServiceError>(),
        Some(ServiceError::NotFound(_))
    ));
}
