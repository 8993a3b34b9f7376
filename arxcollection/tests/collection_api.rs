//! Integration tests for arxcollection against a mock Collection API

use arxcollection::{ArtworkRecord, CollectionClient, CollectionIndex, Error};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client_for(server: &MockServer) -> CollectionClient {
    CollectionClient::builder()
        .base_url(server.uri())
        .timeout(Duration::from_secs(5))
        .build()
        .await
        .unwrap()
}

fn mock_object_json(id: u64, image: &str, title: &str, artist: &str) -> serde_json::Value {
    json!({
        "objectID": id,
        "isHighlight": false,
        "primaryImage": image,
        "primaryImageSmall": "",
        "department": "Photographs",
        "title": title,
        "artistDisplayName": artist,
        "objectDate": "1890s",
        "objectURL": format!("https://www.metmuseum.org/art/collection/search/{}", id)
    })
}

#[tokio::test]
async fn test_fetch_index() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/public/collection/v1/objects"))
        .and(query_param("departmentIds", "19"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"total": 3, "objectIDs": [1001, 1002, 1003]})),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let index = client.fetch_index().await.unwrap();

    assert_eq!(index.ids(), &[1001, 1002, 1003]);
}

#[tokio::test]
async fn test_fetch_index_error_status_is_propagated() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/public/collection/v1/objects"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let err = client.fetch_index().await.unwrap_err();

    match err {
        Error::Status { status, .. } => assert_eq!(status.as_u16(), 503),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_index_null_ids_is_not_an_empty_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/public/collection/v1/objects"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"total": 0, "objectIDs": null})),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    assert!(matches!(
        client.fetch_index().await,
        Err(Error::EmptyIndex(19))
    ));
}

#[tokio::test]
async fn test_fetch_index_malformed_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/public/collection/v1/objects"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    assert!(matches!(client.fetch_index().await, Err(Error::Json(_))));
}

#[tokio::test]
async fn test_fetch_random_artwork_uses_identifier_at_position() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/public/collection/v1/objects/1001"))
        .respond_with(ResponseTemplate::new(200).set_body_json(mock_object_json(
            1001,
            "https://images.metmuseum.org/CRDImages/ph/original/1001.jpg",
            "Study",
            "Anon",
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let index = CollectionIndex::from(vec![1001]);
    let record = client.fetch_random_artwork(&index).await;

    let object = record.artwork().expect("artwork record");
    assert_eq!(object.object_id, 1001);
    assert_eq!(object.title, "Study");
    assert_eq!(object.artist_display_name, "Anon");
}

#[tokio::test]
async fn test_fetch_random_artwork_keeps_empty_fields() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/public/collection/v1/objects/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(mock_object_json(7, "", "", "")))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let record = client
        .fetch_random_artwork(&CollectionIndex::from(vec![7]))
        .await;

    let object = record.artwork().expect("empty fields are still an artwork");
    assert!(object.primary_image.is_empty());
    assert!(object.title.is_empty());
    assert!(object.artist_display_name.is_empty());
}

#[tokio::test]
async fn test_fetch_random_artwork_not_found_returns_sentinel() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/public/collection/v1/objects/404"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not a valid object"})))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let record = client
        .fetch_random_artwork(&CollectionIndex::from(vec![404]))
        .await;

    assert_eq!(record, ArtworkRecord::Error);
}

#[tokio::test]
async fn test_fetch_object_not_found_is_reported() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/public/collection/v1/objects/404"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let err = client.fetch_object(404).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_fetch_random_artwork_bad_json_returns_sentinel() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/public/collection/v1/objects/5"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"objectID\": "))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let record = client
        .fetch_random_artwork(&CollectionIndex::from(vec![5]))
        .await;

    assert!(record.is_error());
}

#[tokio::test]
async fn test_fetch_random_artwork_network_error_returns_sentinel() {
    // Reserve a port, then free it so connections are refused
    let uri = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        format!("http://{}", listener.local_addr().unwrap())
    };

    let client = CollectionClient::builder()
        .base_url(uri)
        .timeout(Duration::from_secs(2))
        .build()
        .await
        .unwrap();
    let record = client
        .fetch_random_artwork(&CollectionIndex::from(vec![1, 2, 3]))
        .await;

    assert!(record.is_error());
}

#[tokio::test]
async fn test_fetch_random_artwork_empty_index_returns_sentinel() {
    let mock_server = MockServer::start().await;
    let client = client_for(&mock_server).await;

    let record = client
        .fetch_random_artwork(&CollectionIndex::default())
        .await;

    assert!(record.is_error());
}
