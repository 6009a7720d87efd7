mod common;

use std::time::Duration;

use common::character_page_json;
use rickdex::api::{ApiClient, Character, Episode, FetchError, ResourceKind};
use rickdex::resource::{HttpRepository, Repositories, ResourceItems, ResourceRepository};
use tokio_test::{assert_err, assert_ok};
use wiremock::{
    matchers::{method, path, query_param, query_param_is_missing},
    Mock, MockServer, ResponseTemplate,
};

// ============================================================================
// Helper Functions
// ============================================================================

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(server.uri(), Some(Duration::from_secs(5)))
}

fn characters(server: &MockServer) -> HttpRepository<Character> {
    HttpRepository::new(client_for(server))
}

// ============================================================================
// Successful Pages
// ============================================================================

#[tokio::test]
async fn test_fetch_page_sends_page_and_name() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/character"))
        .and(query_param("page", "2"))
        .and(query_param("name", "rick"))
        .respond_with(ResponseTemplate::new(200).set_body_json(character_page_json(
            &[21, 22],
            Some("https://rickandmortyapi.com/api/character?page=3&name=rick"),
            Some("https://rickandmortyapi.com/api/character?page=1&name=rick"),
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let page = assert_ok!(characters(&mock_server).fetch_page(Some(2), Some("rick")).await);

    assert_eq!(page.info.count, 826);
    assert!(page.info.has_next());
    assert!(page.info.has_prev());
    match page.items {
        ResourceItems::Characters(items) => {
            let ids: Vec<u32> = items.iter().map(|c| c.id).collect();
            assert_eq!(ids, vec![21, 22]);
            assert_eq!(items[0].name, "Character 21");
        }
        other => panic!("expected characters, got {:?}", other.kind()),
    }
}

#[tokio::test]
async fn test_empty_filter_omits_name_param() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/character"))
        .and(query_param("page", "1"))
        .and(query_param_is_missing("name"))
        .respond_with(ResponseTemplate::new(200).set_body_json(character_page_json(
            &[1, 2],
            Some("https://rickandmortyapi.com/api/character?page=2"),
            None,
        )))
        .expect(2)
        .mount(&mock_server)
        .await;

    let repo = characters(&mock_server);
    assert_ok!(repo.fetch_page(Some(1), None).await);
    // Whitespace-only counts as no filter
    assert_ok!(repo.fetch_page(Some(1), Some("   ")).await);
}

#[tokio::test]
async fn test_filter_is_trimmed_before_sending() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/character"))
        .and(query_param("name", "morty"))
        .respond_with(ResponseTemplate::new(200).set_body_json(character_page_json(&[2], None, None)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let page = assert_ok!(characters(&mock_server).fetch_page(Some(1), Some("  morty ")).await);
    assert_eq!(page.items.len(), 1);
}

#[tokio::test]
async fn test_episode_repository_hits_episode_path() {
    let mock_server = MockServer::start().await;

    let body = serde_json::json!({
        "info": {"count": 51, "pages": 3, "next": "https://rickandmortyapi.com/api/episode?page=2", "prev": null},
        "results": [{
            "id": 1,
            "name": "Pilot",
            "air_date": "December 2, 2013",
            "episode": "S01E01",
            "characters": [],
            "url": "https://rickandmortyapi.com/api/episode/1",
            "created": "2017-11-10T12:56:33.798Z"
        }]
    });

    Mock::given(method("GET"))
        .and(path("/episode"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(&mock_server)
        .await;

    let repos = Repositories::http(client_for(&mock_server));
    let repo = repos.get(ResourceKind::Episodes);
    assert_eq!(repo.kind(), ResourceKind::Episodes);

    let page = assert_ok!(repo.fetch_page(Some(1), None).await);
    match page.items {
        ResourceItems::Episodes(items) => assert_eq!(
            items,
            vec![Episode {
                id: 1,
                name: "Pilot".to_string(),
                air_date: "December 2, 2013".to_string(),
                code: "S01E01".to_string(),
            }]
        ),
        other => panic!("expected episodes, got {:?}", other.kind()),
    }
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn test_server_error_is_protocol_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/character"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let err = assert_err!(characters(&mock_server).fetch_page(Some(1), None).await);
    assert_eq!(
        err,
        FetchError::Protocol {
            status: 500,
            message: "Internal Server Error".to_string(),
        }
    );
}

#[tokio::test]
async fn test_not_found_with_filter_is_protocol_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/character"))
        .and(query_param("name", "zzzz"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({"error": "There is nothing here"})),
        )
        .mount(&mock_server)
        .await;

    let err = assert_err!(characters(&mock_server).fetch_page(Some(1), Some("zzzz")).await);
    assert_eq!(
        err,
        FetchError::Protocol {
            status: 404,
            message: "There is nothing here".to_string(),
        }
    );
}

#[tokio::test]
async fn test_not_found_without_filter_is_protocol_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/character"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({"error": "There is nothing here"})),
        )
        .mount(&mock_server)
        .await;

    let err = assert_err!(characters(&mock_server).fetch_page(Some(99), None).await);
    assert_eq!(
        err,
        FetchError::Protocol {
            status: 404,
            message: "There is nothing here".to_string(),
        }
    );
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/character"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"info\": {\"count\": 1"))
        .mount(&mock_server)
        .await;

    let err = assert_err!(characters(&mock_server).fetch_page(Some(1), None).await);
    assert!(matches!(err, FetchError::Decode(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_wrong_shape_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/character"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"results": "nope"})),
        )
        .mount(&mock_server)
        .await;

    let err = assert_err!(characters(&mock_server).fetch_page(Some(1), None).await);
    assert!(matches!(err, FetchError::Decode(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_unreachable_host_is_network_error() {
    // Nothing listens on port 1
    let repo: HttpRepository<Character> = HttpRepository::new(ApiClient::new(
        "http://127.0.0.1:1/api",
        Some(Duration::from_secs(2)),
    ));
    let err = assert_err!(repo.fetch_page(Some(1), None).await);
    assert!(matches!(err, FetchError::Network(_)), "got {:?}", err);
}
