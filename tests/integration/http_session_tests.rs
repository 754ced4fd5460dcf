//! HttpSession against a mock HTTP server

use gpu_harvest::config::SessionConfig;
use gpu_harvest::session::{HttpSessionFactory, Session, SessionFactory};
use gpu_harvest::SessionError;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(format!("<html><body>{body}</body></html>"))
        .insert_header("content-type", "text/html")
}

fn factory() -> HttpSessionFactory {
    HttpSessionFactory::new(&SessionConfig {
        request_timeout_secs: 5,
        ..SessionConfig::default()
    })
    .expect("Failed to build client")
}

#[tokio::test]
async fn test_open_snapshot_and_follow_next() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/Category/VideoCards"))
        .and(query_param("Page", "2"))
        .respond_with(html("<p>second page</p>"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/Category/VideoCards"))
        .respond_with(html(
            r#"<p>first page</p>
               <div class="AJAX_List_Pager_Next"><a href="/Category/VideoCards?Search=3060&Page=2">Next</a></div>"#,
        ))
        .mount(&mock_server)
        .await;

    let mut session = factory().create().await.expect("Failed to create session");
    session
        .open(&format!("{base_url}/Category/VideoCards?Search=3060"))
        .await
        .expect("open failed");

    let first = session.snapshot().await.unwrap();
    assert!(first.markup.contains("first page"));
    assert!(first.current_url.ends_with("/Category/VideoCards?Search=3060"));

    assert!(session.element_present(".AJAX_List_Pager_Next a").await.unwrap());
    assert!(!session.element_present(".ais-Pagination-item--nextPage a").await.unwrap());

    session.click(".AJAX_List_Pager_Next a").await.expect("click failed");
    let second = session.snapshot().await.unwrap();
    assert!(second.markup.contains("second page"));
    assert!(second.current_url.ends_with("Page=2"));

    session.close().await.unwrap();
    assert!(matches!(session.snapshot().await, Err(SessionError::Closed)));
}

#[tokio::test]
async fn test_http_error_is_navigation_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let mut session = factory().create().await.unwrap();
    let result = session.open(&format!("{}/missing", mock_server.uri())).await;

    match result {
        Err(SessionError::Navigation { reason, .. }) => assert_eq!(reason, "HTTP 404"),
        other => panic!("expected navigation failure, got {other:?}"),
    }
}

#[tokio::test]
async fn test_invalid_selector() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(html("<p>hi</p>"))
        .mount(&mock_server)
        .await;

    let mut session = factory().create().await.unwrap();
    session.open(&mock_server.uri()).await.unwrap();

    let result = session.element_present("[[[").await;
    assert!(matches!(result, Err(SessionError::InvalidSelector(_))));
}

#[tokio::test]
async fn test_unreachable_host() {
    let mut session = factory().create().await.unwrap();
    let result = session.open("http://127.0.0.1:1/").await;
    assert!(matches!(
        result,
        Err(SessionError::Http { .. }) | Err(SessionError::Timeout { .. })
    ));
}
