use std::time::Duration;

use ghcal_core::{CalendarSource, CalendarWindow, GhcalError};
use ghcal_github::GithubSource;
use httpmock::prelude::*;

fn source_for(server: &MockServer) -> GithubSource {
    GithubSource::builder()
        .base_url(server.base_url())
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}

#[tokio::test]
async fn years_page_sends_xhr_headers_and_query() {
    let server = MockServer::start_async().await;
    let referer = server.url("/octocat");
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/octocat")
                .query_param("action", "show")
                .query_param("controller", "profiles")
                .query_param("tab", "contributions")
                .query_param("user_id", "octocat")
                .header("x-requested-with", "XMLHttpRequest")
                .header("referer", referer.as_str());
            then.status(200).body("<a class=\"js-year-link\">2022</a>");
        })
        .await;

    let body = source_for(&server).years_page("octocat").await.unwrap();
    assert_eq!(body, b"<a class=\"js-year-link\">2022</a>".to_vec());
    mock.assert_async().await;
}

#[tokio::test]
async fn year_window_asks_for_december_range() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/users/octocat/contributions")
                .query_param("tab", "overview")
                .query_param("from", "2021-12-01")
                .query_param("to", "2021-12-31")
                .header("x-requested-with", "XMLHttpRequest");
            then.status(200).body("<table></table>");
        })
        .await;

    let body = source_for(&server)
        .calendar_page("octocat", CalendarWindow::Year(2021))
        .await
        .unwrap();
    assert_eq!(body, b"<table></table>".to_vec());
    mock.assert_async().await;
}

#[tokio::test]
async fn trailing_window_hits_bare_contributions_path() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/users/octocat/contributions");
            then.status(200).body("trailing");
        })
        .await;

    let body = source_for(&server)
        .calendar_page("octocat", CalendarWindow::Trailing)
        .await
        .unwrap();
    assert_eq!(body, b"trailing".to_vec());
    mock.assert_async().await;
}

#[tokio::test]
async fn non_success_status_is_a_request_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/users/ghost/contributions");
            then.status(404).body("not found");
        })
        .await;

    let err = source_for(&server)
        .calendar_page("ghost", CalendarWindow::Trailing)
        .await
        .unwrap_err();
    match err {
        GhcalError::Request { url, msg } => {
            assert!(url.ends_with("/users/ghost/contributions"), "url: {url}");
            assert!(msg.contains("404"), "msg: {msg}");
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_host_is_a_request_error() {
    // Bind then drop to get a port nothing listens on.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let source = GithubSource::builder()
        .base_url(format!("http://{addr}"))
        .timeout(Duration::from_secs(2))
        .build()
        .unwrap();

    let err = source.years_page("octocat").await.unwrap_err();
    assert!(matches!(err, GhcalError::Request { .. }), "got {err:?}");
}
