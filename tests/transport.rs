use httpmock::prelude::*;
use migadu_client::{Client, Error, StatusCode};
use std::time::{Duration, Instant};

const AUTH: &str = "Basic dXNlcjp0b2tlbg==";

fn client(server: &MockServer, timeout: Option<Duration>) -> Client {
    Client::new("user", "token", Some(&server.base_url()), "example.com", timeout).unwrap()
}

#[tokio::test]
async fn get_sends_basic_auth_and_json_content_type() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/domains/example.com/mailboxes")
                .header("authorization", AUTH)
                .header("content-type", "application/json");
            then.status(200).body("raw bytes");
        })
        .await;

    let body = client(&server, None).get("mailboxes").await.unwrap();

    mock.assert_async().await;
    assert_eq!(body, b"raw bytes");
}

#[tokio::test]
async fn verbs_map_to_http_methods() {
    let server = MockServer::start_async().await;
    let post = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/domains/example.com/mailboxes")
                .body(r#"{"a":1}"#);
            then.status(200).body("{}");
        })
        .await;
    let put = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path("/domains/example.com/mailboxes/alice")
                .body(r#"{"b":2}"#);
            then.status(200).body("{}");
        })
        .await;
    let delete = server
        .mock_async(|when, then| {
            when.method(DELETE).path("/domains/example.com/mailboxes/alice");
            then.status(200);
        })
        .await;

    let client = client(&server, None);
    client.post("mailboxes", br#"{"a":1}"#.to_vec()).await.unwrap();
    client.put("mailboxes/alice", br#"{"b":2}"#.to_vec()).await.unwrap();
    let body = client.delete("mailboxes/alice").await.unwrap();

    post.assert_async().await;
    put.assert_async().await;
    delete.assert_async().await;
    assert!(body.is_empty());
}

#[tokio::test]
async fn only_200_counts_as_success() {
    for code in [201u16, 404, 500] {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/domains/example.com/mailboxes/alice");
                then.status(code).body(r#"{"local_part":"alice"}"#);
            })
            .await;

        let err = client(&server, None)
            .get("mailboxes/alice")
            .await
            .unwrap_err();

        match err {
            Error::Status { status, body } => {
                assert_eq!(status, StatusCode::from_u16(code).unwrap());
                assert_eq!(body, br#"{"local_part":"alice"}"#);
            }
            other => panic!("expected status error for {code}, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn client_timeout_fires_before_longer_caller_deadline() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/domains/example.com/mailboxes");
            then.status(200)
                .body(r#"{"mailboxes":[]}"#)
                .delay(Duration::from_secs(3));
        })
        .await;

    let client = client(&server, Some(Duration::from_millis(200)));
    let started = Instant::now();
    let result = tokio::time::timeout(Duration::from_secs(10), client.get("mailboxes"))
        .await
        .expect("caller deadline should not be reached");

    let err = result.unwrap_err();
    assert!(err.is_timeout(), "{err:?}");
    assert!(matches!(err, Error::Timeout(d) if d == Duration::from_millis(200)));
    assert!(started.elapsed() < Duration::from_secs(3));
}

#[tokio::test]
async fn shorter_caller_deadline_wins() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/domains/example.com/mailboxes");
            then.status(200)
                .body(r#"{"mailboxes":[]}"#)
                .delay(Duration::from_secs(3));
        })
        .await;

    let client = client(&server, Some(Duration::from_secs(30)));
    let started = Instant::now();
    let result = tokio::time::timeout(Duration::from_millis(200), client.get("mailboxes")).await;

    assert!(result.is_err());
    assert!(started.elapsed() < Duration::from_secs(3));
}

#[tokio::test]
async fn connection_failure_is_a_transport_error() {
    let client = Client::new("user", "token", Some("http://127.0.0.1:1"), "example.com", None).unwrap();

    let err = client.get("mailboxes").await.unwrap_err();

    assert!(matches!(err, Error::Http(_)), "{err:?}");
    assert!(err.status().is_none());
}

#[test]
fn construction_requires_user_token_and_domain() {
    assert!(matches!(
        Client::new("", "token", None, "example.com", None),
        Err(Error::MissingField("user"))
    ));
    assert!(matches!(
        Client::new("user", "", None, "example.com", None),
        Err(Error::MissingField("token"))
    ));
    assert!(matches!(
        Client::new("user", "token", None, "", None),
        Err(Error::MissingField("domain"))
    ));

    let client = Client::new("user", "token", None, "example.com", None).unwrap();
    assert_eq!(client.endpoint(), migadu_client::DEFAULT_ENDPOINT);
    assert_eq!(client.timeout(), Duration::from_secs(120));
}
