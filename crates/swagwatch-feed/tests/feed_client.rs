//! Integration tests for `FeedClient` using wiremock HTTP mocks.

use chrono::{TimeZone, Utc};
use swagwatch_feed::{AnnouncementFeed, FeedClient, FeedError, FeedQuery};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> FeedClient {
    FeedClient::with_base_url(
        "test-bearer",
        FeedQuery {
            user_id: 137_060_402,
            max_results: 5,
        },
        5,
        "swagwatch-test/0.1",
        base_url,
    )
    .expect("client construction should not fail")
}

#[tokio::test]
async fn recent_announcements_returns_posts_in_feed_order() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "data": [
            {
                "id": "1397341135173918722",
                "text": "There's a new #SwagCode out! It's worth 5 SBs and expires at 07:30 PM PDT. Get it here: https://t.co/VAUSRcHKqT",
                "created_at": "2021-05-25T23:57:42.000Z"
            },
            {
                "id": "1397000000000000000",
                "text": "Older post",
                "created_at": "2021-05-25T01:00:00.000Z"
            }
        ],
        "meta": { "result_count": 2 }
    });

    Mock::given(method("GET"))
        .and(path("/2/users/137060402/tweets"))
        .and(query_param("tweet.fields", "created_at"))
        .and(query_param("max_results", "5"))
        .and(header("authorization", "Bearer test-bearer"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let posts = client
        .recent_announcements()
        .await
        .expect("should parse timeline");

    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].id, "1397341135173918722");
    assert!(posts[0].raw_text.contains("5 SBs"));
    assert_eq!(
        posts[0].posted_at,
        Utc.with_ymd_and_hms(2021, 5, 25, 23, 57, 42).unwrap()
    );
    assert_eq!(posts[1].raw_text, "Older post");
}

#[tokio::test]
async fn recent_announcements_without_data_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2/users/137060402/tweets"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "meta": { "result_count": 0 } })),
        )
        .mount(&server)
        .await;

    let posts = test_client(&server.uri())
        .recent_announcements()
        .await
        .expect("empty timeline is not an error");
    assert!(posts.is_empty());
}

#[tokio::test]
async fn non_ok_status_is_fatal() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2/users/137060402/tweets"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .recent_announcements()
        .await
        .unwrap_err();
    assert!(
        matches!(err, FeedError::UnexpectedStatus { status: 401, ref body } if body == "Unauthorized"),
        "expected UnexpectedStatus(401), got: {err:?}"
    );
}

#[tokio::test]
async fn non_200_success_status_is_also_fatal() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2/users/137060402/tweets"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .recent_announcements()
        .await
        .unwrap_err();
    assert!(matches!(err, FeedError::UnexpectedStatus { status: 204, .. }));
}

#[tokio::test]
async fn malformed_body_is_a_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2/users/137060402/tweets"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "data": [{ "text": "no timestamp" }] })),
        )
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .recent_announcements()
        .await
        .unwrap_err();
    assert!(
        matches!(err, FeedError::Deserialize { .. }),
        "expected Deserialize, got: {err:?}"
    );
}

#[tokio::test]
async fn unreachable_server_is_an_http_error() {
    // Port 9 (discard) is not listening in the test environment.
    let err = test_client("http://127.0.0.1:9")
        .recent_announcements()
        .await
        .unwrap_err();
    assert!(matches!(err, FeedError::Http(_)), "got: {err:?}");
}
