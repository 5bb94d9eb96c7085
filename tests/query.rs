use sanity_query::{Client, ClientBuilder, SanityError};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const QUERY_PATH: &str = "/v2021-10-21/data/query/production";

fn client_for(server: &MockServer) -> Client {
    ClientBuilder::new()
        .project_id("abc123")
        .query_url(format!("{}{}", server.uri(), QUERY_PATH))
        .build()
        .unwrap()
}

#[tokio::test]
async fn returns_result_and_timing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(QUERY_PATH))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "query": "*[_type == 'post']" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": [1, 2, 3],
            "ms": 12
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = client.execute_query("*[_type == 'post']", None).await.unwrap();

    assert_eq!(result.result, Some(json!([1, 2, 3])));
    assert_eq!(result.elapsed_ms, Some(12.0));
    assert_eq!(result.query, None);
}

#[tokio::test]
async fn error_key_fails_despite_success_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "error": "bad query" })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.execute_query("*[", None).await.unwrap_err();

    match err {
        SanityError::RemoteQuery { error } => assert_eq!(error, json!("bad query")),
        other => panic!("expected RemoteQuery, got {other:?}"),
    }
}

#[tokio::test]
async fn structured_error_is_carried_verbatim() {
    let server = MockServer::start().await;
    let remote = json!({
        "description": "Expected ']'",
        "start": 2,
        "type": "queryParseError"
    });
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "error": remote.clone() })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.execute_query("*[", None).await.unwrap_err();
    assert_eq!(err.payload(), remote);
}

#[tokio::test]
async fn failed_status_ignores_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": "should not be read",
            "result": [1]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.execute_query("*", None).await.unwrap_err();

    assert!(matches!(err, SanityError::QueryFailed { status_code: 500 }));
}

#[tokio::test]
async fn client_error_status_is_query_failed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.execute_query("*", None).await.unwrap_err();
    assert!(err.is_query_failed());
}

#[tokio::test]
async fn non_mapping_params_send_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": [] })))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let params = json!("not-a-mapping");
    let err = client.execute_query("*", Some(&params)).await.unwrap_err();

    assert!(matches!(err, SanityError::InvalidArgument { .. }));
}

#[tokio::test]
async fn empty_params_are_left_out_of_the_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_json(json!({ "query": "*" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": [] })))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let empty = json!({});
    client.execute_query("*", Some(&empty)).await.unwrap();
    client.execute_query("*", None).await.unwrap();
}

#[tokio::test]
async fn typed_params_and_result() {
    #[derive(Serialize)]
    struct BySlug<'a> {
        slug: &'a str,
    }

    #[derive(Deserialize, Debug, PartialEq)]
    struct Post {
        title: String,
    }

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_json(json!({
            "query": "*[slug.current == $slug][0]{title}",
            "params": { "slug": "hello" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ms": 4,
            "query": "*[slug.current == $slug][0]{title}",
            "result": { "title": "Hello" }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = client
        .query_with("*[slug.current == $slug][0]{title}", &BySlug { slug: "hello" })
        .await
        .unwrap();
    assert_eq!(result.query.as_deref(), Some("*[slug.current == $slug][0]{title}"));
    assert_eq!(
        result.deserialize_result::<Post>().unwrap(),
        Some(Post { title: "Hello".into() })
    );

    let params = json!({ "slug": "hello" });
    let post: Post = client
        .fetch("*[slug.current == $slug][0]{title}", Some(&params))
        .await
        .unwrap();
    assert_eq!(post.title, "Hello");
}

#[tokio::test]
async fn fetch_missing_result_as_none() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ms": 1 })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let post: Option<serde_json::Value> =
        client.fetch("*[_id == 'missing'][0]", None).await.unwrap();
    assert_eq!(post, None);
}

#[tokio::test]
async fn invalid_json_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.execute_query("*", None).await.unwrap_err();
    assert!(matches!(err, SanityError::Decode(_)));
}

#[tokio::test]
async fn array_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([12, "q", "bad query"])))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.execute_query("*", None).await.unwrap_err();
    assert!(matches!(err, SanityError::Decode(_)));
}

#[tokio::test]
async fn typed_non_object_params_send_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": [] })))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.query_with("*", &vec![1, 2]).await.unwrap_err();

    assert!(matches!(err, SanityError::InvalidArgument { .. }));
}

#[tokio::test]
async fn slow_response_hits_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "result": [] }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let client = ClientBuilder::new()
        .project_id("abc123")
        .query_url(format!("{}{}", server.uri(), QUERY_PATH))
        .timeout(Duration::from_millis(100))
        .build()
        .unwrap();
    let err = client.execute_query("*", None).await.unwrap_err();

    match err {
        SanityError::Http(e) => assert!(e.is_timeout(), "expected a timeout, got {e}"),
        other => panic!("expected Http timeout, got {other:?}"),
    }
}
