use mockito::Server;
use std::error::Error;
use std::io::Write;
use std::time::Duration;

use quicksum::errors::{ConfigError, ErrorKind, SummarizeError};

#[test]
fn test_summarize_error_implements_error_trait() {
    fn assert_error<T: Error>(_: &T) {}

    let error = SummarizeError::NotFound("no captions".to_string());
    assert_error(&error);
}

#[test]
fn test_summarize_error_display() {
    let error = SummarizeError::InvalidReference("https://example.com".to_string());
    assert_eq!(
        format!("{error}"),
        "Invalid content reference: https://example.com"
    );

    let error = SummarizeError::MalformedResponse("no candidates".to_string());
    assert_eq!(
        format!("{error}"),
        "Unexpected response shape from upstream: no candidates"
    );

    let error = SummarizeError::UpstreamFailure("connection reset".to_string());
    assert_eq!(format!("{error}"), "Upstream request failed: connection reset");
}

#[test]
fn test_kind_and_status_mapping() {
    let cases = [
        (SummarizeError::InvalidReference(String::new()), ErrorKind::InvalidReference, 400),
        (SummarizeError::EmptyContent(String::new()), ErrorKind::EmptyContent, 400),
        (SummarizeError::NotFound(String::new()), ErrorKind::NotFound, 404),
        (SummarizeError::NoTranscript(String::new()), ErrorKind::NotFound, 404),
        (SummarizeError::MalformedResponse(String::new()), ErrorKind::MalformedResponse, 500),
        (SummarizeError::UpstreamFailure(String::new()), ErrorKind::UpstreamFailure, 500),
    ];

    for (error, kind, status) in cases {
        assert_eq!(error.kind(), kind);
        assert_eq!(kind.status_code(), status);
        assert_eq!(error.is_client_error(), status == 400);
    }
}

#[test]
fn test_error_kind_wire_name() {
    assert_eq!(ErrorKind::NotFound.to_string(), "NotFound");
    assert_eq!(
        serde_json::to_value(ErrorKind::EmptyContent).unwrap(),
        serde_json::json!("EmptyContent")
    );
    let parsed: ErrorKind = serde_json::from_str("\"UpstreamFailure\"").unwrap();
    assert_eq!(parsed, ErrorKind::UpstreamFailure);
}

#[test]
fn test_serde_json_error_is_malformed_response() {
    let err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
    let error: SummarizeError = err.into();
    assert_eq!(error.kind(), ErrorKind::MalformedResponse);
}

#[tokio::test]
async fn test_reqwest_status_error_conversion() {
    let mut server = Server::new_async().await;
    let _missing = server
        .mock("GET", "/missing")
        .with_status(404)
        .create_async()
        .await;
    let _broken = server
        .mock("GET", "/broken")
        .with_status(502)
        .create_async()
        .await;

    let missing = reqwest::get(format!("{}/missing", server.url()))
        .await
        .unwrap()
        .error_for_status()
        .unwrap_err();
    assert_eq!(SummarizeError::from(missing).kind(), ErrorKind::NotFound);

    let broken = reqwest::get(format!("{}/broken", server.url()))
        .await
        .unwrap()
        .error_for_status()
        .unwrap_err();
    assert_eq!(SummarizeError::from(broken).kind(), ErrorKind::UpstreamFailure);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_reqwest_body_timeout_is_upstream_failure() {
    let mut server = Server::new_async().await;
    let _slow = server
        .mock("GET", "/slow")
        .with_status(200)
        .with_chunked_body(|w| {
            std::thread::sleep(Duration::from_secs(3));
            w.write_all(b"{}")
        })
        .create_async()
        .await;

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(1))
        .build()
        .unwrap();
    let result = async {
        let response = client.get(format!("{}/slow", server.url())).send().await?;
        Ok::<_, SummarizeError>(response.bytes().await?)
    }
    .await;

    let error = result.unwrap_err();
    assert_eq!(error.kind(), ErrorKind::UpstreamFailure, "{error}");
}

#[tokio::test]
async fn test_reqwest_connect_error_is_upstream_failure() {
    let err = reqwest::get("http://127.0.0.1:9/").await.unwrap_err();
    assert_eq!(SummarizeError::from(err).kind(), ErrorKind::UpstreamFailure);
}

#[test]
fn test_config_error_display() {
    assert_eq!(
        ConfigError::Missing("GEMINI_API_KEY").to_string(),
        "Missing required environment variable GEMINI_API_KEY"
    );
    let error = ConfigError::Invalid {
        name: "PORT",
        reason: "not a number".to_string(),
    };
    assert_eq!(error.to_string(), "Invalid value for PORT: not a number");
}
