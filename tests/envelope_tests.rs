// Unit tests for status envelopes and the per-resource fetchers
//
// Fetchers are exercised against the fake backend, including the
// no-request sentinel path.

mod common;

use common::{gateway, FakeBackend};
use serde_json::json;
use session_lens::session::SessionMetadata;
use session_lens::{Envelope, ResourceKind, ResourceStatus, SessionFetcher};

#[test]
fn test_status_parses_lifecycle_values() {
    let parse = |s: &str| serde_json::from_value::<ResourceStatus>(json!(s)).unwrap();

    assert_eq!(parse("not_started"), ResourceStatus::NotStarted);
    assert_eq!(parse("queued"), ResourceStatus::Queued);
    assert_eq!(parse("processing"), ResourceStatus::Processing);
    assert_eq!(parse("completed"), ResourceStatus::Completed);
    assert_eq!(parse("failed"), ResourceStatus::Failed);
}

#[test]
fn test_metadata_aliases() {
    assert_eq!(ResourceStatus::from("ready"), ResourceStatus::Completed);
    assert_eq!(ResourceStatus::from("error"), ResourceStatus::Failed);
    assert_eq!(ResourceStatus::from("Error"), ResourceStatus::Unavailable);
}

#[test]
fn test_unknown_status_is_unavailable() {
    assert_eq!(ResourceStatus::from("exploded"), ResourceStatus::Unavailable);
}

#[test]
fn test_sentinel_serializes_as_error() {
    let envelope: Envelope<String> = Envelope::unavailable();
    let json = serde_json::to_value(&envelope).unwrap();
    assert_eq!(json, json!({"status": "Error", "data": null}));
}

#[test]
fn test_normalized_drops_data_unless_completed() {
    let envelope = Envelope::new(ResourceStatus::Processing, Some("https://x".to_string()));
    assert!(envelope.normalized().data.is_none());

    let envelope = Envelope::completed("https://x".to_string());
    assert_eq!(envelope.normalized().data.as_deref(), Some("https://x"));
}

#[test]
fn test_completed_may_carry_no_data() {
    let envelope: Envelope<String> =
        serde_json::from_value(json!({"status": "completed", "data": null})).unwrap();
    assert!(envelope.is_completed());
    assert!(envelope.data.is_none());

    let envelope: Envelope<String> = serde_json::from_value(json!({"status": "queued"})).unwrap();
    assert_eq!(envelope.status, ResourceStatus::Queued);
}

#[test]
fn test_lifecycle_transitions() {
    use ResourceStatus::*;

    assert!(NotStarted.can_transition_to(Queued));
    assert!(Queued.can_transition_to(Processing));
    assert!(Processing.can_transition_to(Completed));
    assert!(Processing.can_transition_to(Failed));
    assert!(!Completed.can_transition_to(Processing));
    assert!(!Failed.can_transition_to(Queued));

    assert!(Processing.is_processing());
    assert!(Completed.is_terminal());
    assert!(!Queued.is_terminal());
}

#[test]
fn test_resource_paths() {
    assert_eq!(ResourceKind::Metadata.path("s1"), "/api/sessions/metadata/s1");
    assert_eq!(ResourceKind::Summary.path("s1"), "/api/sessions/summary/s1");
    assert_eq!(ResourceKind::Transcript.path("s1"), "/api/sessions/transcript/s1");
    assert_eq!(ResourceKind::Emotion.path("s1"), "/api/sessions/emotions/s1");
    assert_eq!(ResourceKind::Audio.path("s1"), "/api/sessions/audio/s1");
}

#[tokio::test]
async fn test_fetch_without_user_returns_sentinel() {
    let backend = FakeBackend::new();
    let url = backend.serve().await;
    let fetcher = SessionFetcher::new(gateway(&url, None));

    for kind in ResourceKind::ALL {
        let envelope = fetcher.fetch(kind, "s1").await.unwrap();
        assert_eq!(envelope.status, ResourceStatus::Unavailable);
        assert!(envelope.data.is_none());
    }

    assert!(backend.requests().is_empty(), "no request should be made");
}

#[tokio::test]
async fn test_fetch_without_session_id_returns_sentinel() {
    let backend = FakeBackend::new();
    let url = backend.serve().await;
    let fetcher = SessionFetcher::new(gateway(&url, Some("t")));

    let envelope = fetcher.transcript("").await.unwrap();

    assert_eq!(envelope.status, ResourceStatus::Unavailable);
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn test_fetch_null_body_returns_sentinel() {
    let backend = FakeBackend::new();
    backend.respond("GET", "/api/sessions/audio/s1", 200, "null");
    let url = backend.serve().await;

    let envelope = SessionFetcher::new(gateway(&url, Some("t")))
        .audio("s1")
        .await
        .unwrap();

    assert_eq!(envelope.status, ResourceStatus::Unavailable);
}

#[tokio::test]
async fn test_fetch_metadata_decodes_inline_record() {
    let backend = FakeBackend::new();
    backend.respond(
        "GET",
        "/api/sessions/metadata/s1",
        200,
        json!({
            "status": "completed",
            "data": {
                "id": "s1",
                "title": "Weekly sync",
                "status": "ready",
                "summary": null,
                "duration": 3723.0,
                "participants": ["Ana", "Ben"],
                "created_at": "2025-01-05T10:00:00Z",
                "updated_at": "2025-01-05T11:00:00Z"
            }
        })
        .to_string(),
    );
    let url = backend.serve().await;

    let envelope = SessionFetcher::new(gateway(&url, Some("t")))
        .metadata("s1")
        .await
        .unwrap();

    let metadata: SessionMetadata = envelope.data.unwrap();
    assert_eq!(metadata.title, "Weekly sync");
    assert_eq!(metadata.status, ResourceStatus::Completed);
    assert_eq!(metadata.duration, Some(3723.0));
    assert_eq!(
        metadata.participants,
        Some(vec!["Ana".to_string(), "Ben".to_string()])
    );
}

#[tokio::test]
async fn test_fetch_pointer_envelope() {
    let backend = FakeBackend::new();
    backend.respond(
        "GET",
        "/api/sessions/emotions/s1",
        200,
        r#"{"status":"completed","data":"https://storage/emotions.json"}"#,
    );
    backend.respond(
        "GET",
        "/api/sessions/summary/s1",
        200,
        r#"{"status":"processing","data":"https://storage/early.md"}"#,
    );
    let url = backend.serve().await;
    let fetcher = SessionFetcher::new(gateway(&url, Some("t")));

    let emotion = fetcher.emotion("s1").await.unwrap();
    assert_eq!(emotion.data.as_deref(), Some("https://storage/emotions.json"));

    let summary = fetcher.summary("s1").await.unwrap();
    assert_eq!(summary.status, ResourceStatus::Processing);
    assert!(summary.data.is_none(), "data only accompanies completed");
}

#[tokio::test]
async fn test_fetch_propagates_http_errors() {
    let backend = FakeBackend::new();
    backend.respond("GET", "/api/sessions/transcript/s1", 500, r#"{"detail":"boom"}"#);
    let url = backend.serve().await;

    let err = SessionFetcher::new(gateway(&url, Some("t")))
        .transcript("s1")
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "boom");
}
