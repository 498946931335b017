//! Router-level tests driven through `tower::ServiceExt::oneshot`.
//!
//! Raw request URIs are sent unmodified, so traversal segments reach the
//! handlers exactly as a hostile client would write them.

mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::TestHarness;
use http_body_util::BodyExt;
use tower::ServiceExt;

/// Helper to get response body as string
async fn body_to_string(body: Body) -> String {
    let bytes = body.collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn get(h: &TestHarness, uri: &str) -> (StatusCode, String) {
    let response = h
        .router()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    (status, body_to_string(response.into_body()).await)
}

#[tokio::test]
async fn test_raw_parent_segments_are_forbidden() {
    let h = TestHarness::with_files(&["trips/a.png"]);

    for uri in [
        "/data/../secret.txt",
        "/data/trips/../../secret.txt",
        "/data/..",
        "/data/nowhere/../../secret.txt",
    ] {
        let (status, body) = get(&h, uri).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{uri}");
        assert!(!body.contains("top secret"), "{uri}");
        assert!(!body.contains(h.dir.path().to_str().unwrap()), "{uri}");
    }
}

#[tokio::test]
async fn test_parent_segments_inside_root_are_allowed() {
    let h = TestHarness::with_files(&["trips/a.png", "b.png"]);

    let (status, body) = get(&h, "/data/trips/../b.png").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "b.png");

    let (status, body) = get(&h, "/data/trips/..").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"src="/data/b.png""#));
}

#[cfg(unix)]
#[tokio::test]
async fn test_symlink_escape_is_forbidden() {
    let h = TestHarness::with_files(&["a.png"]);
    std::os::unix::fs::symlink(h.dir.path(), h.root().join("outside")).unwrap();

    let (status, _) = get(&h, "/data/outside/secret.txt").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[cfg(unix)]
#[tokio::test]
async fn test_symlink_escape_after_missing_segment_is_forbidden() {
    let h = TestHarness::with_files(&["a.png"]);
    std::fs::write(h.dir.path().join("leak.png"), b"leak").unwrap();
    std::os::unix::fs::symlink(h.dir.path(), h.root().join("outside")).unwrap();

    for uri in [
        "/data/nowhere/../outside/secret.txt",
        "/data/nowhere/../outside/leak.png",
        "/data/nowhere/../outside",
        "/data/nowhere/../outside/",
    ] {
        let (status, body) = get(&h, uri).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{uri}");
        assert!(!body.contains("top secret"), "{uri}");
        assert!(!body.contains("leak"), "{uri}");
    }
}

#[cfg(unix)]
#[tokio::test]
async fn test_media_context_symlink_escape_after_missing_segment() {
    let h = TestHarness::with_files(&["a.png"]);
    std::fs::write(h.dir.path().join("leak.png"), b"leak").unwrap();
    std::os::unix::fs::symlink(h.dir.path(), h.root().join("outside")).unwrap();

    for query in [
        "nowhere%2F..%2Foutside",
        "nowhere%2F..%2Foutside%2Fleak.png",
        "a.png%2F..%2Foutside",
    ] {
        let (status, body) = get(&h, &format!("/media_context?path={query}")).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{query}");
        assert!(body.is_empty(), "{query}");
    }
}

#[tokio::test]
async fn test_media_context_traversal_in_query() {
    let h = TestHarness::with_files(&["a.png"]);
    let (status, body) = get(&h, "/media_context?path=..%2Fsecret.txt").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_media_context_json_content_type() {
    let h = TestHarness::with_files(&["a.png", "b.png"]);
    let response = h
        .router()
        .oneshot(
            Request::get("/media_context?path=b.png")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/json"
    );
    let json: serde_json::Value =
        serde_json::from_str(&body_to_string(response.into_body()).await).unwrap();
    assert_eq!(json["prev"], "a.png");
    assert_eq!(json["next"], "a.png");
    assert_eq!(json["current_index"], 1);
}

#[tokio::test]
async fn test_data_without_trailing_slash() {
    let h = TestHarness::with_files(&["a.png"]);
    let (status, body) = get(&h, "/data").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"src="/data/a.png""#));
}

#[tokio::test]
async fn test_empty_root_shows_empty_state() {
    let h = TestHarness::new();
    let (status, body) = get(&h, "/data/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No media files in /"));

    let (status, body) = get(&h, "/media_context").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_empty());
}

#[cfg(unix)]
#[tokio::test]
async fn test_escaped_characters_change_the_lookup() {
    // A tab in the request is escaped before lookup, so a file whose real
    // name contains a tab is not reachable by that name.
    let h = TestHarness::with_files(&["tab\there.png", "plain.png"]);
    let (status, body) = get(&h, "/media_context?path=tab%09here.png").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let h = TestHarness::new();
    let (status, _) = get(&h, "/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
