//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint of both services.

use axum::{
    body::Body,
    http::{Request, Response, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use text_metrics::{
    api::create_router,
    cache::{NoopCache, SharedCache},
    ops::{CHAR_COUNT, UNIQUE_CHARS, UNIQUE_WORDS},
    AppState, Config, OperationRegistry,
};
use tower::ServiceExt;

// == Helper Functions ==

fn create_app(operation_key: &str) -> Router {
    create_app_with_capacity(operation_key, 100)
}

fn create_app_with_capacity(operation_key: &str, capacity: usize) -> Router {
    create_app_with_config(
        operation_key,
        Config {
            cache_capacity: capacity,
            ..Config::default()
        },
    )
}

fn create_app_with_config(operation_key: &str, config: Config) -> Router {
    let registry = OperationRegistry::with_builtins().unwrap();
    let state = AppState::from_config(operation_key, &registry, &config).unwrap();
    create_router(state)
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn post_op(app: &Router, body: &str) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/op")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn get(app: &Router, uri: &str) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

// == HEALTH Endpoint Tests ==

#[tokio::test]
async fn test_health_endpoint_both_services() {
    for key in [UNIQUE_CHARS, UNIQUE_WORDS] {
        let app = create_app(key);

        let response = get(&app, "/healthz").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_to_json(response.into_body()).await, json!({"ok": true}));
    }
}

// == OP Endpoint Tests ==

#[tokio::test]
async fn test_unique_chars_end_to_end() {
    let app = create_app(UNIQUE_CHARS);

    let response = post_op(&app, r#"{"text":"aAbB"}"#).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_to_json(response.into_body()).await,
        json!({"key": "unique_chars", "value": 4, "cache_hit": false})
    );

    let response = post_op(&app, r#"{"text":"aAbB"}"#).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_to_json(response.into_body()).await,
        json!({"key": "unique_chars", "value": 4, "cache_hit": true})
    );
}

#[tokio::test]
async fn test_unique_words_end_to_end() {
    let app = create_app(UNIQUE_WORDS);

    let cases = [("hello world", 2), ("", 1), ("a  b", 3), ("single", 1)];
    for (text, expected) in cases {
        let body = json!({ "text": text }).to_string();
        let response = post_op(&app, &body).await;

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_to_json(response.into_body()).await;
        assert_eq!(json["key"], "unique_words");
        assert_eq!(json["value"], expected, "text {:?}", text);
        assert_eq!(json["cache_hit"], false);
    }
}

#[tokio::test]
async fn test_unique_chars_empty_text() {
    let app = create_app(UNIQUE_CHARS);

    let response = post_op(&app, r#"{"text":""}"#).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_to_json(response.into_body()).await["value"], 0);
}

#[tokio::test]
async fn test_services_cache_independently() {
    let chars = create_app(UNIQUE_CHARS);
    let words = create_app(UNIQUE_WORDS);

    post_op(&chars, r#"{"text":"a b"}"#).await;
    let response = post_op(&words, r#"{"text":"a b"}"#).await;

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["cache_hit"], false);
    assert_eq!(json["value"], 2);
}

#[tokio::test]
async fn test_extra_fields_are_ignored() {
    let app = create_app(UNIQUE_CHARS);

    let response = post_op(&app, r#"{"text":"aabb","other":1}"#).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_to_json(response.into_body()).await["value"], 2);
}

#[tokio::test]
async fn test_char_count_measures_text_only() {
    let app = create_app(CHAR_COUNT);

    let response = post_op(&app, r#"{"text":"abc","deps":{"normalized":"ab"}}"#).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_to_json(response.into_body()).await,
        json!({"key": "char_count", "value": 3, "cache_hit": false})
    );
}

#[tokio::test]
async fn test_escaped_surrogate_pair_counts_two_code_units() {
    let app = create_app(UNIQUE_CHARS);

    let response = post_op(&app, r#"{"text":"\ud83d\ude00"}"#).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_to_json(response.into_body()).await["value"], 2);
}

#[tokio::test]
async fn test_body_without_content_type_is_parsed() {
    let app = create_app(UNIQUE_WORDS);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/op")
                .body(Body::from(r#"{"text":"one two three"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_to_json(response.into_body()).await["value"], 3);
}

// == Validation Tests ==

#[tokio::test]
async fn test_invalid_bodies_rejected_by_both_services() {
    let bodies = [
        "{}",
        r#"{"text":123}"#,
        r#"{"text":null}"#,
        r#"{"text":["a"]}"#,
        r#"["text"]"#,
        "null",
        "",
        r#"{"text": "unterminated"#,
        r#"{"text":"\ud800a"}"#,
        r#"{"text":"\udc00"}"#,
    ];

    for key in [UNIQUE_CHARS, UNIQUE_WORDS] {
        let app = create_app(key);
        for body in bodies {
            let response = post_op(&app, body).await;
            assert_eq!(
                response.status(),
                StatusCode::BAD_REQUEST,
                "{} accepted {:?}",
                key,
                body
            );
            assert!(body_to_string(response.into_body()).await.is_empty());
        }
    }
}

#[tokio::test]
async fn test_rejected_request_does_not_touch_cache() {
    let app = create_app(UNIQUE_CHARS);

    post_op(&app, r#"{"text":5}"#).await;

    let json = body_to_json(get(&app, "/stats").await.into_body()).await;
    assert_eq!(json["hits"], 0);
    assert_eq!(json["misses"], 0);
    assert_eq!(json["requests"], 0);
}

// == Eviction Tests ==

#[tokio::test]
async fn test_lru_eviction_via_api() {
    let app = create_app_with_capacity(UNIQUE_CHARS, 2);

    post_op(&app, r#"{"text":"first"}"#).await;
    post_op(&app, r#"{"text":"second"}"#).await;
    // Touch "first" so "second" becomes least recently used
    post_op(&app, r#"{"text":"first"}"#).await;
    post_op(&app, r#"{"text":"third"}"#).await;

    let first = body_to_json(post_op(&app, r#"{"text":"first"}"#).await.into_body()).await;
    assert_eq!(first["cache_hit"], true);

    let second = body_to_json(post_op(&app, r#"{"text":"second"}"#).await.into_body()).await;
    assert_eq!(second["cache_hit"], false);

    let stats = body_to_json(get(&app, "/stats").await.into_body()).await;
    assert_eq!(stats["evictions"], 2);
    assert_eq!(stats["total_entries"], 2);
}

#[tokio::test]
async fn test_noop_cache_never_hits() {
    let operation = OperationRegistry::with_builtins()
        .unwrap()
        .resolve(UNIQUE_CHARS).unwrap();
    let app = create_router(AppState::new(operation, Arc::new(NoopCache::new())));

    post_op(&app, r#"{"text":"aAbB"}"#).await;
    let json = body_to_json(post_op(&app, r#"{"text":"aAbB"}"#).await.into_body()).await;

    assert_eq!(json["cache_hit"], false);
    assert_eq!(json["value"], 4);
}

#[tokio::test]
async fn test_custom_operation_with_injected_cache() {
    let mut registry = OperationRegistry::new();
    registry
        .register("vowels", |text: &str| {
            text.chars().filter(|c| "aeiou".contains(*c)).count() as u64
        })
        .unwrap();
    let operation = registry.resolve("vowels").unwrap();
    let app = create_router(AppState::new(operation, Arc::new(SharedCache::new(10))));

    let json = body_to_json(post_op(&app, r#"{"text":"education"}"#).await.into_body()).await;

    assert_eq!(json, json!({"key": "vowels", "value": 5, "cache_hit": false}));
}

#[tokio::test]
async fn test_oversized_text_computed_but_not_cached() {
    let app = create_app_with_config(
        UNIQUE_WORDS,
        Config {
            cache_max_text_bytes: 8,
            ..Config::default()
        },
    );
    let long = json!({ "text": "far too many words here" }).to_string();

    for _ in 0..2 {
        let json = body_to_json(post_op(&app, &long).await.into_body()).await;
        assert_eq!(json["value"], 5);
        assert_eq!(json["cache_hit"], false);
    }

    post_op(&app, r#"{"text":"a b"}"#).await;
    let short = body_to_json(post_op(&app, r#"{"text":"a b"}"#).await.into_body()).await;
    assert_eq!(short["cache_hit"], true);

    let stats = body_to_json(get(&app, "/stats").await.into_body()).await;
    assert_eq!(stats["total_entries"], 1);
    assert_eq!(stats["misses"], 3);
    assert_eq!(stats["stored_bytes"], "unique_words".len() + 3);
}

// == STATS and METRICS Endpoint Tests ==

#[tokio::test]
async fn test_stats_endpoint() {
    let app = create_app(UNIQUE_WORDS);

    post_op(&app, r#"{"text":"a b"}"#).await; // miss
    post_op(&app, r#"{"text":"a b"}"#).await; // hit
    post_op(&app, r#"{"text":"c"}"#).await; // miss

    let response = get(&app, "/stats").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;

    assert_eq!(json["key"], "unique_words");
    assert_eq!(json["hits"], 1);
    assert_eq!(json["misses"], 2);
    assert_eq!(json["total_entries"], 2);
    assert_eq!(json["capacity"], 100);
    assert_eq!(json["stored_bytes"], 2 * "unique_words".len() + 3 + 1);
    assert_eq!(json["requests"], 3);
    assert!(json.get("hit_rate").is_some());
    assert!(json.get("uptime_seconds").is_some());
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let app = create_app(UNIQUE_CHARS);

    post_op(&app, r#"{"text":"abc"}"#).await;
    post_op(&app, r#"{"text":"abc"}"#).await;

    let response = get(&app, "/metrics").await;
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/plain"));

    let body = body_to_string(response.into_body()).await;
    assert!(body.contains("# TYPE unique_chars_requests_total counter"));
    assert!(body.contains("unique_chars_requests_total 2"));
    assert!(body.contains("unique_chars_cache_hits_total 1"));
    assert!(body.contains("unique_chars_cache_misses_total 1"));
    assert!(body.contains("unique_chars_cache_entries 1"));
    assert!(body.contains("# TYPE unique_chars_cache_stored_bytes gauge"));
    assert!(body.contains("unique_chars_cache_stored_bytes 15"));
}

// == CORS Tests ==

#[tokio::test]
async fn test_cors_headers_present() {
    let app = create_app(UNIQUE_CHARS);

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/healthz")
                .header("origin", "http://example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
}
