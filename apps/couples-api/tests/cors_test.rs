//! # CORS ポリシーのテスト
//!
//! `build_app` のレイヤー構成で CORS の許可・拒否とプリフライト応答を検証する。
//!
//! - 許可リストにあるオリジンはヘッダーが付与される
//! - 許可リストにないオリジンは 403 で拒否される
//! - `Origin` ヘッダーのないリクエストは常に許可される
//! - 許可リストが空なら全オリジンを許可する
//! - プリフライトは 204 で応答する

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use couples_api::{build_app, middleware::CorsPolicy};
use couples_infra::mock::MockCoupleRepository;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tower::ServiceExt;

const ALLOWED_ORIGIN: &str = "https://couples.example.com";

fn test_app(repository: &MockCoupleRepository, origins: &[&str]) -> Router {
    let policy = CorsPolicy::new(origins.iter().map(|o| o.to_string()).collect());
    build_app(Arc::new(repository.clone()), policy)
}

fn get_with_origin(uri: &str, origin: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(header::ORIGIN, origin)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_許可されたオリジンにはcorsヘッダーを付与する() {
    let repository = MockCoupleRepository::new();

    let response = test_app(&repository, &[ALLOWED_ORIGIN])
        .oneshot(get_with_origin("/health", ALLOWED_ORIGIN))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        ALLOWED_ORIGIN
    );
}

#[tokio::test]
async fn test_許可されていないオリジンは403で拒否する() {
    let repository = MockCoupleRepository::new();

    let response = test_app(&repository, &[ALLOWED_ORIGIN])
        .oneshot(get_with_origin("/couples", "https://evil.example.com"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(
        !response
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN)
    );
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({ "error": "Not allowed by CORS" }));
    assert_eq!(repository.call_count(), 0, "ハンドラに到達しないこと");
}

#[tokio::test]
async fn test_originヘッダーのないリクエストは許可する() {
    let repository = MockCoupleRepository::new();
    let request = Request::builder()
        .uri("/couples")
        .body(Body::empty())
        .unwrap();

    let response = test_app(&repository, &[ALLOWED_ORIGIN])
        .oneshot(request)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(repository.call_count(), 1);
}

#[tokio::test]
async fn test_許可リストが空なら任意のオリジンを許可する() {
    let repository = MockCoupleRepository::new();
    let origin = "http://localhost:5173";

    let response = test_app(&repository, &[])
        .oneshot(get_with_origin("/health", origin))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        origin
    );
}

#[tokio::test]
async fn test_プリフライトは204で許可メソッドとヘッダーを返す() {
    let repository = MockCoupleRepository::new();
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/")
        .header(header::ORIGIN, ALLOWED_ORIGIN)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(
            header::ACCESS_CONTROL_REQUEST_HEADERS,
            "content-type,x-idempotency-key",
        )
        .body(Body::empty())
        .unwrap();

    let response = test_app(&repository, &[ALLOWED_ORIGIN])
        .oneshot(request)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let headers = response.headers();
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        ALLOWED_ORIGIN
    );
    let methods = headers
        .get(header::ACCESS_CONTROL_ALLOW_METHODS)
        .unwrap()
        .to_str()
        .unwrap();
    for method in ["GET", "POST", "OPTIONS"] {
        assert!(methods.contains(method), "{method} が許可されること");
    }
    let allowed_headers = headers
        .get(header::ACCESS_CONTROL_ALLOW_HEADERS)
        .unwrap()
        .to_str()
        .unwrap()
        .to_ascii_lowercase();
    assert!(allowed_headers.contains("content-type"));
    assert!(allowed_headers.contains("x-idempotency-key"));
    assert_eq!(repository.call_count(), 0);
}

#[tokio::test]
async fn test_許可されていないオリジンのプリフライトは403で拒否する() {
    let repository = MockCoupleRepository::new();
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/")
        .header(header::ORIGIN, "https://evil.example.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();

    let response = test_app(&repository, &[ALLOWED_ORIGIN])
        .oneshot(request)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
