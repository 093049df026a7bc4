//! # Request ID レイヤーのテスト
//!
//! `build_app` の Request ID レイヤー（SetRequestIdLayer + PropagateRequestIdLayer +
//! カスタム make_span_with）が正しく動作することを検証する。
//!
//! - レスポンスに `X-Request-Id` ヘッダーが含まれる
//! - クライアント提供の `X-Request-Id` がそのまま返される
//! - 自動生成の `X-Request-Id` が UUID v7 形式である
//! - CORS で拒否されたレスポンスにも `X-Request-Id` が含まれる

use std::sync::Arc;

use axum::{Router, body::Body};
use couples_api::{build_app, middleware::CorsPolicy};
use couples_infra::mock::MockCoupleRepository;
use http::{Request, StatusCode};
use tower::ServiceExt;

fn test_app() -> Router {
    build_app(
        Arc::new(MockCoupleRepository::new()),
        CorsPolicy::new(vec!["https://couples.example.com".to_string()]),
    )
}

fn health_request() -> Request<Body> {
    Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_レスポンスにx_request_idヘッダーが含まれる() {
    let response = test_app().oneshot(health_request()).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response.headers().contains_key("x-request-id"),
        "レスポンスに x-request-id ヘッダーが含まれること"
    );
}

#[tokio::test]
async fn test_クライアント提供のx_request_idがそのまま返される() {
    let custom_id = "client-provided-request-id-123";

    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("x-request-id", custom_id)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("x-request-id")
            .unwrap()
            .to_str()
            .unwrap(),
        custom_id,
        "クライアント提供の Request ID がそのまま返されること"
    );
}

#[tokio::test]
async fn test_自動生成のx_request_idがuuid_v7形式である() {
    let response = test_app().oneshot(health_request()).await.unwrap();

    let request_id = response
        .headers()
        .get("x-request-id")
        .unwrap()
        .to_str()
        .unwrap();

    let uuid = uuid::Uuid::parse_str(request_id)
        .unwrap_or_else(|_| panic!("有効な UUID であること: {request_id}"));
    assert_eq!(
        uuid.get_version(),
        Some(uuid::Version::SortRand),
        "UUID v7（SortRand）であること"
    );
}

#[tokio::test]
async fn test_corsで拒否されたレスポンスにもx_request_idが含まれる() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("origin", "https://evil.example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(response.headers().contains_key("x-request-id"));
}
