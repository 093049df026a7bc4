//! # CORS ポリシー
//!
//! 環境変数 `CORS_ORIGINS` の許可リストに基づいてクロスオリジンリクエストを制御する。
//!
//! ## ルール
//!
//! - `Origin` ヘッダーのないリクエストは常に許可
//! - 許可リストが空なら全オリジンを許可
//! - 許可リストにないオリジンは 403 で拒否（ハンドラには到達しない）
//! - 許可メソッド: GET, POST, OPTIONS
//! - 許可ヘッダー: `Content-Type`, `X-Idempotency-Key`
//! - プリフライトは 204 No Content で応答
//!
//! `X-Idempotency-Key` は受け付けるのみで、重複排除は行わない。
//!
//! ## レイヤー構成
//!
//! [`enforce_cors_policy`] を [`cors_layer`] の外側に配置する。
//! 拒否判定を先に行い、許可されたリクエストのみ `CorsLayer` がヘッダーを付与する。

use std::sync::Arc;

use axum::{
    Json,
    extract::{Request, State},
    http::{HeaderName, HeaderValue, Method, StatusCode, header, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use couples_shared::ErrorResponse;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// 冪等性キーのヘッダー名
const IDEMPOTENCY_KEY_HEADER: &str = "x-idempotency-key";

/// 許可されないオリジンへのエラーメッセージ
const ORIGIN_NOT_ALLOWED_MESSAGE: &str = "Not allowed by CORS";

/// オリジン許可リスト
#[derive(Debug, Clone, Default)]
pub struct CorsPolicy {
    allowed_origins: Arc<Vec<String>>,
}

impl CorsPolicy {
    /// 許可するオリジンの一覧から作成する（空なら全オリジンを許可）
    pub fn new(allowed_origins: Vec<String>) -> Self {
        Self {
            allowed_origins: Arc::new(allowed_origins),
        }
    }

    /// `Origin` ヘッダーの値が許可されているか
    ///
    /// ヘッダーがない場合は許可する。
    pub fn allows(&self, origin: Option<&HeaderValue>) -> bool {
        let Some(origin) = origin else {
            return true;
        };
        if self.allowed_origins.is_empty() {
            return true;
        }
        origin
            .to_str()
            .is_ok_and(|origin| self.allowed_origins.iter().any(|allowed| allowed == origin))
    }
}

/// 許可リストに基づく `CorsLayer` を構築する
///
/// 許可されたオリジンはそのまま `Access-Control-Allow-Origin` に反映する。
pub fn cors_layer(policy: &CorsPolicy) -> CorsLayer {
    let policy = policy.clone();
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _parts: &Parts| policy.allows(Some(origin)),
        ))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(IDEMPOTENCY_KEY_HEADER),
        ])
}

/// 許可されないオリジンを拒否し、プリフライトを 204 で応答するミドルウェア
pub async fn enforce_cors_policy(
    State(policy): State<CorsPolicy>,
    request: Request,
    next: Next,
) -> Response {
    let origin = request.headers().get(header::ORIGIN);
    if !policy.allows(origin) {
        tracing::warn!(origin = ?origin, "許可されていないオリジンからのリクエストを拒否しました");
        return (
            StatusCode::FORBIDDEN,
            Json(ErrorResponse::new(ORIGIN_NOT_ALLOWED_MESSAGE)),
        )
            .into_response();
    }

    let is_options = request.method() == Method::OPTIONS;
    let mut response = next.run(request).await;

    // OPTIONS にはルートを定義していないため、CorsLayer の応答（200）と
    // ルーターの応答（405）をどちらも 204 に揃える
    if is_options
        && matches!(
            response.status(),
            StatusCode::OK | StatusCode::METHOD_NOT_ALLOWED
        )
    {
        *response.status_mut() = StatusCode::NO_CONTENT;
        response.headers_mut().remove(header::ALLOW);
    }

    response
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn policy(origins: &[&str]) -> CorsPolicy {
        CorsPolicy::new(origins.iter().map(|o| o.to_string()).collect())
    }

    #[test]
    fn test_originヘッダーがなければ常に許可する() {
        assert!(policy(&["https://a.example.com"]).allows(None));
    }

    #[rstest]
    #[case("https://a.example.com")]
    #[case("http://localhost:5173")]
    fn test_許可リストが空なら全オリジンを許可する(#[case] origin: &'static str) {
        assert!(policy(&[]).allows(Some(&HeaderValue::from_static(origin))));
    }

    #[rstest]
    #[case("https://a.example.com", true)]
    #[case("https://b.example.com", true)]
    #[case("https://evil.example.com", false)]
    #[case("https://a.example.com/", false)]
    fn test_許可リストと完全一致するオリジンのみ許可する(
        #[case] origin: &'static str,
        #[case] expected: bool,
    ) {
        let policy = policy(&["https://a.example.com", "https://b.example.com"]);

        assert_eq!(
            policy.allows(Some(&HeaderValue::from_static(origin))),
            expected
        );
    }
}
