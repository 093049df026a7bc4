//! # Couples API アプリケーション構築
//!
//! State の初期化とルーター構築を担当する。
//! `main.rs` は設定読み込みとサーバー起動に集中する。

use std::sync::Arc;

use axum::{Router, middleware::from_fn_with_state, routing::get};
use couples_infra::CoupleRepository;
use couples_shared::observability::{MakeRequestUuidV7, make_request_span};
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::{
    handler::{CoupleState, create_couple, health_check, list_couples, root},
    middleware::{CorsPolicy, cors_layer, enforce_cors_policy},
};

/// ルーターを構築する
///
/// リポジトリを外から受け取るため、テストではモックを注入できる。
pub fn build_app(repository: Arc<dyn CoupleRepository>, cors_policy: CorsPolicy) -> Router {
    let couple_state = Arc::new(CoupleState { repository });

    Router::new()
        .route("/", get(root).post(create_couple))
        .route("/health", get(health_check))
        .route("/couples", get(list_couples))
        .with_state(couple_state)
        // レイヤーは下から上の順に適用される（最後に追加したものが最外）
        // 1. SetRequestIdLayer（最外）: UUID v7 を生成（またはクライアント提供値を使用）
        // 2. TraceLayer: request_id を含むスパンを作成
        // 3. PropagateRequestIdLayer: レスポンスに X-Request-Id をコピー
        // 4. enforce_cors_policy: 許可されないオリジンを 403 で拒否
        // 5. CorsLayer（最内）: CORS ヘッダーの付与とプリフライト応答
        .layer(cors_layer(&cors_policy))
        .layer(from_fn_with_state(cors_policy, enforce_cors_policy))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}
