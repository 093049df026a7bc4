//! # ヘルスチェックハンドラ
//!
//! サーバーの稼働状態を確認するためのエンドポイント。
//! ビジネスロジックや外部ストアへの問い合わせは行わない。

use axum::Json;
use couples_shared::HealthResponse;

/// ルートパスの稼働確認
pub async fn root() -> &'static str {
    "server responding"
}

/// ヘルスチェックエンドポイント
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
