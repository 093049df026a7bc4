//! # Couples API エラーハンドリング
//!
//! HTTP API のエラー定義と、axum レスポンスへの変換。
//!
//! | エラー | ステータス | ボディ |
//! |--------|-----------|--------|
//! | `Validation` | 400 | `{ "error": <検証メッセージ> }` |
//! | `FetchFailed` | 500 | `{ "error": "Failed to fetch couples", "details": <ストアのメッセージ> }` |
//! | `InsertFailed` | 500 | `{ "error": "Failed to insert data" }` |
//! | `Internal` | 500 | `{ "error": "Internal server error" }` |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use couples_domain::DomainError;
use couples_infra::InfraError;
use couples_shared::ErrorResponse;
use thiserror::Error;

/// 一覧取得でストアが失敗したときのメッセージ
const FETCH_FAILED_MESSAGE: &str = "Failed to fetch couples";

/// 登録でストアが失敗したときのメッセージ
const INSERT_FAILED_MESSAGE: &str = "Failed to insert data";

/// API 層で発生するエラー
///
/// `IntoResponse` を実装しているため、axum が自動的に HTTP レスポンスに変換する。
#[derive(Debug, Error)]
pub enum ApiError {
    /// バリデーションエラー（400 Bad Request）
    #[error("バリデーションエラー: {0}")]
    Validation(String),

    /// 一覧取得で外部ストアが失敗を応答した（500）
    #[error("一覧の取得に失敗しました: {0}")]
    FetchFailed(#[source] InfraError),

    /// 登録で外部ストアが失敗を応答した（500）
    #[error("登録に失敗しました: {0}")]
    InsertFailed(#[source] InfraError),

    /// 内部サーバーエラー（500 Internal Server Error）
    #[error("内部サーバーエラー")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    /// 一覧取得のエラーを分類する
    ///
    /// ストアが応答した失敗のみ `FetchFailed` とし、
    /// 通信エラーや不正な応答は `Internal` とする。
    pub fn fetch(err: InfraError) -> Self {
        if err.as_store_message().is_some() {
            Self::FetchFailed(err)
        } else {
            Self::Internal(err.into())
        }
    }

    /// 登録のエラーを分類する
    pub fn insert(err: InfraError) -> Self {
        if err.as_store_message().is_some() {
            Self::InsertFailed(err)
        } else {
            Self::Internal(err.into())
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::Validation(err.message().to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, ErrorResponse::new(msg)),
            ApiError::FetchFailed(err) => {
                tracing::error!(error = ?err, "外部ストアの一覧取得エラー");
                let details = err.as_store_message().unwrap_or_default().to_string();
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::with_details(FETCH_FAILED_MESSAGE, details),
                )
            }
            ApiError::InsertFailed(err) => {
                tracing::error!(error = ?err, "外部ストアの登録エラー");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(INSERT_FAILED_MESSAGE),
                )
            }
            ApiError::Internal(err) => {
                // セキュリティ: 内部エラー詳細はログのみ
                tracing::error!("内部エラー: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::internal_error(),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
