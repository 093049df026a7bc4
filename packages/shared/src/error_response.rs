//! # エラーレスポンス
//!
//! 全エンドポイントで共通のエラーレスポンス構造体を提供する。
//!
//! ## 設計
//!
//! - `ErrorResponse` は純粋なデータ構造（`Serialize` / `Deserialize` のみ）
//! - axum の `IntoResponse` 変換は API 層の責務（shared に axum 依存を入れない）
//! - 形式は `{ "error": "...", "details": "..." }`。`details` は上流の
//!   エラーメッセージを呼び出し元に見せてよい場合のみ付与する

use serde::{Deserialize, Serialize};

/// 内部エラー時の固定メッセージ
const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// エラーレスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error:   String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    /// `details` なしのエラーレスポンスを作成する
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error:   error.into(),
            details: None,
        }
    }

    /// `details` 付きのエラーレスポンスを作成する
    pub fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error:   error.into(),
            details: Some(details.into()),
        }
    }

    /// 500 Internal Server Error
    ///
    /// メッセージは固定値（内部情報を漏らさないため）。
    pub fn internal_error() -> Self {
        Self::new(INTERNAL_ERROR_MESSAGE)
    }
}
