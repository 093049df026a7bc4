//! # ドメイン層エラー定義
//!
//! ビジネスルール違反を表現するエラー型。
//!
//! ## エラーの種類と HTTP ステータスの対応
//!
//! | エラー種別 | HTTP ステータス | 用途 |
//! |-----------|----------------|------|
//! | `Validation` | 400 Bad Request | 入力値の検証失敗 |

use thiserror::Error;

/// ドメイン層で発生するエラー
///
/// API 層でこのエラーを受け取り、適切な HTTP レスポンスに変換する。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// 保持するメッセージはそのままクライアントに返される。
    #[error("バリデーションエラー: {0}")]
    Validation(String),
}

impl DomainError {
    /// クライアント向けのメッセージを取得する
    pub fn message(&self) -> &str {
        match self {
            DomainError::Validation(msg) => msg,
        }
    }
}
