//! # インフラ層エラー定義
//!
//! 外部ストアとの通信で発生するエラーを表現する。
//!
//! ## 設計方針
//!
//! - **エラーの変換**: reqwest::Error, serde_json::Error をラップ
//! - **ストアエラーの区別**: 外部ストアが応答した失敗（[`InfraErrorKind::Store`]）と、
//!   応答を得られなかった失敗（[`InfraErrorKind::Network`]）を分ける
//! - **SpanTrace 自動捕捉**: `From` 実装や convenience constructor で
//!   エラー生成時の呼び出し経路を自動記録する
//!
//! ## 構造
//!
//! `std::io::Error` と同じ struct + enum パターンを採用:
//! - [`InfraError`]: エラー種別（[`InfraErrorKind`]）と [`SpanTrace`] を保持するラッパー
//! - [`InfraErrorKind`]: エラーの具体的な種別

use std::fmt;

use derive_more::Display;
use thiserror::Error;
use tracing_error::SpanTrace;

/// インフラ層で発生するエラー
///
/// エラー種別（[`InfraErrorKind`]）と [`SpanTrace`]（呼び出し経路）を保持する。
///
/// ## パターンマッチ
///
/// エラー種別に応じた処理には [`kind()`](InfraError::kind) を使用する:
///
/// ```ignore
/// match error.kind() {
///     InfraErrorKind::Store { message, .. } => { /* ストアのエラー */ }
///     _ => { /* その他 */ }
/// }
/// ```
#[derive(Display)]
#[display("{kind}")]
pub struct InfraError {
    kind:       InfraErrorKind,
    span_trace: SpanTrace,
}

/// インフラ層エラーの種別
#[derive(Debug, Error)]
pub enum InfraErrorKind {
    /// 外部ストアが失敗を応答した
    ///
    /// 非 2xx のステータスが返った場合に使用する。
    /// `message` は外部ストアのエラーメッセージ。
    #[error("ストアエラー（status={status}）: {message}")]
    Store {
        /// HTTP ステータスコード
        status:  u16,
        /// 外部ストアのエラーメッセージ
        message: String,
    },

    /// 通信エラー
    ///
    /// 接続失敗、リクエスト構築失敗など、外部ストアの応答を得られなかった場合。
    #[error("通信エラー: {0}")]
    Network(#[source] reqwest::Error),

    /// シリアライズ/デシリアライズエラー
    ///
    /// 外部ストアの応答が期待した JSON 形状でない場合に使用する。
    #[error("シリアライズエラー: {0}")]
    Serialization(#[source] serde_json::Error),
}

// ===== InfraError のメソッド =====

impl InfraError {
    /// エラー種別を取得する
    pub fn kind(&self) -> &InfraErrorKind {
        &self.kind
    }

    /// SpanTrace を取得する
    pub fn span_trace(&self) -> &SpanTrace {
        &self.span_trace
    }

    /// Store バリアントの場合、外部ストアのエラーメッセージを返す
    pub fn as_store_message(&self) -> Option<&str> {
        match &self.kind {
            InfraErrorKind::Store { message, .. } => Some(message),
            _ => None,
        }
    }

    // ===== Convenience constructors =====

    /// ストアエラーを生成する
    pub fn store(status: u16, message: impl Into<String>) -> Self {
        Self {
            kind:       InfraErrorKind::Store {
                status,
                message: message.into(),
            },
            span_trace: SpanTrace::capture(),
        }
    }
}

// ===== トレイト実装 =====

impl fmt::Debug for InfraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InfraError")
            .field("kind", &self.kind)
            .field("span_trace", &self.span_trace)
            .finish()
    }
}

impl std::error::Error for InfraError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.kind.source()
    }
}

// ===== From 実装（SpanTrace 自動キャプチャ） =====

impl From<reqwest::Error> for InfraError {
    fn from(source: reqwest::Error) -> Self {
        Self {
            kind:       InfraErrorKind::Network(source),
            span_trace: SpanTrace::capture(),
        }
    }
}

impl From<serde_json::Error> for InfraError {
    fn from(source: serde_json::Error) -> Self {
        Self {
            kind:       InfraErrorKind::Serialization(source),
            span_trace: SpanTrace::capture(),
        }
    }
}

#[cfg(test)]
mod tests {
    use tracing_subscriber::layer::SubscriberExt as _;

    use super::*;

    /// テスト用に ErrorLayer 付き subscriber を設定する
    fn with_error_layer(f: impl FnOnce()) {
        let subscriber = tracing_subscriber::registry().with(tracing_error::ErrorLayer::default());
        let _guard = tracing::subscriber::set_default(subscriber);
        f();
    }

    #[test]
    fn test_storeでspan_traceがキャプチャされる() {
        with_error_layer(|| {
            let span = tracing::info_span!("test_store", table = "contact");
            let _enter = span.enter();

            let err = InfraError::store(400, "invalid input syntax");

            assert!(matches!(
                err.kind(),
                InfraErrorKind::Store { status: 400, .. }
            ));
            let trace_str = format!("{}", err.span_trace());
            assert!(
                trace_str.contains("test_store"),
                "SpanTrace がスパン名を含むこと: {trace_str}",
            );
        });
    }

    #[test]
    fn test_from_serde_json_errorでserializationになる() {
        let json_err = serde_json::from_str::<String>("invalid").unwrap_err();
        let err: InfraError = json_err.into();

        assert!(matches!(err.kind(), InfraErrorKind::Serialization(_)));
        assert!(err.as_store_message().is_none());
    }

    #[test]
    fn test_as_store_messageでストアのメッセージを取り出す() {
        let err = InfraError::store(500, "relation \"contact\" does not exist");

        assert_eq!(
            err.as_store_message(),
            Some("relation \"contact\" does not exist")
        );
    }

    #[test]
    fn test_displayは種別のメッセージを出力する() {
        let err = InfraError::store(401, "Invalid API key");

        assert_eq!(
            err.to_string(),
            "ストアエラー（status=401）: Invalid API key"
        );
    }
}
