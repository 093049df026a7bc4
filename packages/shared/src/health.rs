//! # ヘルスチェック共通型
//!
//! `/health` エンドポイントで使用されるレスポンス型を提供する。

use serde::{Deserialize, Serialize};

/// ヘルスチェックレスポンス
///
/// ## 使用例
///
/// ```
/// use couples_shared::HealthResponse;
///
/// let response = HealthResponse::ok();
/// assert_eq!(response.status, "ok");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// 稼働状態
    pub status: String,
}

impl HealthResponse {
    /// 稼働中を表すレスポンスを作成する
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}
