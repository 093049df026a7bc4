//! # API レスポンスエンベロープ
//!
//! 公開 API の成功レスポンス形式を提供する。
//!
//! - 取得系: `{ "data": T }`
//! - 作成系: `{ "message": "...", "data": T }`

use serde::{Deserialize, Serialize};

/// 取得系 API の統一レスポンス型
///
/// ## 使用例
///
/// ```
/// use couples_shared::ApiResponse;
///
/// let response = ApiResponse::new(vec!["a", "b"]);
/// assert_eq!(response.data.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// 新しい `ApiResponse` を作成する
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// 作成系 API のレスポンス型
///
/// 作成結果のデータに加えて、人間向けの完了メッセージを返す。
///
/// ## 使用例
///
/// ```
/// use couples_shared::CreatedResponse;
///
/// let response = CreatedResponse::new("Contact created successfully", vec![1]);
/// assert_eq!(response.message, "Contact created successfully");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedResponse<T> {
    pub message: String,
    pub data:    T,
}

impl<T> CreatedResponse<T> {
    /// 新しい `CreatedResponse` を作成する
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_api_responseを正しいjson形状にする() {
        let response = ApiResponse::new(vec!["a", "b", "c"]);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json, serde_json::json!({ "data": ["a", "b", "c"] }));
    }

    #[test]
    fn test_created_responseはmessageとdataを持つ() {
        let response = CreatedResponse::new("作成しました", vec![serde_json::json!({"id": 1})]);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "message": "作成しました",
                "data": [{ "id": 1 }]
            })
        );
    }

    #[test]
    fn test_api_responseをjsonからデシリアライズする() {
        let json = r#"{"data": "world"}"#;
        let response: ApiResponse<String> = serde_json::from_str(json).unwrap();

        assert_eq!(response.data, "world");
    }
}
