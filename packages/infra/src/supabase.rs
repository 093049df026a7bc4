//! # Supabase リポジトリ実装
//!
//! Supabase の REST API（PostgREST）を呼び出して [`CoupleRepository`] を実装する。
//!
//! ## 呼び出す API
//!
//! | 操作 | リクエスト |
//! |------|-----------|
//! | 挿入 | `POST /rest/v1/contact`（`Prefer: return=representation`） |
//! | 一覧 | `GET /rest/v1/contact?select=...&order=created_at.desc` |
//!
//! 認証は API キーを `apikey` ヘッダーと `Authorization: Bearer` の両方に設定する。
//!
//! ## エラー
//!
//! 非 2xx の応答は [`InfraErrorKind::Store`](crate::InfraErrorKind::Store) に変換する。
//! PostgREST のエラーボディ `{ "message", "code", "details", "hint" }` の
//! `message` を優先し、取得できない場合はボディ本文、ステータス文言の順で使用する。

use async_trait::async_trait;
use couples_domain::couple::{CoupleRecord, NewCouple};
use reqwest::StatusCode;
use serde::{Deserialize, de::DeserializeOwned};

use crate::{error::InfraError, repository::CoupleRepository};

/// カップルレコードを保持するテーブル名
const CONTACT_TABLE: &str = "contact";

/// 一覧取得で返す列
const SELECT_COLUMNS: &str = "id,name1,name2,percentage,created_at";

/// 一覧取得の並び順
const ORDER_NEWEST_FIRST: &str = "created_at.desc";

/// PostgREST のエラーボディ
#[derive(Debug, Deserialize)]
struct PostgrestErrorBody {
    #[serde(alias = "msg", alias = "error_description")]
    message: Option<String>,
}

/// Supabase 実装の CoupleRepository
///
/// `reqwest::Client` は内部でコネクションプールを共有するため、
/// プロセス起動時に 1 度だけ作成して使い回す。
#[derive(Debug, Clone)]
pub struct SupabaseCoupleRepository {
    base_url: String,
    api_key:  String,
    client:   reqwest::Client,
}

impl SupabaseCoupleRepository {
    /// 新しいリポジトリを作成する
    ///
    /// # 引数
    ///
    /// - `base_url`: Supabase プロジェクトの URL（例: `https://xyz.supabase.co`）
    /// - `api_key`: Supabase の API キー（anon key）
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key:  api_key.to_string(),
            client:   reqwest::Client::new(),
        }
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, CONTACT_TABLE)
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    /// 挿入リクエストを構築する
    fn insert_request(&self, new_couple: &NewCouple) -> Result<reqwest::Request, InfraError> {
        let request = self
            .authorized(self.client.post(self.table_url()))
            .header("Prefer", "return=representation")
            .json(&[new_couple])
            .build()?;
        Ok(request)
    }

    /// 一覧取得リクエストを構築する
    fn list_request(&self) -> Result<reqwest::Request, InfraError> {
        let request = self
            .authorized(self.client.get(self.table_url()))
            .query(&[("select", SELECT_COLUMNS), ("order", ORDER_NEWEST_FIRST)])
            .build()?;
        Ok(request)
    }
}

#[async_trait]
impl CoupleRepository for SupabaseCoupleRepository {
    #[tracing::instrument(skip_all, fields(table = CONTACT_TABLE))]
    async fn insert(&self, new_couple: &NewCouple) -> Result<Vec<CoupleRecord>, InfraError> {
        let request = self.insert_request(new_couple)?;
        let response = self.client.execute(request).await?;
        handle_response(response).await
    }

    #[tracing::instrument(skip_all, fields(table = CONTACT_TABLE))]
    async fn find_all_newest_first(&self) -> Result<Vec<CoupleRecord>, InfraError> {
        let request = self.list_request()?;
        let response = self.client.execute(request).await?;
        handle_response(response).await
    }
}

/// 外部ストアのレスポンスの共通ハンドリング
///
/// 成功時はボディを `T` にデシリアライズし、
/// エラー時は外部ストアのメッセージを持つ Store エラーを返す。
async fn handle_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, InfraError> {
    let status = response.status();
    let body = response.bytes().await?;

    if status.is_success() {
        return Ok(serde_json::from_slice(&body)?);
    }

    let message = error_message(status, &body);
    tracing::debug!(status = status.as_u16(), %message, "外部ストアがエラーを返しました");
    Err(InfraError::store(status.as_u16(), message))
}

/// エラーレスポンスからメッセージを取り出す
fn error_message(status: StatusCode, body: &[u8]) -> String {
    if let Ok(parsed) = serde_json::from_slice::<PostgrestErrorBody>(body)
        && let Some(message) = parsed.message
    {
        return message;
    }

    let text = String::from_utf8_lossy(body).trim().to_string();
    if !text.is_empty() {
        return text;
    }

    status
        .canonical_reason()
        .unwrap_or("unknown error")
        .to_string()
}
