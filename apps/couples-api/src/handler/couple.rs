//! # カップルレコード API ハンドラ
//!
//! ## エンドポイント
//!
//! - `GET /couples` - 一覧（`created_at` の降順）
//! - `POST /` - 登録
//!
//! 各ハンドラは「入力の検証 → 外部ストア呼び出し → レスポンス整形」を
//! `Result` の合成として記述し、どの経路でも必ずレスポンスを返す。

use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
};
use couples_domain::couple::{CoupleRecord, CoupleSubmission, NewCouple};
use couples_infra::CoupleRepository;
use couples_shared::{ApiResponse, CreatedResponse};

use crate::error::ApiError;

/// 登録成功時のメッセージ
const CREATED_MESSAGE: &str = "Contact created successfully";

/// カップル API の共有状態
pub struct CoupleState {
    pub repository: Arc<dyn CoupleRepository>,
}

/// GET /couples
///
/// 全レコードを新しい順に返す。並び替えは外部ストアが行う。
#[tracing::instrument(skip_all)]
pub async fn list_couples(
    State(state): State<Arc<CoupleState>>,
) -> Result<Json<ApiResponse<Vec<CoupleRecord>>>, ApiError> {
    let couples = state
        .repository
        .find_all_newest_first()
        .await
        .map_err(ApiError::fetch)?;

    tracing::debug!(count = couples.len(), "カップル一覧を取得しました");
    Ok(Json(ApiResponse::new(couples)))
}

/// POST /
///
/// 名前を検証・正規化して 1 行を登録し、登録された行を返す。
/// 検証に失敗した場合は外部ストアを呼び出さない。
#[tracing::instrument(skip_all)]
pub async fn create_couple(
    State(state): State<Arc<CoupleState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let submission = parse_submission(&headers, &body)?;
    tracing::info!(?submission, "登録リクエストを受信しました");

    let new_couple = NewCouple::from_submission(&submission)?;

    let data = state.repository.insert(&new_couple).await.map_err(|e| {
        tracing::error!(payload = ?new_couple, "登録ペイロードの保存に失敗しました");
        ApiError::insert(e)
    })?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse::new(CREATED_MESSAGE, data)),
    ))
}

/// リクエストボディを登録入力に変換する
///
/// - ボディが空、または JSON 以外の Content-Type の場合は空の入力
/// - JSON として不正なボディは内部エラー
fn parse_submission(headers: &HeaderMap, body: &[u8]) -> Result<CoupleSubmission, ApiError> {
    if !is_json_content_type(headers) || body.iter().all(u8::is_ascii_whitespace) {
        return Ok(CoupleSubmission::default());
    }

    let value: serde_json::Value = serde_json::from_slice(body)
        .map_err(|e| anyhow::Error::new(e).context("リクエストボディの JSON が不正です"))?;
    Ok(CoupleSubmission::from_json(value))
}

/// Content-Type が `application/json` かどうか
fn is_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}
