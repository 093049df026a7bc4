//! # テスト用モックリポジトリ
//!
//! ハンドラテストで使用するインメモリモックリポジトリ。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! couples-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{
    Arc,
    Mutex,
    atomic::{AtomicI64, AtomicUsize, Ordering},
};

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use couples_domain::couple::{CoupleId, CoupleRecord, NewCouple};

use crate::{error::InfraError, repository::CoupleRepository};

/// モックが返す失敗の種類
#[derive(Debug, Clone)]
enum MockFailure {
    /// 外部ストアがエラーを応答した
    Store(String),
    /// 応答が期待した形状でない
    Malformed,
}

/// インメモリの CoupleRepository
///
/// - 挿入された行は連番の `id` と現在時刻の `created_at` を持つ
/// - `fail_with_store_error` で以降の呼び出しをすべて失敗させられる
/// - `call_count` で外部ストアの呼び出し回数を検証できる
#[derive(Clone, Default)]
pub struct MockCoupleRepository {
    records:    Arc<Mutex<Vec<CoupleRecord>>>,
    inserted:   Arc<Mutex<Vec<NewCouple>>>,
    failure:    Arc<Mutex<Option<MockFailure>>>,
    next_id:    Arc<AtomicI64>,
    call_count: Arc<AtomicUsize>,
}

impl MockCoupleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 既存のレコードを追加する
    pub fn add_record(&self, record: CoupleRecord) {
        self.records.lock().unwrap().push(record);
    }

    /// 以降の呼び出しをストアエラーで失敗させる
    pub fn fail_with_store_error(&self, message: impl Into<String>) {
        *self.failure.lock().unwrap() = Some(MockFailure::Store(message.into()));
    }

    /// 以降の呼び出しを不正な応答（シリアライズエラー）で失敗させる
    pub fn fail_with_malformed_response(&self) {
        *self.failure.lock().unwrap() = Some(MockFailure::Malformed);
    }

    /// 挿入ペイロードの履歴
    pub fn inserted(&self) -> Vec<NewCouple> {
        self.inserted.lock().unwrap().clone()
    }

    /// リポジトリが呼び出された回数
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    fn check_failure(&self) -> Result<(), InfraError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        match self.failure.lock().unwrap().clone() {
            Some(MockFailure::Store(message)) => Err(InfraError::store(500, message)),
            Some(MockFailure::Malformed) => {
                Err(serde_json::from_str::<Vec<CoupleRecord>>("not json")
                    .unwrap_err()
                    .into())
            }
            None => Ok(()),
        }
    }
}

#[async_trait]
impl CoupleRepository for MockCoupleRepository {
    async fn insert(&self, new_couple: &NewCouple) -> Result<Vec<CoupleRecord>, InfraError> {
        self.check_failure()?;

        let record = CoupleRecord {
            id:         CoupleId::Number(self.next_id.fetch_add(1, Ordering::SeqCst) + 1),
            name1:      Some(new_couple.name1().as_str().to_string()),
            name2:      Some(new_couple.name2().as_str().to_string()),
            percentage: new_couple
                .percentage()
                .and_then(|p| serde_json::to_value(p).ok()),
            // 固定桁数にして文字列の比較で時刻順に並ぶようにする
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
        };
        self.inserted.lock().unwrap().push(new_couple.clone());
        self.records.lock().unwrap().push(record.clone());
        Ok(vec![record])
    }

    async fn find_all_newest_first(&self) -> Result<Vec<CoupleRecord>, InfraError> {
        self.check_failure()?;

        let mut records = self.records.lock().unwrap().clone();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }
}
