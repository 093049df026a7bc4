//! # CoupleRepository
//!
//! カップルレコードの永続化を担当するリポジトリトレイト。
//!
//! 正のデータは外部ストアが保持する。このトレイトは外部ストアへの
//! 1 回の呼び出しに対応する操作のみを定義し、リトライは行わない。

use async_trait::async_trait;
use couples_domain::couple::{CoupleRecord, NewCouple};

use crate::error::InfraError;

/// カップルリポジトリトレイト
///
/// API 層には `Arc<dyn CoupleRepository>` として注入する。
#[async_trait]
pub trait CoupleRepository: Send + Sync {
    /// 1 行を挿入し、挿入された行を返す
    ///
    /// 外部ストアが採番した `id` と `created_at` を含む行が返る。
    async fn insert(&self, new_couple: &NewCouple) -> Result<Vec<CoupleRecord>, InfraError>;

    /// 全件を `created_at` の降順（新しい順）で取得する
    ///
    /// 並び替えは外部ストア側で行う。
    async fn find_all_newest_first(&self) -> Result<Vec<CoupleRecord>, InfraError>;
}
