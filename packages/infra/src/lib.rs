//! # Couples インフラ層
//!
//! 外部ストアとの通信を担当するインフラストラクチャ層。
//!
//! ## 責務
//!
//! - **リポジトリトレイト**: カップルレコードの登録・一覧取得の抽象
//! - **リポジトリ実装**: Supabase（PostgREST）の REST API を呼び出す実装
//!
//! ## 依存関係
//!
//! ```text
//! api → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`error`] - インフラ層エラー定義
//! - `mock` - テスト用インメモリ実装（`test-utils` feature 有効時のみ）
//! - [`repository`] - リポジトリトレイト
//! - [`supabase`] - Supabase REST API 実装
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use couples_infra::{CoupleRepository, SupabaseCoupleRepository};
//!
//! let repository = SupabaseCoupleRepository::new("https://xyz.supabase.co", "anon-key");
//! let couples = repository.find_all_newest_first().await?;
//! ```

pub mod error;
#[cfg(feature = "test-utils")]
pub mod mock;
pub mod repository;
pub mod supabase;

pub use error::{InfraError, InfraErrorKind};
pub use repository::CoupleRepository;
pub use supabase::SupabaseCoupleRepository;
