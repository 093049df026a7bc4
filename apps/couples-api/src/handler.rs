//! # HTTP ハンドラ
//!
//! ## エンドポイント
//!
//! - `GET /` - 稼働確認（テキスト）
//! - `POST /` - カップルレコードの登録
//! - `GET /health` - ヘルスチェック
//! - `GET /couples` - カップルレコードの一覧（新しい順）

pub mod couple;
pub mod health;

pub use couple::{CoupleState, create_couple, list_couples};
pub use health::{health_check, root};
