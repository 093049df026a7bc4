//! # Couples ドメイン層
//!
//! カップル診断の登録レコードを表すドメインモデルを定義する。
//!
//! ## 依存関係の方向
//!
//! ```text
//! api → infra → domain
//! ```
//!
//! ドメイン層はインフラ層（外部ストア、HTTP）には一切依存しない。
//!
//! ## モジュール構成
//!
//! - [`couple`] - カップルレコードと登録入力の値オブジェクト
//! - [`error`] - ドメイン層で発生するエラーの定義
//!
//! ## 使用例
//!
//! ```rust
//! use couples_domain::couple::{CoupleSubmission, NewCouple};
//!
//! let submission = CoupleSubmission::from_json(serde_json::json!({
//!     "name1": "  Ann ",
//!     "name2": "Bob",
//! }));
//! let new_couple = NewCouple::from_submission(&submission).unwrap();
//! assert_eq!(new_couple.name1().as_str(), "Ann");
//! ```

pub mod couple;
pub mod error;

pub use error::DomainError;
