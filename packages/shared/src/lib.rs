//! # Couples 共有ユーティリティ
//!
//! このクレートは、Couples プロジェクト全体で使用される共通ユーティリティを提供する。
//!
//! ## 設計方針
//!
//! - 他のすべてのクレート（domain, infra, api）から依存される
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - axum には依存しない（`IntoResponse` 変換は API 層の責務）

pub mod api_response;
pub mod error_response;
pub mod health;
pub mod observability;

pub use api_response::{ApiResponse, CreatedResponse};
pub use error_response::ErrorResponse;
pub use health::HealthResponse;
