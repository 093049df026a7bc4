//! # Couples API ライブラリ
//!
//! カップル診断の登録・一覧 API サーバーのコアモジュール。
//!
//! ## モジュール構成
//!
//! - `app_builder`: 依存の注入とルーター構築
//! - `config`: 環境変数からの設定読み込み
//! - `error`: エラー定義と HTTP レスポンスへの変換
//! - `handler`: HTTP ハンドラ
//! - `middleware`: ミドルウェア（CORS ポリシー）

pub mod app_builder;
pub mod config;
pub mod error;
pub mod handler;
pub mod middleware;

pub use app_builder::build_app;
