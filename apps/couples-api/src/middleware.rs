//! # ミドルウェア
//!
//! - `cors`: オリジン許可リストに基づく CORS ポリシー

pub mod cors;

pub use cors::{CorsPolicy, cors_layer, enforce_cors_policy};
