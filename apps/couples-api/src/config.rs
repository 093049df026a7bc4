//! # Couples API 設定
//!
//! 環境変数からサーバーの設定を読み込む。
//!
//! 環境変数の読み取りは [`AppConfig::from_lookup`] に集約しているため、
//! テストではプロセスの環境変数を変更せずに検証できる。

use std::{env, fmt};

use thiserror::Error;

/// ポート番号のデフォルト値
pub const DEFAULT_PORT: u16 = 8443;

/// バインドアドレスのデフォルト値
const DEFAULT_HOST: &str = "0.0.0.0";

/// 設定読み込みのエラー
#[derive(Debug, Error)]
pub enum ConfigError {
    /// ポート番号として解釈できない
    #[error("PORT は有効なポート番号である必要があります: {0:?}")]
    InvalidPort(String),
}

/// Couples API サーバーの設定
#[derive(Clone)]
pub struct AppConfig {
    /// バインドアドレス
    pub host:              String,
    /// ポート番号
    pub port:              u16,
    /// 外部ストア（Supabase）の URL
    pub supabase_url:      Option<String>,
    /// 外部ストアの API キー
    pub supabase_anon_key: Option<String>,
    /// CORS を許可するオリジン（空なら全オリジンを許可）
    pub cors_origins:      Vec<String>,
}

impl AppConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 任意のキー参照関数から設定を読み込む
    ///
    /// 空文字列の値は未設定として扱う。
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match get("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            host: get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            supabase_url: get("SUPABASE_URL"),
            supabase_anon_key: get("SUPABASE_ANON_KEY"),
            cors_origins: parse_origin_list(&get("CORS_ORIGINS").unwrap_or_default()),
        })
    }

    /// 外部ストアの接続情報が揃っているか
    pub fn has_store_credentials(&self) -> bool {
        self.supabase_url.is_some() && self.supabase_anon_key.is_some()
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("supabase_url", &self.supabase_url)
            .field(
                "supabase_anon_key",
                &self.supabase_anon_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("cors_origins", &self.cors_origins)
            .finish()
    }
}

/// カンマ区切りのオリジン一覧をパースする
///
/// 各要素は前後の空白を除き、空の要素は捨てる。
pub fn parse_origin_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
