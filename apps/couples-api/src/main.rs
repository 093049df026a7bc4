//! # Couples API サーバー
//!
//! カップル診断の結果を外部ストア（Supabase の PostgREST）に登録・一覧する
//! 小さな HTTP サーバー。永続化はすべて外部ストアに委譲し、
//! サーバー自身は状態を持たない。
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │   Browser    │────▶│ Couples API  │────▶│   Supabase   │
//! │              │     │  port: 8443  │     │  (PostgREST) │
//! └──────────────┘     └──────────────┘     └──────────────┘
//! ```
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `PORT` | No | ポート番号（デフォルト: `8443`） |
//! | `SUPABASE_URL` | No | 外部ストアの URL（未設定時は警告のみ） |
//! | `SUPABASE_ANON_KEY` | No | 外部ストアの API キー（未設定時は警告のみ） |
//! | `CORS_ORIGINS` | No | 許可するオリジン（カンマ区切り、空なら全許可） |
//! | `LOG_FORMAT` | No | `json` または `pretty`（デフォルト: `pretty`） |
//! | `RUST_LOG` | No | ログレベル（デフォルト: `info,couples=debug`） |
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境（.env ファイルを使用）
//! cargo run -p couples-api
//!
//! # 本番環境（環境変数を直接指定）
//! PORT=8443 SUPABASE_URL=https://... SUPABASE_ANON_KEY=... cargo run -p couples-api --release
//! ```

use std::sync::Arc;

use couples_api::{build_app, config::AppConfig, middleware::CorsPolicy};
use couples_infra::{CoupleRepository, SupabaseCoupleRepository};
use couples_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

/// Couples API サーバーのエントリーポイント
///
/// 以下の順序で初期化を行う:
///
/// 1. 環境変数の読み込み（.env ファイル）
/// 2. トレーシングの初期化
/// 3. アプリケーション設定の読み込み
/// 4. ルーターの構築
/// 5. HTTP サーバーの起動
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    init_tracing(TracingConfig::from_env("couples-api"));
    let _tracing_guard = tracing::info_span!("app", service = "couples-api").entered();

    let config = AppConfig::from_env()?;
    tracing::debug!(?config, "設定を読み込みました");

    // 接続情報がなくても起動は続ける（ストア呼び出し時にエラーになる）
    if !config.has_store_credentials() {
        tracing::warn!(
            "SUPABASE_URL または SUPABASE_ANON_KEY が未設定です。外部ストアへのリクエストは失敗します"
        );
    }

    let repository: Arc<dyn CoupleRepository> = Arc::new(SupabaseCoupleRepository::new(
        config.supabase_url.as_deref().unwrap_or_default(),
        config.supabase_anon_key.as_deref().unwrap_or_default(),
    ));
    let cors_policy = CorsPolicy::new(config.cors_origins.clone());

    let app = build_app(repository, cors_policy);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Couples API サーバーが起動しました: {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
