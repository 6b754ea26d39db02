//! # Modi API サーバー
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境（.env ファイルを使用）
//! cargo run --bin modi-api
//!
//! # 本番環境（環境変数を直接指定、JSON ログ）
//! ENV=production DATABASE_URL=postgres://... cargo run --bin modi-api --release
//! ```
//!
//! 設定項目は [`modi_api::config`] を参照。

use modi_api::{config::Settings, server};
use modi_shared::observability::{LogFormat, TracingConfig, init_tracing};
use tracing::Instrument as _;

/// サーバーのエントリーポイント
///
/// 以下の順序で初期化を行う:
///
/// 1. 設定の読み込み（`.env` の値を環境変数に反映）
/// 2. トレーシングの初期化と、読み込み時に読み飛ばした行のログ出力
/// 3. tokio ランタイムの起動
/// 4. 依存サービスへの接続と HTTP サーバーの起動
///
/// 設定の読み込みは環境変数を書き換えるため、ランタイムのワーカースレッドが
/// 立ち上がる前に行う。ログレベルも設定から決まるので、トレーシングはその後になる。
fn main() -> anyhow::Result<()> {
    let loaded = Settings::load();

    init_tracing(&TracingConfig::new(
        "modi-api",
        LogFormat::for_environment(&loaded.settings.environment),
        &loaded.settings.log_level,
    ));
    loaded.log_skipped_lines();

    let settings = loaded.settings;
    tracing::debug!(?settings, "設定を読み込みました");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(
        server::run(settings).instrument(tracing::info_span!("app", service = "modi-api")),
    )
}
