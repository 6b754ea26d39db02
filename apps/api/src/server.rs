//! # サーバーのライフサイクル
//!
//! 依存サービスへの接続、HTTP サーバーの起動、シャットダウン時の接続解放を行う。
//!
//! ## 依存サービスの扱い
//!
//! | 状況 | 結果 |
//! |------|------|
//! | URL が空 | 警告ログを出して `Absent` |
//! | 接続・疎通確認に失敗 | 警告ログを出して `Absent` |
//! | 制限時間内に接続できない | 警告ログを出して `Absent` |
//! | 接続・疎通確認に成功 | `Present` |
//!
//! どの場合も起動は続行する。`Absent` になったサービスへの再接続は行わない。

use std::{sync::Arc, time::Duration};

use anyhow::Context as _;
use modi_infra::{
    Dependency, InfraError, LivenessProbe, PostgresHandle, RedisHandle, probe::within,
};
use tokio::{net::TcpListener, signal};

use crate::{
    app_builder::build_router,
    config::{Settings, mask_url},
    handler::HealthState,
};

/// データベース接続（疎通確認を含む）の制限時間
pub const DATABASE_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Redis 接続（疎通確認を含む）の制限時間
pub const REDIS_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// 起動時に確立した依存サービスへの接続
#[derive(Debug)]
pub struct Dependencies {
    pub database: Dependency<PostgresHandle>,
    pub redis:    Dependency<RedisHandle>,
}

impl Dependencies {
    /// 設定に従って依存サービスに接続する
    ///
    /// 失敗してもエラーにはせず、該当サービスを `Absent` にする。
    pub async fn connect(settings: &Settings) -> Self {
        let (database, redis) = tokio::join!(
            connect_database(&settings.database_url),
            connect_redis(&settings.redis_url),
        );
        Self { database, redis }
    }

    /// ヘルスチェック用の State を作る
    pub fn health_state(&self) -> HealthState {
        HealthState::new(
            self.database
                .as_ref()
                .map(|handle| Arc::new(handle.clone()) as Arc<dyn LivenessProbe>),
            self.redis
                .as_ref()
                .map(|handle| Arc::new(handle.clone()) as Arc<dyn LivenessProbe>),
        )
    }

    /// 接続を解放する（データベース、Redis の順）
    pub async fn release(self) {
        if let Dependency::Present(database) = self.database {
            database.release().await;
        }
        if let Dependency::Present(redis) = self.redis {
            redis.release().await;
        }
    }
}

async fn connect_database(url: &str) -> Dependency<PostgresHandle> {
    if url.is_empty() {
        tracing::warn!("DATABASE_URL が未設定のため、データベースなしで起動します");
        return Dependency::Absent;
    }

    let connected = within(DATABASE_CONNECT_TIMEOUT, async {
        let handle = PostgresHandle::connect(url).await?;
        handle.ping().await?;
        Ok::<_, InfraError>(handle)
    })
    .await;

    match connected {
        Ok(handle) => {
            tracing::info!("データベースに接続しました");
            Dependency::Present(handle)
        }
        Err(e) => {
            tracing::warn!(error = %e, "データベースに接続できませんでした。データベースなしで起動します");
            Dependency::Absent
        }
    }
}

async fn connect_redis(url: &str) -> Dependency<RedisHandle> {
    if url.is_empty() {
        tracing::warn!("REDIS_URL が未設定のため、Redis なしで起動します");
        return Dependency::Absent;
    }

    let connected = within(REDIS_CONNECT_TIMEOUT, async {
        let handle = RedisHandle::connect(url).await?;
        handle.ping().await?;
        Ok::<_, InfraError>(handle)
    })
    .await;

    match connected {
        Ok(handle) => {
            tracing::info!("Redis に接続しました");
            Dependency::Present(handle)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Redis に接続できませんでした。Redis なしで起動します");
            Dependency::Absent
        }
    }
}

/// サーバーを起動し、シャットダウンシグナルを受けるまで待ち受ける
///
/// 待ち受けアドレスにバインドできない場合だけエラーを返す。
/// その場合も確立済みの接続は解放する。
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    tracing::info!(
        environment = %settings.environment,
        database_url = %mask_url(&settings.database_url),
        redis_url = %mask_url(&settings.redis_url),
        "サーバーを起動します"
    );

    let dependencies = Dependencies::connect(&settings).await;
    let app = build_router(dependencies.health_state());

    let addr = settings.listen_addr();
    let served = async {
        let listener = TcpListener::bind(addr.as_str())
            .await
            .with_context(|| format!("{addr} で待ち受けできません"))?;
        tracing::info!("サーバーが起動しました: {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("HTTP サーバーが異常終了しました")
    }
    .await;

    dependencies.release().await;
    tracing::info!("サーバーを停止しました");

    served
}

/// Ctrl+C または SIGTERM を待つ
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Ctrl+C ハンドラを登録できませんでした");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "SIGTERM ハンドラを登録できませんでした");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Ctrl+C を受信しました"),
        _ = terminate => tracing::info!("SIGTERM を受信しました"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_urlが空ならabsentになる() {
        let settings = Settings::resolve(|_| None);

        let sut = Dependencies::connect(&settings).await;

        assert!(!sut.database.is_present());
        assert!(!sut.redis.is_present());
    }

    #[tokio::test]
    async fn test_urlが不正ならabsentになる() {
        let settings = Settings::resolve(|key| match key {
            "DATABASE_URL" => Some("not a database url".to_string()),
            "REDIS_URL" => Some("://".to_string()),
            _ => None,
        });

        let sut = Dependencies::connect(&settings).await;

        assert!(!sut.database.is_present());
        assert!(!sut.redis.is_present());
        sut.release().await;
    }

    #[tokio::test]
    async fn test_バインドできなければエラーを返す() {
        let settings = Settings::resolve(|key| (key == "PORT").then(|| "not-a-port".to_string()));

        assert!(run(settings).await.is_err());
    }
}
