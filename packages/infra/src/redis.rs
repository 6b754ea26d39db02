//! # Redis 接続管理
//!
//! Redis キャッシュサーバーへの接続管理を行う。
//!
//! ## 設計方針
//!
//! - **ConnectionManager**: 自動再接続機能を持つ接続マネージャを使用
//! - **非同期対応**: tokio ランタイムとの統合
//! - **URL パースを分離**: 接続前に URL の誤りを検出できるようにする
//!
//! ## ConnectionManager vs Connection
//!
//! | 方式 | 特徴 | 用途 |
//! |------|------|------|
//! | `Connection` | 単一接続、手動管理 | 短期間の処理 |
//! | `ConnectionManager` | 自動再接続、スレッドセーフ | 長期稼働アプリ |
//!
//! 自動再接続は確立済みの接続が切れた場合のみ働く。
//! 起動時に接続できなかった場合、アプリケーション側は再接続を試みない。

use async_trait::async_trait;
use redis::{Client, ConnectionInfo, IntoConnectionInfo, aio::ConnectionManager};

use crate::{error::InfraError, probe::LivenessProbe};

/// Redis URL を接続情報にパースする
///
/// # 引数
///
/// * `redis_url` - Redis 接続 URL
///   - 形式: `redis://[[username:]password@]host[:port][/database]`
///   - TLS: `rediss://` スキームで TLS 接続
pub fn parse_url(redis_url: &str) -> Result<ConnectionInfo, InfraError> {
    Ok(redis_url.into_connection_info()?)
}

/// Redis 接続マネージャを作成する
///
/// # エラー
///
/// - 接続エラー: Redis サーバーに接続できない
/// - 認証エラー: パスワードが不正
pub async fn create_connection_manager(
    info: ConnectionInfo,
) -> Result<ConnectionManager, redis::RedisError> {
    let client = Client::open(info)?;
    ConnectionManager::new(client).await
}

/// Redis 接続のハンドル
///
/// `Clone` は下位の多重化接続を共有する。すべての複製がドロップされた時点で接続が閉じる。
#[derive(Clone)]
pub struct RedisHandle {
    conn: ConnectionManager,
}

impl RedisHandle {
    /// URL をパースして接続する
    pub async fn connect(redis_url: &str) -> Result<Self, InfraError> {
        let info = parse_url(redis_url)?;
        let conn = create_connection_manager(info).await?;
        Ok(Self { conn })
    }

    /// 接続を手放す
    ///
    /// ルーターなど他の複製が残っている場合、接続はそれらがドロップされた時点で閉じる。
    pub async fn release(self) {
        drop(self.conn);
        tracing::info!("Redis 接続を閉じました");
    }
}

impl std::fmt::Debug for RedisHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisHandle").finish_non_exhaustive()
    }
}

#[async_trait]
impl LivenessProbe for RedisHandle {
    async fn ping(&self) -> Result<(), InfraError> {
        let mut conn = self.conn.clone();
        redis::cmd("PING").query_async::<String>(&mut conn).await?;
        Ok(())
    }
}
