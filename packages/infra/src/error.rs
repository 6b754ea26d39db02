//! # インフラ層エラー定義
//!
//! データベースや Redis との通信で発生するエラーを表現する。
//!
//! `Display` は下位エラーのメッセージをそのまま出力する。
//! ヘルスチェックはこの文字列を `unhealthy: <理由>` の理由部分に使う。

use std::time::Duration;

use thiserror::Error;

/// インフラ層で発生するエラー
#[derive(Debug, Error)]
pub enum InfraError {
    /// データベースエラー
    ///
    /// 接続失敗、認証エラー、プールからの取得タイムアウトなど。
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    /// Redis エラー
    ///
    /// URL のパース失敗、接続失敗、コマンド実行エラーなど。
    #[error(transparent)]
    Redis(#[from] redis::RedisError),

    /// 疎通確認が期限内に終わらなかった
    #[error("deadline exceeded")]
    DeadlineExceeded,

    /// 起動時の接続確立が制限時間内に終わらなかった
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    /// 予期しないエラー
    #[error("{0}")]
    Unexpected(String),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_unexpectedはメッセージをそのまま表示する() {
        let error = InfraError::Unexpected("connection refused".to_string());
        assert_eq!(error.to_string(), "connection refused");
    }

    #[test]
    fn test_timeoutは制限時間を表示する() {
        let error = InfraError::Timeout(Duration::from_secs(10));
        assert_eq!(error.to_string(), "timed out after 10s");
    }

    #[test]
    fn test_databaseは下位エラーのメッセージを表示する() {
        let error = InfraError::from(sqlx::Error::PoolTimedOut);
        assert_eq!(error.to_string(), sqlx::Error::PoolTimedOut.to_string());
    }
}
