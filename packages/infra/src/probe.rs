//! # Liveness Probe
//!
//! 依存サービスに 1 往復のリクエストを送り、応答することだけを確認する。
//! アプリケーションレベルの状態は見ない。
//!
//! 期限は呼び出し側が明示的に渡す。リクエスト単位の期限を複数の probe で
//! 共有できるよう、[`Duration`] ではなく [`Instant`] で受け取る。
//!
//! ```rust,ignore
//! let deadline = Instant::now() + Duration::from_secs(5);
//! probe::check(&*handle, deadline).await?;
//! ```

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use crate::error::InfraError;

/// 疎通確認ができる依存サービス
#[async_trait]
pub trait LivenessProbe: Send + Sync {
    /// 1 往復の疎通確認を行う
    ///
    /// 期限は持たない。期限付きで呼ぶ場合は [`check`] を使う。
    async fn ping(&self) -> Result<(), InfraError>;
}

/// 期限付きで疎通確認を行う
///
/// 期限を過ぎた場合は [`InfraError::DeadlineExceeded`] を返し、
/// 実行中の `ping` はその場で破棄される。
pub async fn check(probe: &dyn LivenessProbe, deadline: Instant) -> Result<(), InfraError> {
    match tokio::time::timeout_at(deadline, probe.ping()).await {
        Ok(result) => result,
        Err(_) => Err(InfraError::DeadlineExceeded),
    }
}

/// 非同期処理に制限時間を設ける
///
/// 起動時の接続確立に使う。制限時間を過ぎた場合は [`InfraError::Timeout`] を返す。
pub async fn within<T, F>(limit: Duration, future: F) -> Result<T, InfraError>
where
    F: Future<Output = Result<T, InfraError>>,
{
    tokio::time::timeout(limit, future)
        .await
        .unwrap_or(Err(InfraError::Timeout(limit)))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    struct Responsive;

    #[async_trait]
    impl LivenessProbe for Responsive {
        async fn ping(&self) -> Result<(), InfraError> {
            Ok(())
        }
    }

    struct Hanging;

    #[async_trait]
    impl LivenessProbe for Hanging {
        async fn ping(&self) -> Result<(), InfraError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_checkは期限内に応答すればokを返す() {
        let deadline = Instant::now() + Duration::from_secs(5);

        assert!(check(&Responsive, deadline).await.is_ok());
    }

    #[tokio::test]
    async fn test_checkは期限を過ぎるとdeadline_exceededを返す() {
        let started = Instant::now();
        let deadline = started + Duration::from_millis(50);

        let error = check(&Hanging, deadline).await.unwrap_err();

        assert!(matches!(error, InfraError::DeadlineExceeded));
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_withinは制限時間を過ぎるとtimeoutを返す() {
        let result: Result<(), InfraError> = within(Duration::from_millis(20), async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(())
        })
        .await;

        assert_eq!(result.unwrap_err().to_string(), "timed out after 20ms");
    }

    #[tokio::test]
    async fn test_withinは内側のエラーをそのまま返す() {
        let result: Result<(), InfraError> = within(Duration::from_secs(5), async {
            Err(InfraError::Unexpected("connection refused".to_string()))
        })
        .await;

        assert_eq!(result.unwrap_err().to_string(), "connection refused");
    }
}
