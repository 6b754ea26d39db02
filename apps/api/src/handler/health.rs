//! # ヘルスチェックハンドラ
//!
//! 依存サービス（PostgreSQL, Redis）の疎通を確認し、稼働状態を返す。
//!
//! ## エンドポイント
//!
//! ```text
//! GET /health
//! ```
//!
//! ## レスポンス例
//!
//! ```json
//! {
//!   "status": "degraded",
//!   "timestamp": "2026-10-19T09:30:00Z",
//!   "services": {
//!     "database": "healthy",
//!     "redis": "unhealthy: deadline exceeded"
//!   }
//! }
//! ```
//!
//! | 状態 | HTTP ステータス |
//! |------|-----------------|
//! | `ok` | 200 OK |
//! | `degraded` | 503 Service Unavailable |
//!
//! 起動時に接続しなかったサービスは `"not configured"` になり、全体の状態には影響しない。
//!
//! ## 期限
//!
//! 1 リクエスト内の疎通確認はすべて同じ期限（既定 5 秒）を共有し、並行に実行する。
//! 依存サービスが応答しなくても、レスポンスは期限内に返る。

use std::{sync::Arc, time::Duration};

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use modi_domain::clock::{Clock, SystemClock};
use modi_infra::{Dependency, LivenessProbe, probe};
use modi_shared::{HealthResponse, ServiceStatus};
use tokio::time::Instant;

/// 1 リクエストあたりの疎通確認の期限
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// ヘルスチェックハンドラの State
///
/// 起動時に確立した接続をそのまま保持する。リクエストごとに再接続はしない。
#[derive(Clone)]
pub struct HealthState {
    database:      Dependency<Arc<dyn LivenessProbe>>,
    redis:         Dependency<Arc<dyn LivenessProbe>>,
    clock:         Arc<dyn Clock>,
    probe_timeout: Duration,
}

impl HealthState {
    pub fn new(
        database: Dependency<Arc<dyn LivenessProbe>>,
        redis: Dependency<Arc<dyn LivenessProbe>>,
    ) -> Self {
        Self {
            database,
            redis,
            clock: Arc::new(SystemClock),
            probe_timeout: PROBE_TIMEOUT,
        }
    }

    /// タイムスタンプに使う時計を差し替える
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// 疎通確認の期限を差し替える
    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    /// 依存サービスを確認してレスポンスを組み立てる
    ///
    /// タイムスタンプは疎通確認の前に取得する。
    pub async fn report(&self) -> HealthResponse {
        let now = self.clock.now();
        let deadline = Instant::now() + self.probe_timeout;

        let (database, redis) = tokio::join!(
            check_service("database", &self.database, deadline),
            check_service("redis", &self.redis, deadline),
        );

        HealthResponse::aggregate(now, [("database", database), ("redis", redis)])
    }
}

async fn check_service(
    name: &str,
    dependency: &Dependency<Arc<dyn LivenessProbe>>,
    deadline: Instant,
) -> ServiceStatus {
    let Dependency::Present(handle) = dependency else {
        return ServiceStatus::NotConfigured;
    };

    match probe::check(handle.as_ref(), deadline).await {
        Ok(()) => ServiceStatus::Healthy,
        Err(e) => {
            tracing::warn!(service = name, error = %e, "疎通確認に失敗しました");
            ServiceStatus::Unhealthy(e.to_string())
        }
    }
}

/// ヘルスチェックエンドポイント
///
/// すべての依存サービスが `healthy` か `not configured` なら 200、
/// 1 つでも `unhealthy` なら 503 を返す。どちらの場合もボディは同じ形式。
#[tracing::instrument(skip_all)]
pub async fn health_check(State(state): State<Arc<HealthState>>) -> impl IntoResponse {
    let report = state.report().await;

    let status = if report.status.is_ok() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(report))
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use modi_domain::clock::FixedClock;
    use modi_infra::InfraError;
    use modi_shared::HealthStatus;
    use pretty_assertions::assert_eq;

    use super::*;

    struct Up;

    #[async_trait]
    impl LivenessProbe for Up {
        async fn ping(&self) -> Result<(), InfraError> {
            Ok(())
        }
    }

    struct Stuck;

    #[async_trait]
    impl LivenessProbe for Stuck {
        async fn ping(&self) -> Result<(), InfraError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(())
        }
    }

    fn present(probe: impl LivenessProbe + 'static) -> Dependency<Arc<dyn LivenessProbe>> {
        Dependency::Present(Arc::new(probe))
    }

    #[tokio::test]
    async fn test_依存サービスが無ければokでnot_configuredを返す() {
        let sut = HealthState::new(Dependency::Absent, Dependency::Absent);

        let report = sut.report().await;

        assert_eq!(report.status, HealthStatus::Ok);
        assert_eq!(report.services["database"], ServiceStatus::NotConfigured);
        assert_eq!(report.services["redis"], ServiceStatus::NotConfigured);
    }

    #[tokio::test]
    async fn test_タイムスタンプは時計の時刻を使う() {
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 9, 30, 0).unwrap();
        let sut = HealthState::new(present(Up), Dependency::Absent)
            .with_clock(Arc::new(FixedClock::new(now)));

        let report = sut.report().await;

        assert_eq!(report.timestamp, "2026-10-19T09:30:00Z");
        assert_eq!(report.services["database"], ServiceStatus::Healthy);
    }

    #[tokio::test]
    async fn test_応答しないサービスは期限内にunhealthyになる() {
        let sut = HealthState::new(present(Stuck), present(Stuck))
            .with_probe_timeout(Duration::from_millis(50));
        let started = Instant::now();

        let report = sut.report().await;

        assert!(started.elapsed() < Duration::from_secs(5));
        assert_eq!(report.status, HealthStatus::Degraded);
        assert_eq!(
            report.services["redis"],
            ServiceStatus::Unhealthy("deadline exceeded".to_string())
        );
    }
}
