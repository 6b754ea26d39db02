//! # ヘルスチェック共通型
//!
//! `GET /health` が返すレスポンス型と、依存サービスごとの状態から
//! 全体ステータスを導出する集約ルールを提供する。
//!
//! ## レスポンス例
//!
//! ```json
//! {
//!   "status": "degraded",
//!   "timestamp": "2025-01-01T00:00:00Z",
//!   "services": {
//!     "database": "unhealthy: connection refused",
//!     "redis": "not configured"
//!   }
//! }
//! ```
//!
//! ## 集約ルール
//!
//! | 個別状態 | 全体ステータスへの影響 |
//! |----------|------------------------|
//! | `healthy` | なし |
//! | `not configured` | なし（最小構成のデプロイでは想定内） |
//! | `unhealthy: <理由>` | `degraded` にする |

use std::{collections::BTreeMap, fmt};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

const HEALTHY: &str = "healthy";
const NOT_CONFIGURED: &str = "not configured";
const UNHEALTHY_PREFIX: &str = "unhealthy: ";

/// 全体のステータス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// 設定済みの依存サービスがすべて応答している
    Ok,
    /// 設定済みの依存サービスのうち 1 つ以上が応答しない
    Degraded,
}

impl HealthStatus {
    /// `Ok` かどうか
    pub fn is_ok(self) -> bool {
        matches!(self, Self::Ok)
    }
}

/// 依存サービス個別の状態
///
/// JSON では文字列として表現する（`"healthy"` / `"not configured"` /
/// `"unhealthy: <理由>"`）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ServiceStatus {
    /// 期限内に応答した
    Healthy,
    /// 応答しなかった、またはエラーを返した（エラーメッセージを保持）
    Unhealthy(String),
    /// 起動時に接続が確立されていない
    NotConfigured,
}

impl ServiceStatus {
    /// 全体ステータスを `degraded` にする状態かどうか
    pub fn is_unhealthy(&self) -> bool {
        matches!(self, Self::Unhealthy(_))
    }
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Healthy => f.write_str(HEALTHY),
            Self::Unhealthy(reason) => write!(f, "{UNHEALTHY_PREFIX}{reason}"),
            Self::NotConfigured => f.write_str(NOT_CONFIGURED),
        }
    }
}

impl From<ServiceStatus> for String {
    fn from(status: ServiceStatus) -> Self {
        status.to_string()
    }
}

impl TryFrom<String> for ServiceStatus {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            HEALTHY => Ok(Self::Healthy),
            NOT_CONFIGURED => Ok(Self::NotConfigured),
            other => other
                .strip_prefix(UNHEALTHY_PREFIX)
                .map(|reason| Self::Unhealthy(reason.to_string()))
                .ok_or_else(|| format!("unknown service status: {other:?}")),
        }
    }
}

/// ヘルスチェックレスポンス
///
/// リクエストごとに新しく組み立てる。永続化もキャッシュもしない。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// 全体のステータス
    pub status:    HealthStatus,
    /// レスポンス組み立て時刻（RFC 3339, UTC）
    pub timestamp: String,
    /// 個別チェック結果（キー: 依存サービス名）
    pub services:  BTreeMap<String, ServiceStatus>,
}

impl HealthResponse {
    /// 個別チェック結果を集約してレスポンスを組み立てる
    ///
    /// `Unhealthy` が 1 つでもあれば `Degraded`、それ以外は `Ok`。
    /// 依存サービスが 1 つもない場合も `Ok` になる。
    pub fn aggregate<I, K>(now: DateTime<Utc>, services: I) -> Self
    where
        I: IntoIterator<Item = (K, ServiceStatus)>,
        K: Into<String>,
    {
        let services: BTreeMap<String, ServiceStatus> = services
            .into_iter()
            .map(|(name, status)| (name.into(), status))
            .collect();

        let status = if services.values().any(ServiceStatus::is_unhealthy) {
            HealthStatus::Degraded
        } else {
            HealthStatus::Ok
        };

        Self {
            status,
            timestamp: now.to_rfc3339_opts(SecondsFormat::Secs, true),
            services,
        }
    }
}
