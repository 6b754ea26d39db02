//! # 体重記録

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::user::UserId;

define_uuid_id! {
    /// 体重記録 ID
    pub struct WeightId;
}

/// 体重記録
///
/// `sync_version` / `deleted_at` / `last_synced_at` はオフライン同期用に予約されている。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weight {
    pub id:             WeightId,
    pub user_id:        UserId,
    /// kg
    pub weight:         f64,
    /// 計測日時
    pub date_time:      DateTime<Utc>,
    pub sync_version:   i32,
    pub created_at:     DateTime<Utc>,
    pub updated_at:     DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at:     Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_synced_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{UserId, fixtures};

    #[test]
    fn test_weightのjsonにuser_idが文字列で出力される() {
        let user_id = UserId::new();
        let weight = fixtures::weight(user_id);
        let json = serde_json::to_value(&weight).unwrap();

        assert_eq!(json["user_id"], user_id.to_string());
        assert_eq!(json["sync_version"], 1);
        assert!(json.get("deleted_at").is_none());
    }
}
