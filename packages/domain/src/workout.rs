//! # ワークアウト記録
//!
//! 曜日（`day`）ごとのメニューとその並び順（`day_order`）を持つ。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::user::UserId;

define_uuid_id! {
    /// ワークアウト ID
    pub struct WorkoutId;
}

/// ワークアウト記録
///
/// 重量・セット数・レップ数は種目によって不要なため任意。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    pub id:             WorkoutId,
    pub user_id:        UserId,
    pub name:           String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight:         Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sets:           Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps:           Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes:          Option<String>,
    pub day:            i32,
    pub day_order:      i32,
    pub sync_version:   i32,
    pub created_at:     DateTime<Utc>,
    pub updated_at:     DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at:     Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_synced_at: Option<DateTime<Utc>>,
}
