//! # 食品
//!
//! 食品マスタの 1 件を表す。栄養成分は 1 食分あたりの値。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::user::UserId;

define_uuid_id! {
    /// 食品 ID
    pub struct FoodId;
}

/// 食品と栄養成分
///
/// ユーザーが登録した食品は `created_by_user_id` を持つ。
/// `verified` は運営による確認済みフラグ。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Food {
    pub id:                 FoodId,
    pub name:               String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand:              Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode:            Option<String>,
    /// kcal
    pub calories:           f64,
    /// g
    pub protein:            f64,
    /// g
    pub carbs:              f64,
    /// g
    pub fat:                f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by_user_id: Option<UserId>,
    pub verified:           bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified_at:        Option<DateTime<Utc>>,
    pub created_at:         DateTime<Utc>,
    pub updated_at:         DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::fixtures;

    #[test]
    fn test_foodのjsonはsnake_caseで出力される() {
        let food = fixtures::food();
        let json = serde_json::to_value(&food).unwrap();

        assert_eq!(json["name"], "Test Food");
        assert_eq!(json["calories"], 200.0);
        assert_eq!(json["verified"], false);
        assert!(json.get("created_at").is_some());
        assert!(json.get("brand").is_none());
        assert!(json.get("created_by_user_id").is_none());
    }

    #[test]
    fn test_foodはjsonから復元できる() {
        let food = fixtures::food();
        let json = serde_json::to_string(&food).unwrap();

        let restored: super::Food = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, food);
    }
}
