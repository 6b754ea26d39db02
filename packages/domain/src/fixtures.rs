//! # テスト用フィクスチャ
//!
//! `test-support` feature で公開する。値はどれも固定で、ID と時刻だけ毎回生成する。

use chrono::Utc;

use crate::{Food, FoodId, User, UserId, Weight, WeightId, Workout, WorkoutId};

/// デフォルト値のユーザー
pub fn user() -> User {
    User::new(UserId::new(), "test@example.com", Utc::now())
}

/// 指定したメールアドレスのユーザー
pub fn user_with_email(email: &str) -> User {
    User {
        email: email.to_string(),
        ..user()
    }
}

/// 未確認の食品
pub fn food() -> Food {
    let now = Utc::now();
    Food {
        id:                 FoodId::new(),
        name:               "Test Food".to_string(),
        brand:              None,
        barcode:            None,
        calories:           200.0,
        protein:            20.0,
        carbs:              30.0,
        fat:                5.0,
        created_by_user_id: None,
        verified:           false,
        verified_at:        None,
        created_at:         now,
        updated_at:         now,
    }
}

/// 75.5 kg の体重記録
pub fn weight(user_id: UserId) -> Weight {
    let now = Utc::now();
    Weight {
        id:             WeightId::new(),
        user_id,
        weight:         75.5,
        date_time:      now,
        sync_version:   1,
        created_at:     now,
        updated_at:     now,
        deleted_at:     None,
        last_synced_at: None,
    }
}

/// 100 kg × 3 セット × 10 レップのワークアウト
pub fn workout(user_id: UserId) -> Workout {
    let now = Utc::now();
    Workout {
        id:             WorkoutId::new(),
        user_id,
        name:           "Test Workout".to_string(),
        weight:         Some(100.0),
        sets:           Some(3),
        reps:           Some(10),
        notes:          None,
        day:            1,
        day_order:      0,
        sync_version:   1,
        created_at:     now,
        updated_at:     now,
        deleted_at:     None,
        last_synced_at: None,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_user_with_emailはメールアドレスだけを差し替える() {
        let user = user_with_email("other@example.com");

        assert_eq!(user.email, "other@example.com");
        assert!(user.password_hash.is_empty());
    }

    #[test]
    fn test_weightとworkoutは渡したユーザーに紐づく() {
        let user_id = UserId::new();

        assert_eq!(weight(user_id).user_id, user_id);
        assert_eq!(workout(user_id).user_id, user_id);
    }
}
