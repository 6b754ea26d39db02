//! # ユーザー
//!
//! アカウントの識別子と同意状況を保持する。
//! 認証（パスワード検証、トークン発行）はまだ実装していない。

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

define_uuid_id! {
    /// ユーザー ID
    pub struct UserId;
}

/// ユーザー
///
/// `password_hash` は JSON に出力しない。`Debug` 出力でもマスクする。
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id:                     UserId,
    pub email:                  String,
    #[serde(skip_serializing, default)]
    pub password_hash:          String,
    /// 利用規約・プライバシーポリシーへの同意日時
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consent_date:           Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub privacy_policy_version: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terms_version:          Option<i32>,
    pub created_at:             DateTime<Utc>,
    pub updated_at:             DateTime<Utc>,
}

impl User {
    /// 同意情報なしのユーザーを作成する
    pub fn new(id: UserId, email: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id,
            email:                  email.into(),
            password_hash:          String::new(),
            consent_date:           None,
            privacy_policy_version: None,
            terms_version:          None,
            created_at:             now,
            updated_at:             now,
        }
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .field("consent_date", &self.consent_date)
            .field("privacy_policy_version", &self.privacy_policy_version)
            .field("terms_version", &self.terms_version)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}
