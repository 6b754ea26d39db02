//! # 依存サービスの有無
//!
//! 起動時に接続できなかった依存サービスは、プロセス終了まで `Absent` のまま扱う
//! （再接続はしない）。`Option` ではなく専用の型にすることで、
//! 利用側が「未設定」のケースを必ず処理するようにする。

/// 依存サービスへのハンドル、またはその不在
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dependency<T> {
    /// 接続済み
    Present(T),
    /// 未設定、または起動時の接続に失敗した
    Absent,
}

impl<T> Dependency<T> {
    /// 接続済みかどうか
    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    /// 中身への参照に変換する
    pub fn as_ref(&self) -> Dependency<&T> {
        match self {
            Self::Present(handle) => Dependency::Present(handle),
            Self::Absent => Dependency::Absent,
        }
    }

    /// 接続済みの場合だけ中身を変換する
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Dependency<U> {
        match self {
            Self::Present(handle) => Dependency::Present(f(handle)),
            Self::Absent => Dependency::Absent,
        }
    }
}

impl<T> From<Option<T>> for Dependency<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(handle) => Self::Present(handle),
            None => Self::Absent,
        }
    }
}
