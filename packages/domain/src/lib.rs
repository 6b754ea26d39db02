//! # Modi ドメイン層
//!
//! フィットネス・栄養記録のドメインモデルを定義する。
//!
//! ## 現状
//!
//! 現時点のモデルは永続化・認証・業務ルールを持たない値型である。
//! `sync_version` や `deleted_at` などのオフライン同期用フィールドは宣言のみで、
//! 読み書きするコードパスは存在しない。
//!
//! ## 依存関係の方向
//!
//! ```text
//! api → infra → domain
//!  └──→ shared
//! ```
//!
//! ## モジュール構成
//!
//! - [`clock`] - 時刻プロバイダ
//! - [`user`] - ユーザー
//! - [`food`] - 食品と栄養成分
//! - [`weight`] - 体重記録
//! - [`workout`] - ワークアウト記録

#[macro_use]
mod macros;

pub mod clock;
pub mod food;
pub mod user;
pub mod weight;
pub mod workout;

#[cfg(any(test, feature = "test-support"))]
pub mod fixtures;

pub use food::{Food, FoodId};
pub use user::{User, UserId};
pub use weight::{Weight, WeightId};
pub use workout::{Workout, WorkoutId};
