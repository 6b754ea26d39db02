//! # Modi インフラ層
//!
//! 外部サービス（PostgreSQL, Redis）への接続と疎通確認を提供する。
//!
//! ## モジュール構成
//!
//! - [`db`] - PostgreSQL 接続プール
//! - [`redis`] - Redis 接続マネージャ
//! - [`dependency`] - 起動時に確立できなかった接続を表す `Dependency<T>`
//! - [`probe`] - 期限付きの疎通確認（liveness probe）
//! - [`error`] - インフラ層エラー

pub mod db;
pub mod dependency;
pub mod error;
pub mod probe;
pub mod redis;

pub use crate::{
    db::PostgresHandle,
    dependency::Dependency,
    error::InfraError,
    probe::LivenessProbe,
    redis::RedisHandle,
};
