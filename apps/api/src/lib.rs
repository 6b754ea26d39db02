//! # Modi API サーバー
//!
//! フィットネス・栄養記録アプリのバックエンド。
//! 現時点で提供するのはヘルスチェックのみ。
//!
//! ## 起動シーケンス
//!
//! ```text
//! 設定読み込み → トレーシング初期化 → 依存サービス接続 → HTTP 待ち受け
//!     → シャットダウンシグナル → 接続解放 → 終了
//! ```
//!
//! PostgreSQL・Redis に接続できなくてもサーバーは起動する。
//! 接続できなかったサービスはヘルスチェックで `not configured` と報告される。
//!
//! ## モジュール構成
//!
//! - [`config`] - アプリケーション設定（環境変数と `.env` からの読み込み）
//! - [`error`] - API エラー定義と HTTP レスポンスへの変換
//! - [`handler`] - HTTP リクエストハンドラ
//! - [`app_builder`] - ルーターの組み立て
//! - [`server`] - 依存サービスの接続・解放とサーバーのライフサイクル

pub mod app_builder;
pub mod config;
pub mod error;
pub mod handler;
pub mod server;
