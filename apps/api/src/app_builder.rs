//! # ルーターの組み立て
//!
//! ルートの登録とミドルウェアの適用を行う。
//! テストからも同じルーターを `oneshot` で呼べるよう、サーバー起動とは分けている。

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::{
    error::not_found,
    handler::{HealthState, health_check},
};

/// アプリケーションのルーターを構築する
///
/// | メソッド | パス | ハンドラ |
/// |----------|------|----------|
/// | GET | `/health` | [`health_check`] |
///
/// それ以外のパスは 404（RFC 7807 形式）を返す。
pub fn build_router(health: HealthState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .with_state(Arc::new(health))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
}
