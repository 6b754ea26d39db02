//! # API エラーハンドリング
//!
//! HTTP API のエラー定義と、axum レスポンスへの変換を行う。
//!
//! ## 設計方針
//!
//! - **RFC 7807 準拠**: Problem Details for HTTP APIs 仕様に従う
//! - **IntoResponse 実装**: axum との統合による自動レスポンス変換
//!
//! ヘルスチェックはこの型を使わない。依存サービスの異常は 503 と
//! レスポンスボディで表現し、エラーとしては扱わない。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// API 層で発生するエラー
#[derive(Debug, Error)]
pub enum ApiError {
    /// リソースが見つからない（404 Not Found）
    ///
    /// 未登録のルートへのリクエストもこれになる。
    #[error("リソースが見つかりません")]
    NotFound,
}

/// RFC 7807 準拠のエラーレスポンス
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// エラーの種類を識別する URI
    #[serde(rename = "type")]
    pub error_type: String,
    /// エラーの概要
    pub title:      String,
    /// HTTP ステータスコード
    pub status:     u16,
    /// エラーの詳細情報（オプション）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail:     Option<String>,
}

impl ErrorResponse {
    fn new(status: StatusCode, title: &str) -> Self {
        Self {
            error_type: "about:blank".to_string(),
            title:      title.to_string(),
            status:     status.as_u16(),
            detail:     None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new(StatusCode::NOT_FOUND, "Not Found"),
            ),
        };

        (status, Json(body)).into_response()
    }
}

/// 未登録のルートに対するフォールバックハンドラ
///
/// 認証や食品・体重・ワークアウトの CRUD はまだ提供していないため、
/// `/health` 以外はすべてここに来る。
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use pretty_assertions::assert_eq;

    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_not_foundは404のproblem_detailsを返す() {
        let response = ApiError::NotFound.into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({
                "type": "about:blank",
                "title": "Not Found",
                "status": 404
            })
        );
    }
}
