//! # Gateway エラー型
//!
//! 全エンドポイントで共通のエラー型。レスポンスは常に
//! [`ApiResponse::Failure`] エンベロープとして返却される。

use axum::http::StatusCode;
use axum::Json;
use presign_types::ApiResponse;

/// Gatewayエラー型。
///
/// いずれも再試行されない終端エラーである。
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// リクエストボディがJSONとしてデコードできない
    #[error("{0}")]
    InvalidBody(String),
    /// content_lengthが許容範囲外
    #[error("content_length must be between 1 and {max} bytes, got {got}")]
    InvalidContentLength { got: i64, max: i64 },
    /// ストレージのセッション（リージョン・認証情報・バケット）構築に失敗
    #[error("{0}")]
    Session(String),
    /// PUTリクエストの構築または署名に失敗
    #[error("{0}")]
    Signing(String),
}

impl GatewayError {
    /// HTTPステータスコード
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::InvalidBody(_) | GatewayError::InvalidContentLength { .. } => {
                StatusCode::BAD_REQUEST
            }
            GatewayError::Session(_) | GatewayError::Signing(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// エンベロープの `message` に載せる要約
    pub fn summary(&self) -> &'static str {
        match self {
            GatewayError::InvalidBody(_) => "invalid request body",
            GatewayError::InvalidContentLength { .. } => "invalid content length",
            GatewayError::Session(_) => "failed to create storage session",
            GatewayError::Signing(_) => "failed to sign upload request",
        }
    }
}

impl axum::response::IntoResponse for GatewayError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "{}", self.summary());
        } else {
            tracing::debug!(error = %self, "{}", self.summary());
        }

        let body = ApiResponse::<()>::failure(self.summary(), Some(self.to_string()));
        (status, Json(body)).into_response()
    }
}
