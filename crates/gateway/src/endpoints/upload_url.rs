//! # POST /get-upload-url
//!
//! ストレージへの直接アップロード用に、署名付きPUT URLを発行する。

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use presign_types::{ApiResponse, UploadUrlRequest, UploadUrlResponse};

use crate::config::GatewayState;
use crate::error::GatewayError;
use crate::storage::{generate_presigned_upload, SigningParams};

/// POST /get-upload-url — 署名付きURL発行。
///
/// ボディはContent-Typeヘッダに関わらずJSONとしてデコードする。
/// 先頭のJSON値のみを読み、後続のバイト列は無視する。
/// Content-TypeとContent-Lengthは署名に埋め込まれるため、
/// 申告と異なるアップロードはストレージ側で拒否される。
pub async fn handle_upload_url(
    State(state): State<Arc<GatewayState>>,
    body: Bytes,
) -> Result<Json<ApiResponse<UploadUrlResponse>>, GatewayError> {
    let request = decode_request(&body)?;

    if request.content_length <= 0 || request.content_length > state.max_upload_size {
        return Err(GatewayError::InvalidContentLength {
            got: request.content_length,
            max: state.max_upload_size,
        });
    }

    let params = SigningParams {
        file_name: generate_file_name(Utc::now(), &state.file_extension),
        ttl: state.upload_ttl,
        content_length: request.content_length,
        bucket: state.bucket.clone(),
        content_type: state.content_type.clone(),
    };

    let upload = generate_presigned_upload(state.storage.as_ref(), &params).await?;

    tracing::info!(
        file_name = %upload.file_name,
        content_length = request.content_length,
        expiration_time = %upload.expiration_time,
        "署名付きURLを発行"
    );

    Ok(Json(ApiResponse::success("pre-signed URL generated", upload)))
}

/// ボディ先頭のJSON値を [`UploadUrlRequest`] としてデコードする。
fn decode_request(body: &[u8]) -> Result<UploadUrlRequest, GatewayError> {
    serde_json::Deserializer::from_slice(body)
        .into_iter::<UploadUrlRequest>()
        .next()
        .ok_or_else(|| GatewayError::InvalidBody("empty request body".to_string()))?
        .map_err(|e| GatewayError::InvalidBody(e.to_string()))
}

/// 現在時刻（秒精度）からオブジェクトキーを生成する。
///
/// 同一秒内のリクエストは同じキーになり、後からのアップロードが上書きする。
pub fn generate_file_name(now: DateTime<Utc>, extension: &str) -> String {
    format!("{}.{}", now.format("%Y-%m-%d-%H-%M-%S"), extension)
}
