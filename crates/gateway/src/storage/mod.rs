//! # アップロード用署名付きURL
//!
//! ストレージバックエンドの抽象インターフェースと、署名付きURLから
//! クライアント向け記述子（[`UploadUrlResponse`]）を組み立てる処理。
//! S3互換ストレージ実装は `s3` サブモジュールを参照。

#[cfg(feature = "vendor-aws")]
pub mod s3;

#[cfg(feature = "vendor-aws")]
pub use s3::S3UploadStorage;

use std::time::Duration;

use chrono::{DateTime, Utc};
use presign_types::UploadUrlResponse;

use crate::error::GatewayError;

/// 署名付きURL生成パラメータ。
#[derive(Debug, Clone)]
pub struct SigningParams {
    /// オブジェクトキー
    pub file_name: String,
    /// URLの有効期間
    pub ttl: Duration,
    /// 署名に埋め込むContent-Length
    pub content_length: i64,
    /// バケット名
    pub bucket: String,
    /// 署名に埋め込むContent-Type
    pub content_type: String,
}

/// ストレージバックエンドの抽象インターフェース。
///
/// 実装はS3互換ストレージ（AWS S3, MinIO, Cloudflare R2等）を想定するが、
/// テストではモックに差し替える。
#[async_trait::async_trait]
pub trait UploadStorage: Send + Sync {
    /// `params` に対する署名付きPUT URLを生成する。
    ///
    /// Content-TypeとContent-Lengthは署名対象に含めること。
    /// これによりサイズや形式が異なるアップロードはストレージ側で拒否される。
    async fn presign_put(&self, params: &SigningParams) -> Result<String, GatewayError>;
}

/// 署名付きURLを生成し、クライアント向け記述子を返す。
pub async fn generate_presigned_upload(
    storage: &dyn UploadStorage,
    params: &SigningParams,
) -> Result<UploadUrlResponse, GatewayError> {
    let url = storage.presign_put(params).await?;
    Ok(describe_upload(params, url, Utc::now()))
}

/// 署名付きURLと生成パラメータから記述子を組み立てる。
///
/// `expiration_time` は `issued_at + ttl` による近似値であり、
/// 署名に埋め込まれた期限を読み戻したものではない。
pub fn describe_upload(
    params: &SigningParams,
    url: String,
    issued_at: DateTime<Utc>,
) -> UploadUrlResponse {
    let host = format!("{}.s3.amazonaws.com", params.bucket);
    let object_url = format!("https://{}/{}", host, params.file_name);
    let ttl = chrono::Duration::from_std(params.ttl).unwrap_or(chrono::Duration::zero());

    UploadUrlResponse {
        method: "PUT".to_string(),
        pre_assigned_url: url,
        expiration_time: issued_at + ttl,
        file_name: params.file_name.clone(),
        host,
        details: vec![
            "Use the pre-signed URL to upload the file".to_string(),
            format!(
                "The URL will expire after {} minutes",
                params.ttl.as_secs() / 60
            ),
            format!(
                "The maximum upload size is {} bytes",
                params.content_length
            ),
        ],
        object_url,
    }
}
