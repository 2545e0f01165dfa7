//! # Gateway設定・共有状態
//!
//! 環境変数からの設定読み込みとGatewayの共有状態の定義。
//! 設定は起動時に一度だけ読み込み、以後は不変として扱う。

use std::time::Duration;

use crate::storage::UploadStorage;

/// アップロード最大サイズ（バイト）: 1 MiB
pub const MAX_UPLOAD_SIZE: i64 = 1024 * 1024;

/// 署名付きURLの有効期間: 10分
pub const UPLOAD_TTL: Duration = Duration::from_secs(10 * 60);

/// アップロードを許可するContent-Type
pub const UPLOAD_CONTENT_TYPE: &str = "image/png";

/// 生成するファイル名の拡張子
pub const UPLOAD_FILE_EXTENSION: &str = "png";

/// デフォルトの待ち受けアドレス
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// ストレージ接続設定。
#[derive(Debug, Clone, Default)]
pub struct StorageConfig {
    /// アップロード先バケット（AWS_BUCKET）
    pub bucket: String,
    /// リージョン（AWS_REGION）
    pub region: String,
    /// S3互換エンドポイント（S3_ENDPOINT）。MinIO, R2等を使う場合に設定する。
    pub endpoint: Option<String>,
    /// アクセスキー（AWS_ACCESS_KEY_ID）
    pub access_key: Option<String>,
    /// シークレットキー（AWS_SECRET_ACCESS_KEY）
    pub secret_key: Option<String>,
}

/// Gateway設定。
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// 待ち受けアドレス（BIND_ADDR）
    pub bind_addr: String,
    pub storage: StorageConfig,
}

impl GatewayConfig {
    /// 環境変数から構築する。
    ///
    /// バケット・リージョンが未設定でも起動は継続する。
    /// 不備は署名時にセッションエラーとして返却される。
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 任意のキー参照関数から構築する。空文字列は未設定として扱う。
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let storage = StorageConfig {
            bucket: get("AWS_BUCKET").unwrap_or_default(),
            region: get("AWS_REGION").unwrap_or_default(),
            endpoint: get("S3_ENDPOINT"),
            access_key: get("AWS_ACCESS_KEY_ID"),
            secret_key: get("AWS_SECRET_ACCESS_KEY"),
        };

        if storage.bucket.is_empty() {
            tracing::warn!("AWS_BUCKETが未設定です。署名付きURLの発行は失敗します");
        }
        if storage.region.is_empty() {
            tracing::warn!("AWS_REGIONが未設定です。署名付きURLの発行は失敗します");
        }

        Self {
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            storage,
        }
    }
}

/// Gatewayの共有状態。
pub struct GatewayState {
    /// ストレージバックエンド（トレイトで抽象化）
    pub storage: Box<dyn UploadStorage>,
    /// アップロード先バケット
    pub bucket: String,
    /// アップロード最大サイズ（バイト）
    pub max_upload_size: i64,
    /// 署名付きURLの有効期間
    pub upload_ttl: Duration,
    /// 署名に埋め込むContent-Type
    pub content_type: String,
    /// 生成するファイル名の拡張子
    pub file_extension: String,
}

impl GatewayState {
    /// 固定のアップロードポリシーで共有状態を構築する。
    pub fn new(storage: Box<dyn UploadStorage>, bucket: impl Into<String>) -> Self {
        Self {
            storage,
            bucket: bucket.into(),
            max_upload_size: MAX_UPLOAD_SIZE,
            upload_ttl: UPLOAD_TTL,
            content_type: UPLOAD_CONTENT_TYPE.to_string(),
            file_extension: UPLOAD_FILE_EXTENSION.to_string(),
        }
    }
}
