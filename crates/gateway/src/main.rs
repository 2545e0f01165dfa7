//! # Presign Gateway
//!
//! クライアントがアプリケーションサーバーを経由せず、オブジェクトストレージへ
//! 直接ファイルをアップロードするための署名付きURLを発行する。
//!
//! ## 役割
//! - アップロードサイズの検証
//! - サーバー側でのオブジェクトキー生成
//! - Content-Type / Content-Length を埋め込んだ署名付きPUT URLの発行
//!
//! ## API エンドポイント
//! - `POST /get-upload-url` — 署名付きURL発行

mod config;
mod endpoints;
mod error;
mod storage;

use std::sync::Arc;

use config::{GatewayConfig, GatewayState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    // .envは任意。存在しない場合はプロセス環境変数のみを使用する
    match dotenvy::dotenv() {
        Ok(path) => tracing::info!(path = %path.display(), ".envを読み込みました"),
        Err(e) if e.not_found() => tracing::debug!(".envが見つかりません"),
        Err(e) => return Err(anyhow::anyhow!(".envの読み込みに失敗: {e}")),
    }

    let config = GatewayConfig::from_env();

    let state = Arc::new(GatewayState::new(
        build_storage(&config)?,
        config.storage.bucket.clone(),
    ));

    let app = endpoints::router(state);

    tracing::info!(
        bucket = %config.storage.bucket,
        region = %config.storage.region,
        "Gatewayを {} で起動します",
        config.bind_addr
    );

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// 有効なベンダー機能に応じてストレージバックエンドを構築する。
#[cfg(feature = "vendor-aws")]
fn build_storage(config: &GatewayConfig) -> anyhow::Result<Box<dyn storage::UploadStorage>> {
    if let Some(endpoint) = &config.storage.endpoint {
        tracing::info!(s3_endpoint = %endpoint, "S3互換エンドポイントを使用");
    }
    Ok(Box::new(storage::S3UploadStorage::from_config(
        &config.storage,
    )))
}

#[cfg(not(feature = "vendor-aws"))]
fn build_storage(_config: &GatewayConfig) -> anyhow::Result<Box<dyn storage::UploadStorage>> {
    anyhow::bail!("ストレージバックエンドが無効です（vendor-aws 機能を有効にしてください）")
}
