//! # Gatewayエンドポイント

pub mod upload_url;

pub use upload_url::handle_upload_url;

use std::sync::Arc;

use crate::config::GatewayState;

/// Gatewayのルーターを構築する。
pub fn router(state: Arc<GatewayState>) -> axum::Router {
    axum::Router::new()
        .route("/get-upload-url", axum::routing::post(handle_upload_url))
        .with_state(state)
}
