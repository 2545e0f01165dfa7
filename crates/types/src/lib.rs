//! # Presign Gateway 共有型定義
//!
//! `POST /get-upload-url` のリクエスト/レスポンスと、全レスポンス共通の
//! エンベロープ型を提供する。Gateway本体とクライアントの双方から参照される。
//!
//! ## JSONフィールド名
//! 既存クライアントとの互換性のため、フィールド名（`pre_assigned_url` 等）は
//! 変更しないこと。

use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ---------------------------------------------------------------------------
// /get-upload-url
// ---------------------------------------------------------------------------

/// /get-upload-url リクエスト。
///
/// 未知のフィールドは無視される。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadUrlRequest {
    /// アップロード予定のコンテンツサイズ（バイト）。
    /// 負値も受け付け、範囲検証はGateway側で行う。
    /// 欠落時は0として扱い、範囲外エラーになる。
    #[serde(default)]
    pub content_length: i64,
}

/// /get-upload-url レスポンス（署名付きアップロードURLの記述子）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadUrlResponse {
    /// アップロード時に使用するHTTPメソッド（常に "PUT"）
    pub method: String,
    /// 署名付きアップロードURL
    pub pre_assigned_url: String,
    /// URL有効期限（RFC3339）。
    /// 署名に埋め込まれた期限ではなく、発行時刻 + TTL で算出した近似値。
    pub expiration_time: DateTime<Utc>,
    /// サーバー側で生成したオブジェクトキー
    pub file_name: String,
    /// バケットの仮想ホスト名
    pub host: String,
    /// 利用者向けの注意事項
    pub details: Vec<String>,
    /// アップロード完了後のオブジェクトURL
    pub object_url: String,
}

// ---------------------------------------------------------------------------
// レスポンスエンベロープ
// ---------------------------------------------------------------------------

/// 全エンドポイント共通のレスポンスエンベロープ。
///
/// JSON上は `{success, message, data?, error?}` の単一形状にシリアライズされる。
/// 存在しないフィールドは `null` ではなく省略される。
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse<T> {
    /// 成功
    Success {
        /// 人間向けメッセージ
        message: String,
        /// ペイロード
        data: T,
    },
    /// 失敗
    Failure {
        /// 失敗理由の要約
        message: String,
        /// 失敗の詳細
        error: Option<String>,
    },
}

impl<T> ApiResponse<T> {
    /// 成功レスポンスを構築する。
    pub fn success(message: impl Into<String>, data: T) -> Self {
        ApiResponse::Success {
            message: message.into(),
            data,
        }
    }

    /// 失敗レスポンスを構築する。
    pub fn failure(message: impl Into<String>, error: Option<String>) -> Self {
        ApiResponse::Failure {
            message: message.into(),
            error,
        }
    }

    /// 成功レスポンスかどうか
    pub fn is_success(&self) -> bool {
        matches!(self, ApiResponse::Success { .. })
    }

    /// エンベロープの `message`
    pub fn message(&self) -> &str {
        match self {
            ApiResponse::Success { message, .. } | ApiResponse::Failure { message, .. } => message,
        }
    }
}

impl<T: Serialize> Serialize for ApiResponse<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ApiResponse::Success { message, data } => {
                let mut s = serializer.serialize_struct("ApiResponse", 3)?;
                s.serialize_field("success", &true)?;
                s.serialize_field("message", message)?;
                s.serialize_field("data", data)?;
                s.end()
            }
            ApiResponse::Failure { message, error } => {
                let len = if error.is_some() { 3 } else { 2 };
                let mut s = serializer.serialize_struct("ApiResponse", len)?;
                s.serialize_field("success", &false)?;
                s.serialize_field("message", message)?;
                match error {
                    Some(error) => s.serialize_field("error", error)?,
                    None => s.skip_field("error")?,
                }
                s.end()
            }
        }
    }
}

/// デシリアライズ用の中間表現（ワイヤ形状そのもの）
#[derive(Deserialize)]
struct ApiResponseRepr<T> {
    success: bool,
    message: String,
    data: Option<T>,
    error: Option<String>,
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for ApiResponse<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let repr = ApiResponseRepr::<T>::deserialize(deserializer)?;
        match (repr.success, repr.data) {
            (true, Some(data)) => Ok(ApiResponse::Success {
                message: repr.message,
                data,
            }),
            (true, None) => Err(D::Error::missing_field("data")),
            (false, _) => Ok(ApiResponse::Failure {
                message: repr.message,
                error: repr.error,
            }),
        }
    }
}
