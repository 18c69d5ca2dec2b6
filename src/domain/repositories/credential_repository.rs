//! # Credential Source Trait
//!
//! 認証情報の取得元を抽象化

use crate::domain::entities::credentials::Credentials;
use crate::domain::errors::UploadError;

/// 認証情報の取得元
///
/// 取得元の優先順位は実装側で決める
pub trait CredentialSource: Send + Sync {
    /// 認証情報を取得する
    ///
    /// # Errors
    ///
    /// どこからも取得できなかった場合に `UploadError::MissingCredentials` を返す
    fn credentials(&self) -> Result<Credentials, UploadError>;
}
