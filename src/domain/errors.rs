//! # Domain Errors
//!
//! 実行全体を中断させる致命的エラー
//!
//! パスの不正やジョブ単位の失敗はここには含めない（警告として記録し、処理を続行する）

use std::path::PathBuf;
use thiserror::Error;

/// 実行全体を中断させるエラー
#[derive(Error, Debug)]
pub enum UploadError {
    /// どこからも認証情報が得られなかった
    #[error(
        "'{config_file}' file does not exist in current directory ({cwd}) or home directory ({home}).  Use -u/-p options."
    )]
    MissingCredentials {
        config_file: String,
        cwd: PathBuf,
        home: PathBuf,
    },

    /// 認証情報ファイルを読めなかった
    #[error("invalid credentials file '{path}': {message}")]
    CredentialFile { path: PathBuf, message: String },

    /// ログインに失敗した
    #[error("LOGIN FAILED - please verify your login credentials ({0})")]
    Authentication(String),

    /// 解決後のジョブが0件
    #[error("No valid files.")]
    EmptyBatch,
}
