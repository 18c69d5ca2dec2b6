//! # Remote Service Traits
//!
//! アップロード先リモートサービスを抽象化
//!
//! `RemoteService::login` が返すセッションを通してのみアップロード・注釈付けを
//! 呼び出せる。ログイン前の呼び出しは型レベルで発生しない。

use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;

#[cfg(test)]
use mockall::automock;

use crate::domain::entities::credentials::Credentials;
use crate::domain::entities::job_status::UploadOutcome;

/// アップロード呼び出しの応答
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReceipt {
    pub outcome: UploadOutcome,
    /// 成功時はリモートID、失敗時はエラー内容
    pub remote_id: String,
}

impl UploadReceipt {
    pub fn success(remote_id: impl Into<String>) -> Self {
        Self {
            outcome: UploadOutcome::Success,
            remote_id: remote_id.into(),
        }
    }

    pub fn failure(detail: impl Into<String>) -> Self {
        Self {
            outcome: UploadOutcome::Failure,
            remote_id: detail.into(),
        }
    }
}

/// 認証済みセッション
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RemoteSession: Send + Sync {
    /// アクティビティファイルをアップロードする
    ///
    /// # Errors
    ///
    /// 通信に失敗した場合にエラーを返す（呼び出し側で失敗として記録する）
    async fn upload(&self, path: &Path) -> Result<UploadReceipt>;

    /// アクティビティの表示名を設定する
    async fn set_name(&self, remote_id: &str, name: &str) -> Result<bool>;

    /// アクティビティ種別を設定する
    async fn set_type(&self, remote_id: &str, activity_type: &str) -> Result<bool>;
}

/// リモートサービス
#[async_trait]
pub trait RemoteService: Send + Sync {
    type Session: RemoteSession;

    /// ログインしてセッションを確立する
    ///
    /// # Errors
    ///
    /// 認証に失敗した場合にエラーを返す（実行全体が中断される）
    async fn login(&self, credentials: &Credentials) -> Result<Self::Session>;
}
