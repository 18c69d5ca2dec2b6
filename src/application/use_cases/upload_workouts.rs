//! # Upload Workouts Use Case
//!
//! ログイン、アップロード、名前・種別設定を順に実行するユースケース

use std::sync::Arc;

use crate::domain::entities::credentials::Credentials;
use crate::domain::entities::job_status::{AnnotationOutcome, JobStatus, UploadOutcome};
use crate::domain::entities::upload_job::{BatchResult, UploadJob};
use crate::domain::errors::UploadError;
use crate::domain::repositories::remote_service::{RemoteService, RemoteSession, UploadReceipt};
use crate::domain::services::diagnostics::{AnnotationField, Diagnostic, DiagnosticSink};

/// アップロード結果のサマリー
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadSummary {
    /// アップロードに成功したジョブの数
    pub uploaded_count: usize,
    /// アップロードに失敗したジョブの数
    pub failed_count: usize,
}

impl UploadSummary {
    pub fn from_statuses(statuses: &[JobStatus]) -> Self {
        let uploaded_count = statuses
            .iter()
            .filter(|status| status.upload_outcome.is_success())
            .count();

        Self {
            uploaded_count,
            failed_count: statuses.len() - uploaded_count,
        }
    }
}

/// ワークアウトアップロードユースケース
///
/// 1回だけログインし、バッチ内のジョブを順番に処理する。
/// ジョブ単位の失敗は結果に記録し、残りのジョブの処理を続ける。
pub struct UploadWorkoutsUseCase<S: RemoteService> {
    remote_service: Arc<S>,
    sink: Arc<dyn DiagnosticSink>,
}

impl<S: RemoteService> UploadWorkoutsUseCase<S> {
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `remote_service` - リモートサービス
    /// * `sink` - 観測結果の出力先
    pub fn new(remote_service: Arc<S>, sink: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            remote_service,
            sink,
        }
    }

    /// バッチをアップロードする
    ///
    /// # Arguments
    ///
    /// * `batch` - アップロードするバッチ
    /// * `credentials` - ログイン情報
    ///
    /// # Returns
    ///
    /// バッチと同じ順序のジョブごとの結果
    ///
    /// # Errors
    ///
    /// バッチが空の場合、ログインに失敗した場合にエラーを返す。
    /// いずれの場合もジョブは1件も処理されない。
    pub async fn execute(
        &self,
        batch: &BatchResult,
        credentials: &Credentials,
    ) -> Result<Vec<JobStatus>, UploadError> {
        if batch.is_empty() {
            return Err(UploadError::EmptyBatch);
        }

        let session = self
            .remote_service
            .login(credentials)
            .await
            .map_err(|e| UploadError::Authentication(format!("{:#}", e)))?;

        self.sink.emit(Diagnostic::LoginSucceeded {
            username: credentials.username.clone(),
        });

        let mut statuses = Vec::with_capacity(batch.len());
        for job in batch {
            let status = self.process_job(&session, job).await;
            self.sink.emit(Diagnostic::JobFinished {
                status: status.clone(),
            });
            statuses.push(status);
        }

        Ok(statuses)
    }

    async fn process_job(&self, session: &S::Session, job: &UploadJob) -> JobStatus {
        let receipt = match session.upload(job.source_path()).await {
            Ok(receipt) => receipt,
            Err(e) => UploadReceipt::failure(format!("{:#}", e)),
        };

        if !receipt.outcome.is_success() {
            self.sink.emit(Diagnostic::UploadFailed {
                path: job.source_path().to_path_buf(),
                detail: receipt.remote_id.clone(),
            });
            return JobStatus::failed_upload(job.source_path().to_path_buf(), receipt.remote_id);
        }

        let name_outcome = match job.display_name() {
            Some(name) => {
                let result = session.set_name(&receipt.remote_id, name).await;
                self.annotation_outcome(job, &receipt.remote_id, AnnotationField::Name, name, result)
            }
            None => AnnotationOutcome::NotAttempted,
        };

        let type_outcome = match job.activity_type() {
            Some(activity_type) => {
                let result = session.set_type(&receipt.remote_id, activity_type).await;
                self.annotation_outcome(
                    job,
                    &receipt.remote_id,
                    AnnotationField::Type,
                    activity_type,
                    result,
                )
            }
            None => AnnotationOutcome::NotAttempted,
        };

        JobStatus {
            source_path: job.source_path().to_path_buf(),
            remote_id: receipt.remote_id,
            upload_outcome: UploadOutcome::Success,
            name_outcome,
            type_outcome,
        }
    }

    fn annotation_outcome(
        &self,
        job: &UploadJob,
        remote_id: &str,
        field: AnnotationField,
        value: &str,
        result: anyhow::Result<bool>,
    ) -> AnnotationOutcome {
        let detail = match result {
            Ok(true) => return AnnotationOutcome::Applied(value.to_string()),
            Ok(false) => None,
            Err(e) => Some(format!("{:#}", e)),
        };

        self.sink.emit(Diagnostic::AnnotationFailed {
            path: job.source_path().to_path_buf(),
            remote_id: remote_id.to_string(),
            field,
            detail,
        });
        AnnotationOutcome::Failed
    }
}
