//! Workflow Orchestration
//!
//! ワークフローのオーケストレーション

use anyhow::{Context, Result};
use log::{debug, info};

use std::sync::Arc;

use crate::adapter::config::LayeredCredentialSource;
use crate::adapter::connect::client::ConnectService;
use crate::adapter::connect::dry_run::DryRunService;
use crate::adapter::logging::LogDiagnosticSink;
use crate::adapter::repositories::fs_path_repository::FsPathRepository;
use crate::application::dto::resolve_request::ResolveRequest;
use crate::application::use_cases::resolve_batch::ResolveBatchUseCase;
use crate::application::use_cases::upload_workouts::{UploadSummary, UploadWorkoutsUseCase};
use crate::domain::entities::job_status::JobStatus;
use crate::domain::repositories::credential_repository::CredentialSource;
use crate::domain::repositories::path_repository::PathRepository;
use crate::domain::repositories::remote_service::RemoteService;
use crate::domain::services::deduplication::DeduplicationService;
use crate::domain::services::diagnostics::{Diagnostic, DiagnosticSink};

use super::cli::Args;

/// Render the per-job report
///
/// Text mode prints one line per job followed by a summary line;
/// JSON mode prints an array of job statuses.
pub fn render_report(statuses: &[JobStatus], json: bool) -> Result<String> {
    if json {
        return serde_json::to_string_pretty(statuses).context("Failed to serialize report");
    }

    let summary = UploadSummary::from_statuses(statuses);
    let mut lines: Vec<String> = statuses.iter().map(ToString::to_string).collect();
    lines.push(format!(
        "{} uploaded, {} failed",
        summary.uploaded_count, summary.failed_count
    ));
    Ok(lines.join("\n"))
}

/// Workout Upload Workflow
pub struct UploadWorkflow<P: PathRepository> {
    resolve_use_case: ResolveBatchUseCase<P>,
    sink: Arc<dyn DiagnosticSink>,
}

impl UploadWorkflow<FsPathRepository> {
    /// Create a workflow backed by the local filesystem and the `log` facade
    pub fn new() -> Self {
        Self::with_repository(
            Arc::new(FsPathRepository::new()),
            Arc::new(LogDiagnosticSink::new()),
        )
    }
}

impl Default for UploadWorkflow<FsPathRepository> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: PathRepository> UploadWorkflow<P> {
    /// Create a new workflow instance with dependency injection
    pub fn with_repository(path_repository: Arc<P>, sink: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            resolve_use_case: ResolveBatchUseCase::new(path_repository, sink.clone()),
            sink,
        }
    }

    /// Execute the upload workflow and print the report
    #[cfg_attr(coverage_nightly, coverage(off))]
    pub async fn execute(&self, args: Args) -> Result<()> {
        info!("Starting workout uploader...");
        info!("Dry run: {}", args.dry_run);

        let credential_source =
            LayeredCredentialSource::new(args.username.clone(), args.password.clone());
        let request = ResolveRequest::new(
            args.paths.clone(),
            args.name.clone(),
            args.activity_type.clone(),
        );

        let statuses = if args.dry_run {
            self.run_with(
                Arc::new(DryRunService),
                &credential_source,
                &request,
                args.dedupe,
            )
            .await?
        } else {
            self.run_with(
                Arc::new(ConnectService::new(args.endpoint.clone())),
                &credential_source,
                &request,
                args.dedupe,
            )
            .await?
        };

        println!("{}", render_report(&statuses, args.json)?);

        Ok(())
    }

    /// Run credentials lookup, resolution and upload against a given remote service
    ///
    /// # Errors
    ///
    /// Fails when no credentials are available, when nothing valid remains after
    /// resolution, or when login is rejected. Per-job failures are reported in
    /// the returned statuses instead.
    pub async fn run_with<S: RemoteService>(
        &self,
        remote_service: Arc<S>,
        credential_source: &dyn CredentialSource,
        request: &ResolveRequest,
        dedupe: bool,
    ) -> Result<Vec<JobStatus>> {
        let credentials = credential_source.credentials()?;
        debug!(
            "Username: {}, Password: {}",
            credentials.username,
            credentials.obscured_password()
        );

        let batch = self.resolve_use_case.execute(request)?;

        let before = batch.len();
        let batch = DeduplicationService::filter_duplicates(batch, dedupe);
        if batch.len() < before {
            self.sink.emit(Diagnostic::DuplicatesRemoved {
                removed: before - batch.len(),
            });
        }
        debug!(
            "Uploading: {:?}",
            DeduplicationService::extract_paths(&batch)
        );

        let upload_use_case = UploadWorkoutsUseCase::new(remote_service, self.sink.clone());
        let statuses = upload_use_case.execute(&batch, &credentials).await?;

        Ok(statuses)
    }
}
