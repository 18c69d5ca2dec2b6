//! Dry-Run Remote Service
//!
//! Accepts every call without touching the network

use anyhow::Result;
use async_trait::async_trait;
use log::info;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::entities::credentials::Credentials;
use crate::domain::repositories::remote_service::{RemoteService, RemoteSession, UploadReceipt};

/// Remote service used by `--dry-run`
#[derive(Debug, Default)]
pub struct DryRunService;

#[async_trait]
impl RemoteService for DryRunService {
    type Session = DryRunSession;

    async fn login(&self, credentials: &Credentials) -> Result<DryRunSession> {
        info!("[dry-run] would sign in as {}", credentials.username);
        Ok(DryRunSession::default())
    }
}

/// Session handing out sequential ids (`dry-run-1`, `dry-run-2`, ...)
#[derive(Debug, Default)]
pub struct DryRunSession {
    uploads: AtomicUsize,
}

#[async_trait]
impl RemoteSession for DryRunSession {
    async fn upload(&self, path: &Path) -> Result<UploadReceipt> {
        let id = self.uploads.fetch_add(1, Ordering::SeqCst) + 1;
        info!("[dry-run] would upload {}", path.display());
        Ok(UploadReceipt::success(format!("dry-run-{}", id)))
    }

    async fn set_name(&self, remote_id: &str, name: &str) -> Result<bool> {
        info!("[dry-run] would name {} as {:?}", remote_id, name);
        Ok(true)
    }

    async fn set_type(&self, remote_id: &str, activity_type: &str) -> Result<bool> {
        info!("[dry-run] would set {} type to {:?}", remote_id, activity_type);
        Ok(true)
    }
}
