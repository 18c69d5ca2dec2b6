//! Connect Remote Service
//!
//! HTTP implementation of RemoteService / RemoteSession

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::path::Path;

use super::models::{interpret_upload_response, name_applied, type_applied};
use crate::domain::entities::classified_path::ActivityFormat;
use crate::domain::entities::credentials::Credentials;
use crate::domain::repositories::remote_service::{RemoteService, RemoteSession, UploadReceipt};

pub const DEFAULT_ENDPOINT: &str = "https://connect.garmin.com";

const SIGNIN_PATH: &str = "/signin";
const UPLOAD_PATH: &str = "/proxy/upload-service-1.1/json/upload/";
const NAME_PATH: &str = "/proxy/activity-service-1.0/json/name/";
const TYPE_PATH: &str = "/proxy/activity-service-1.2/json/type/";

/// Remote service speaking the Connect HTTP API
pub struct ConnectService {
    endpoint: String,
}

impl ConnectService {
    pub fn new(endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into();
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Default for ConnectService {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[async_trait]
impl RemoteService for ConnectService {
    type Session = ConnectSession;

    async fn login(&self, credentials: &Credentials) -> Result<ConnectSession> {
        // The cookie store carries the authenticated session to every later call
        let client = Client::builder()
            .cookie_store(true)
            .build()
            .context("Failed to create HTTP client")?;

        let response = client
            .post(format!("{}{}", self.endpoint, SIGNIN_PATH))
            .form(&[
                ("username", credentials.username.as_str()),
                ("password", credentials.password.as_str()),
                ("embed", "true"),
            ])
            .send()
            .await
            .context("Failed to reach sign-in service")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("sign-in rejected with HTTP {}", status);
        }

        debug!("Signed in to {} as {}", self.endpoint, credentials.username);

        Ok(ConnectSession {
            client,
            endpoint: self.endpoint.clone(),
        })
    }
}

/// Authenticated session created by `ConnectService::login`
pub struct ConnectSession {
    client: Client,
    endpoint: String,
}

impl ConnectSession {
    /// Upload URL for a given activity format (the service keys parsing off the suffix)
    pub fn upload_url(endpoint: &str, format: ActivityFormat) -> String {
        format!("{}{}{}", endpoint, UPLOAD_PATH, format)
    }

    async fn post_value(&self, url: String, value: &str) -> Result<String> {
        self.client
            .post(url)
            .form(&[("value", value)])
            .send()
            .await
            .context("Activity update request failed")?
            .error_for_status()
            .context("Activity update rejected")?
            .text()
            .await
            .context("Failed to read activity update response")
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[async_trait]
impl RemoteSession for ConnectSession {
    async fn upload(&self, path: &Path) -> Result<UploadReceipt> {
        let format = ActivityFormat::from_path(path)
            .with_context(|| format!("Unsupported activity file: {}", path.display()))?;

        let data = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read activity file: {}", path.display()))?;

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| format!("upload{}", format));
        let form = Form::new().part("data", Part::bytes(data).file_name(file_name));

        let response = self
            .client
            .post(Self::upload_url(&self.endpoint, format))
            .multipart(form)
            .send()
            .await
            .context("Upload request failed")?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read upload response")?;

        debug!("Upload of {} returned HTTP {}", path.display(), status);

        if body.trim().is_empty() {
            return Ok(UploadReceipt::failure(format!("HTTP {}", status)));
        }

        Ok(interpret_upload_response(&body))
    }

    async fn set_name(&self, remote_id: &str, name: &str) -> Result<bool> {
        let body = self
            .post_value(format!("{}{}{}", self.endpoint, NAME_PATH, remote_id), name)
            .await?;
        Ok(name_applied(&body, name))
    }

    async fn set_type(&self, remote_id: &str, activity_type: &str) -> Result<bool> {
        let body = self
            .post_value(
                format!("{}{}{}", self.endpoint, TYPE_PATH, remote_id),
                activity_type,
            )
            .await?;
        Ok(type_applied(&body, activity_type))
    }
}
