//! HTTP client and `TranslationService` implementation.

use crate::types::{
    ApplyPreTranslationBody, BuildFileBody, CrowdinResponse, FileDownload, PreTranslation,
    Storage, UpdateOrRestoreFileBody,
};
use async_trait::async_trait;
use locsync_core::{
    config::CrowdinConfig,
    error::LocsyncError,
    job::{BuildArtifact, BuildRequest, PreTranslationJob, PreTranslationRequest, UploadHandle},
    traits::TranslationService,
};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Public Crowdin API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.crowdin.com/api/v2";

/// Upper bound for a single HTTP request unless configured otherwise.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// API base for an optional Crowdin Enterprise organization.
pub fn base_url_for(organization: Option<&str>) -> String {
    match organization.map(str::trim).filter(|o| !o.is_empty()) {
        Some(org) => format!("https://{org}.api.crowdin.com/api/v2"),
        None => DEFAULT_BASE_URL.to_string(),
    }
}

/// Crowdin API v2 client authenticated with a personal access token.
pub struct CrowdinClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
    request_timeout: Duration,
}

impl CrowdinClient {
    /// Create a client against an explicit API base URL.
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Limit how long any single request may take.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Create from config values; `base_url` wins over `organization`.
    pub fn from_config(config: &CrowdinConfig, token: String) -> Self {
        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| base_url_for(config.organization.as_deref()));
        Self::new(base_url, token).with_request_timeout(config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Send an authenticated request and unwrap the `data` envelope.
    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        what: &str,
    ) -> Result<T, LocsyncError> {
        let resp = request
            .bearer_auth(&self.token)
            .timeout(self.request_timeout)
            .send()
            .await
            .map_err(|e| LocsyncError::Remote(format!("crowdin {what} request failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(LocsyncError::Remote(format!(
                "crowdin {what} returned {status}: {text}"
            )));
        }

        let parsed: CrowdinResponse<T> = resp.json().await.map_err(|e| {
            LocsyncError::Remote(format!("crowdin {what}: failed to parse response: {e}"))
        })?;
        Ok(parsed.data)
    }
}

#[async_trait]
impl TranslationService for CrowdinClient {
    fn name(&self) -> &str {
        "crowdin"
    }

    async fn add_storage(
        &self,
        filename: &str,
        content: String,
    ) -> Result<UploadHandle, LocsyncError> {
        let url = self.url("/storages");
        debug!("crowdin: POST {url} ({} bytes)", content.len());

        let request = self
            .client
            .post(&url)
            .header(
                "Crowdin-API-FileName",
                urlencoding::encode(filename).into_owned(),
            )
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(content);
        let storage: Storage = self.send(request, "add storage").await?;
        Ok(UploadHandle::new(storage.id))
    }

    async fn update_or_restore_file(
        &self,
        project_id: u64,
        file_id: u64,
        handle: UploadHandle,
    ) -> Result<(), LocsyncError> {
        let url = self.url(&format!("/projects/{project_id}/files/{file_id}"));
        debug!("crowdin: PUT {url} storage={}", handle.id());

        let body = UpdateOrRestoreFileBody {
            storage_id: handle.id(),
        };
        let _file: serde_json::Value = self
            .send(self.client.put(&url).json(&body), "update file")
            .await?;
        Ok(())
    }

    async fn apply_pre_translation(
        &self,
        project_id: u64,
        request: &PreTranslationRequest,
    ) -> Result<PreTranslationJob, LocsyncError> {
        let url = self.url(&format!("/projects/{project_id}/pre-translations"));
        debug!("crowdin: POST {url} languages={:?}", request.language_ids);

        let body = ApplyPreTranslationBody::from(request);
        let job: PreTranslation = self
            .send(self.client.post(&url).json(&body), "apply pre-translation")
            .await?;
        Ok(job.into())
    }

    async fn pre_translation_status(
        &self,
        project_id: u64,
        job_id: &str,
    ) -> Result<PreTranslationJob, LocsyncError> {
        let url = self.url(&format!(
            "/projects/{project_id}/pre-translations/{}",
            urlencoding::encode(job_id)
        ));
        let job: PreTranslation = self
            .send(self.client.get(&url), "pre-translation status")
            .await?;
        Ok(job.into())
    }

    async fn build_file_translation(
        &self,
        project_id: u64,
        file_id: u64,
        request: &BuildRequest,
    ) -> Result<BuildArtifact, LocsyncError> {
        let url = self.url(&format!(
            "/projects/{project_id}/translations/builds/files/{file_id}"
        ));
        debug!("crowdin: POST {url} target={}", request.target_language_id);

        let body = BuildFileBody::from(request);
        let download: FileDownload = self
            .send(self.client.post(&url).json(&body), "build file")
            .await?;
        Ok(BuildArtifact { url: download.url })
    }

    async fn fetch(&self, artifact: &BuildArtifact) -> Result<String, LocsyncError> {
        // Download links are pre-signed; no bearer token.
        let resp = self
            .client
            .get(&artifact.url)
            .timeout(self.request_timeout)
            .send()
            .await
            .map_err(|e| LocsyncError::Remote(format!("download failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            return Err(LocsyncError::Remote(format!(
                "download of {} returned {status}",
                artifact.url
            )));
        }

        resp.text()
            .await
            .map_err(|e| LocsyncError::Remote(format!("download body unreadable: {e}")))
    }
}
