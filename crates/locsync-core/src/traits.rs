use crate::{
    error::LocsyncError,
    job::{
        BuildArtifact, BuildRequest, PreTranslationJob, PreTranslationRequest, UploadHandle,
    },
};
use async_trait::async_trait;

/// Remote translation platform.
///
/// The workflow only talks to the service through this trait, so a run can
/// be driven against Crowdin or against a scripted fake in tests.
#[async_trait]
pub trait TranslationService: Send + Sync {
    /// Human-readable service name.
    fn name(&self) -> &str;

    /// Store raw content and return a handle to it.
    async fn add_storage(
        &self,
        filename: &str,
        content: String,
    ) -> Result<UploadHandle, LocsyncError>;

    /// Replace (or restore) a tracked source file from stored content.
    async fn update_or_restore_file(
        &self,
        project_id: u64,
        file_id: u64,
        handle: UploadHandle,
    ) -> Result<(), LocsyncError>;

    /// Start a pre-translation job.
    async fn apply_pre_translation(
        &self,
        project_id: u64,
        request: &PreTranslationRequest,
    ) -> Result<PreTranslationJob, LocsyncError>;

    /// Current state of a pre-translation job.
    async fn pre_translation_status(
        &self,
        project_id: u64,
        job_id: &str,
    ) -> Result<PreTranslationJob, LocsyncError>;

    /// Build one file for one target language.
    async fn build_file_translation(
        &self,
        project_id: u64,
        file_id: u64,
        request: &BuildRequest,
    ) -> Result<BuildArtifact, LocsyncError>;

    /// Download a built file as text.
    async fn fetch(&self, artifact: &BuildArtifact) -> Result<String, LocsyncError>;
}
