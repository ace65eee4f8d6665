//! Upload → register → pre-translate → poll → build/fetch → write.

mod fetch;
mod poll;


pub use fetch::SyncReport;
pub use poll::PollPolicy;

use poll::{wait_for_completion, PollOutcome};

use locsync_core::{
    config::{Config, LocalizationProject},
    error::LocsyncError,
    job::{PreTranslationPolicy, PreTranslationRequest, TranslationMethod},
    locale::LocaleMapping,
    traits::TranslationService,
};
use tracing::info;

/// One pre-translation run against a translation service.
pub struct Workflow<'a> {
    service: &'a dyn TranslationService,
    project: LocalizationProject,
    locales: LocaleMapping,
    method: TranslationMethod,
    polling: PollPolicy,
}

impl<'a> Workflow<'a> {
    pub fn new(
        service: &'a dyn TranslationService,
        project: LocalizationProject,
        locales: LocaleMapping,
        method: TranslationMethod,
        polling: PollPolicy,
    ) -> Self {
        Self {
            service,
            project,
            locales,
            method,
            polling,
        }
    }

    /// Build a workflow from loaded configuration.
    pub fn from_config(service: &'a dyn TranslationService, cfg: &Config) -> Self {
        Self::new(
            service,
            cfg.project(),
            cfg.locales.clone(),
            cfg.crowdin.method.clone(),
            PollPolicy::from(&cfg.polling),
        )
    }

    /// Run the whole pipeline.
    ///
    /// Any terminal status other than `finished` stops the run before a
    /// single build is requested.
    pub async fn run(&self) -> Result<SyncReport, LocsyncError> {
        self.locales.validate()?;
        let project = &self.project;

        let content = tokio::fs::read_to_string(&project.source_file)
            .await
            .map_err(|e| {
                LocsyncError::Config(format!(
                    "failed to read source file {}: {e}",
                    project.source_file.display()
                ))
            })?;

        info!(
            "uploading {} to {}",
            project.source_file.display(),
            self.service.name()
        );
        let handle = self
            .service
            .add_storage(&project.storage_filename, content)
            .await?;
        self.service
            .update_or_restore_file(project.project_id, project.file_id, handle)
            .await?;
        info!(
            "source file {} updated in project {}",
            project.file_id, project.project_id
        );

        let request = PreTranslationRequest {
            language_ids: self.locales.remote_ids(),
            file_ids: vec![project.file_id],
            method: self.method.clone(),
            policy: PreTranslationPolicy::default(),
        };
        let job = self
            .service
            .apply_pre_translation(project.project_id, &request)
            .await?;
        info!(
            "pre-translation {} started via {} for {:?}",
            job.identifier, self.method, request.language_ids
        );

        match wait_for_completion(self.service, project.project_id, &job.identifier, &self.polling)
            .await?
        {
            PollOutcome::Finished { job, attempts } => {
                info!(
                    "pre-translation {} done after {attempts} status checks",
                    job.identifier
                );
            }
            PollOutcome::Failed { job, attempts } => {
                info!("skipping downloads after {attempts} status checks");
                return Err(LocsyncError::PreTranslation {
                    id: job.identifier,
                    status: job.status.to_string(),
                });
            }
            PollOutcome::TimedOut { last, attempts } => {
                return Err(LocsyncError::PollTimeout {
                    id: job.identifier,
                    status: last
                        .map_or_else(|| "no response".to_string(), |j| j.status.to_string()),
                    attempts,
                });
            }
        }

        let report = fetch::download_all(self.service, project, &self.locales).await?;
        info!(
            "{} of {} locale files written",
            report.written.len(),
            self.locales.len()
        );
        Ok(report)
    }
}
