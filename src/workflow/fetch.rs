//! Per-locale build, download, and write.

use locsync_core::{
    config::LocalizationProject,
    error::LocsyncError,
    job::{BuildRequest, ExportPolicy},
    locale::{output_path, LocaleMapping},
    traits::TranslationService,
};
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// A locale whose file was downloaded but could not be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteFailure {
    pub locale: String,
    pub path: PathBuf,
    pub error: String,
}

/// What a run produced on disk.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SyncReport {
    pub written: Vec<PathBuf>,
    pub failed: Vec<WriteFailure>,
}

impl SyncReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Build and download every locale in mapping order, one at a time.
///
/// Build and download errors abort the run. Write errors are logged and
/// recorded, and the remaining locales still run.
pub(super) async fn download_all(
    service: &dyn TranslationService,
    project: &LocalizationProject,
    locales: &LocaleMapping,
) -> Result<SyncReport, LocsyncError> {
    let mut report = SyncReport::default();

    for (remote, local) in locales.iter() {
        let request = BuildRequest {
            target_language_id: remote.to_string(),
            policy: ExportPolicy::default(),
        };
        info!("building {remote}");
        let artifact = service
            .build_file_translation(project.project_id, project.file_id, &request)
            .await?;
        let content = service.fetch(&artifact).await?;

        let path = output_path(&project.translations_dir, local, &project.source_file);
        info!("writing: {}", path.display());

        match persist(&path, &content).await {
            Ok(()) => report.written.push(path),
            Err(e) => {
                error!("failed to write {}: {e}", path.display());
                report.failed.push(WriteFailure {
                    locale: local.to_string(),
                    path,
                    error: e.to_string(),
                });
            }
        }
    }

    Ok(report)
}

/// Write `content` verbatim, replacing any existing file.
pub async fn persist(path: &Path, content: &str) -> Result<(), LocsyncError> {
    tokio::fs::write(path, content).await?;
    Ok(())
}
