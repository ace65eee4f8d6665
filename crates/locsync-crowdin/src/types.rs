//! Crowdin API request and response bodies.

use locsync_core::job::{
    BuildRequest, JobStatus, PreTranslationJob, PreTranslationRequest, TranslationMethod,
};
use serde::{Deserialize, Serialize};

/// Every Crowdin response wraps its payload in `data`.
#[derive(Debug, Deserialize)]
pub(crate) struct CrowdinResponse<T> {
    pub data: T,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Storage {
    pub id: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateOrRestoreFileBody {
    pub storage_id: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApplyPreTranslationBody {
    pub language_ids: Vec<String>,
    pub file_ids: Vec<u64>,
    /// `"mt"` or `"ai"`.
    pub method: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_prompt_id: Option<u64>,
    /// `"none"`, `"all"`, `"exceptAutoSubstituted"` or `"perfectMatchOnly"`.
    pub auto_approve_option: &'static str,
    pub duplicate_translations: bool,
    pub skip_approved_translations: bool,
    pub translate_untranslated_only: bool,
    pub translate_with_perfect_match_only: bool,
}

impl From<&PreTranslationRequest> for ApplyPreTranslationBody {
    fn from(req: &PreTranslationRequest) -> Self {
        let (method, engine_id, ai_prompt_id) = match req.method {
            TranslationMethod::MachineTranslation { engine_id } => ("mt", Some(engine_id), None),
            TranslationMethod::Ai { prompt_id } => ("ai", None, Some(prompt_id)),
        };
        Self {
            language_ids: req.language_ids.clone(),
            file_ids: req.file_ids.clone(),
            method,
            engine_id,
            ai_prompt_id,
            auto_approve_option: if req.policy.auto_approve {
                "all"
            } else {
                "none"
            },
            duplicate_translations: req.policy.duplicate_translations,
            skip_approved_translations: req.policy.skip_approved_translations,
            translate_untranslated_only: req.policy.translate_untranslated_only,
            translate_with_perfect_match_only: req.policy.translate_with_perfect_match_only,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct PreTranslation {
    pub identifier: String,
    pub status: String,
    #[serde(default)]
    pub progress: u8,
}

impl From<PreTranslation> for PreTranslationJob {
    fn from(p: PreTranslation) -> Self {
        Self {
            status: JobStatus::from(p.status.as_str()),
            identifier: p.identifier,
            progress: p.progress.min(100),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BuildFileBody {
    pub target_language_id: String,
    pub export_as_xliff: bool,
    pub skip_untranslated_strings: bool,
    pub skip_untranslated_files: bool,
    pub export_approved_only: bool,
}

impl From<&BuildRequest> for BuildFileBody {
    fn from(req: &BuildRequest) -> Self {
        Self {
            target_language_id: req.target_language_id.clone(),
            export_as_xliff: req.policy.export_as_xliff,
            skip_untranslated_strings: req.policy.skip_untranslated_strings,
            skip_untranslated_files: req.policy.skip_untranslated_files,
            export_approved_only: req.policy.export_approved_only,
        }
    }
}

/// Pre-signed download link for a built file.
#[derive(Debug, Deserialize)]
pub(crate) struct FileDownload {
    pub url: String,
}
