//! Values exchanged with the remote translation service during one run.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque reference to content previously uploaded to the service.
///
/// Not `Clone`: registering the source file consumes it.
#[derive(Debug, PartialEq, Eq)]
pub struct UploadHandle(u64);

impl UploadHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Which remote pipeline fills the untranslated strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TranslationMethod {
    /// A machine translation engine configured on the account.
    MachineTranslation { engine_id: u64 },
    /// An AI prompt configured on the account.
    Ai { prompt_id: u64 },
}

impl fmt::Display for TranslationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MachineTranslation { engine_id } => write!(f, "mt (engine {engine_id})"),
            Self::Ai { prompt_id } => write!(f, "ai (prompt {prompt_id})"),
        }
    }
}

/// Approval and coverage flags sent with every pre-translation request.
///
/// The defaults favour coverage over existing approvals: nothing is
/// auto-approved and only untranslated strings are touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreTranslationPolicy {
    pub auto_approve: bool,
    pub duplicate_translations: bool,
    pub skip_approved_translations: bool,
    pub translate_untranslated_only: bool,
    pub translate_with_perfect_match_only: bool,
}

impl Default for PreTranslationPolicy {
    fn default() -> Self {
        Self {
            auto_approve: false,
            duplicate_translations: false,
            skip_approved_translations: false,
            translate_untranslated_only: true,
            translate_with_perfect_match_only: false,
        }
    }
}

/// Everything needed to start a pre-translation job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreTranslationRequest {
    pub language_ids: Vec<String>,
    pub file_ids: Vec<u64>,
    pub method: TranslationMethod,
    pub policy: PreTranslationPolicy,
}

/// Job status as reported by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Created,
    InProgress,
    Finished,
    /// Anything else (`failed`, `canceled`, ...). Terminal.
    Other(String),
}

impl JobStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Created => "created",
            Self::InProgress => "in_progress",
            Self::Finished => "finished",
            Self::Other(s) => s,
        }
    }

    /// `finished` and every unknown status end the job.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Finished | Self::Other(_))
    }
}

impl From<&str> for JobStatus {
    fn from(s: &str) -> Self {
        match s {
            "created" => Self::Created,
            "in_progress" => Self::InProgress,
            "finished" => Self::Finished,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of a pre-translation job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreTranslationJob {
    pub identifier: String,
    pub status: JobStatus,
    /// 0-100. Not guaranteed to increase between polls.
    pub progress: u8,
}

/// Export flags for building a translated file.
///
/// All off: plain format, untranslated strings and files included, approval
/// not required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExportPolicy {
    pub export_as_xliff: bool,
    pub skip_untranslated_strings: bool,
    pub skip_untranslated_files: bool,
    pub export_approved_only: bool,
}

/// Request to build one file for one target language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRequest {
    pub target_language_id: String,
    pub policy: ExportPolicy,
}

/// A freshly built translated file, downloadable once from `url`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildArtifact {
    pub url: String,
}
