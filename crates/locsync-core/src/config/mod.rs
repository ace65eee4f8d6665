mod defaults;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::LocsyncError;
use crate::job::TranslationMethod;
use crate::locale::LocaleMapping;
use defaults::*;

/// Top-level locsync configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub locsync: LocsyncConfig,
    pub crowdin: CrowdinConfig,
    pub paths: PathsConfig,
    #[serde(default)]
    pub polling: PollingConfig,
    #[serde(default)]
    pub locales: LocaleMapping,
}

/// General tool settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocsyncConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Also write logs to `{log_dir}/locsync.log` when set.
    #[serde(default)]
    pub log_dir: Option<String>,
}

impl Default for LocsyncConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

/// Crowdin project settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrowdinConfig {
    /// Personal access token. `CROWDIN_TOKEN` takes precedence.
    #[serde(default, skip_serializing)]
    pub token: String,
    /// Enterprise organization; selects `{organization}.api.crowdin.com`.
    #[serde(default)]
    pub organization: Option<String>,
    /// Explicit API base URL, wins over `organization`.
    #[serde(default)]
    pub base_url: Option<String>,
    pub project_id: u64,
    /// Id of the already-uploaded source file in the project.
    pub file_id: u64,
    /// Name given to the uploaded content. Defaults to the source file name.
    #[serde(default)]
    pub storage_filename: Option<String>,
    /// Per-request HTTP timeout.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    pub method: TranslationMethod,
}

impl CrowdinConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Local paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    pub source_file: String,
    pub translations_dir: String,
}

/// Status polling settings. No limits means poll until a terminal status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingConfig {
    #[serde(default = "default_poll_interval_ms")]
    pub interval_ms: u64,
    #[serde(default)]
    pub max_attempts: Option<u32>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_poll_interval_ms(),
            max_attempts: None,
            timeout_secs: None,
        }
    }
}

impl PollingConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// The remote project and the local files one run works on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizationProject {
    pub project_id: u64,
    pub file_id: u64,
    pub source_file: PathBuf,
    pub translations_dir: PathBuf,
    pub storage_filename: String,
}

impl Config {
    /// Resolve the project description, expanding `~/` in paths.
    pub fn project(&self) -> LocalizationProject {
        let source_file = PathBuf::from(shellexpand(&self.paths.source_file));
        let storage_filename = self.crowdin.storage_filename.clone().unwrap_or_else(|| {
            source_file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| self.paths.source_file.clone())
        });
        LocalizationProject {
            project_id: self.crowdin.project_id,
            file_id: self.crowdin.file_id,
            source_file,
            translations_dir: PathBuf::from(shellexpand(&self.paths.translations_dir)),
            storage_filename,
        }
    }

    /// API token from `CROWDIN_TOKEN`, else from the config file.
    pub fn token(&self) -> Result<String, LocsyncError> {
        resolve_token(std::env::var(TOKEN_ENV).ok(), &self.crowdin.token)
    }
}

/// Pick the environment token over the configured one; neither is fatal.
pub fn resolve_token(env: Option<String>, configured: &str) -> Result<String, LocsyncError> {
    env.filter(|t| !t.trim().is_empty())
        .or_else(|| Some(configured.to_string()).filter(|t| !t.trim().is_empty()))
        .ok_or_else(|| LocsyncError::Config(format!("{TOKEN_ENV} not set")))
}

/// Expand `~` to home directory.
pub fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return format!("{}/{rest}", home.to_string_lossy());
        }
    }
    path.to_string()
}

/// Load configuration from a TOML file.
///
/// Unlike most settings, project and file ids have no sensible default, so
/// a missing file is an error.
pub fn load(path: &str) -> Result<Config, LocsyncError> {
    let path = Path::new(path);
    let content = std::fs::read_to_string(path)
        .map_err(|e| LocsyncError::Config(format!("failed to read {}: {}", path.display(), e)))?;

    parse(&content)
}

/// Parse and validate configuration text.
pub fn parse(content: &str) -> Result<Config, LocsyncError> {
    let config: Config = toml::from_str(content)
        .map_err(|e| LocsyncError::Config(format!("failed to parse config: {}", e)))?;

    config.locales.validate()?;
    if config.crowdin.request_timeout_secs == 0 {
        return Err(LocsyncError::Config(
            "crowdin.request_timeout_secs must be greater than zero".into(),
        ));
    }
    if config.polling.interval_ms == 0 {
        return Err(LocsyncError::Config(
            "polling.interval_ms must be greater than zero".into(),
        ));
    }
    Ok(config)
}
