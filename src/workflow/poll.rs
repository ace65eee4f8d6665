//! Pre-translation status polling.

use locsync_core::{
    config::PollingConfig,
    error::LocsyncError,
    job::{JobStatus, PreTranslationJob},
    traits::TranslationService,
};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{error, info, warn};

/// How often and how long to wait for a job.
///
/// The default polls every two seconds with no limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub max_attempts: Option<u32>,
    pub timeout: Option<Duration>,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
            max_attempts: None,
            timeout: None,
        }
    }
}

impl From<&PollingConfig> for PollPolicy {
    fn from(cfg: &PollingConfig) -> Self {
        Self {
            interval: cfg.interval(),
            max_attempts: cfg.max_attempts,
            timeout: cfg.timeout(),
        }
    }
}

/// How polling ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// The job reported `finished`.
    Finished { job: PreTranslationJob, attempts: u32 },
    /// The job reported a status outside created/in_progress/finished.
    Failed { job: PreTranslationJob, attempts: u32 },
    /// A configured limit ran out while the job was still running.
    ///
    /// `last` is the most recent snapshot, if any status call returned.
    TimedOut {
        last: Option<PreTranslationJob>,
        attempts: u32,
    },
}

/// Query the job until it reaches a terminal status.
///
/// The first query happens immediately; the interval is only slept between
/// non-terminal observations. With a timeout, a status call still pending at
/// the deadline is abandoned. Without limits this never gives up.
pub async fn wait_for_completion(
    service: &dyn TranslationService,
    project_id: u64,
    job_id: &str,
    policy: &PollPolicy,
) -> Result<PollOutcome, LocsyncError> {
    let deadline = policy.timeout.map(|t| Instant::now() + t);
    let mut attempts: u32 = 0;
    let mut last: Option<PreTranslationJob> = None;

    loop {
        attempts += 1;
        let status = service.pre_translation_status(project_id, job_id);
        let job = match deadline {
            Some(deadline) => match tokio::time::timeout_at(deadline, status).await {
                Ok(result) => result?,
                Err(_) => {
                    warn!(
                        "pre-translation {job_id}: status check {attempts} still pending at deadline"
                    );
                    return Ok(PollOutcome::TimedOut { last, attempts });
                }
            },
            None => status.await?,
        };
        info!(
            "pre-translation {job_id}: {} ({}%)",
            job.status, job.progress
        );

        if job.status == JobStatus::Finished {
            info!("pre-translation {job_id} finished");
            return Ok(PollOutcome::Finished { job, attempts });
        }
        if job.status.is_terminal() {
            error!("pre-translation {job_id} failed with status '{}'", job.status);
            return Ok(PollOutcome::Failed { job, attempts });
        }

        let out_of_attempts = policy.max_attempts.is_some_and(|max| attempts >= max);
        let out_of_time = deadline.is_some_and(|d| Instant::now() >= d);
        if out_of_attempts || out_of_time {
            warn!("pre-translation {job_id}: giving up after {attempts} status checks");
            return Ok(PollOutcome::TimedOut {
                last: Some(job),
                attempts,
            });
        }
        last = Some(job);

        tokio::time::sleep(policy.interval).await;
    }
}
