mod workflow;

use clap::{Parser, Subcommand};
use locsync_core::config::{self, shellexpand, Config};
use locsync_audit::AuditReport;
use locsync_crowdin::CrowdinClient;
use std::path::PathBuf;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(
    name = "locsync",
    version,
    about = "Push source strings to Crowdin, pre-translate, and pull locale files back"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file.
    #[arg(short, long, default_value = "locsync.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload the source file, pre-translate, and write every locale file.
    Sync,
    /// Check compiled locale files for keys missing from the base file.
    Audit {
        /// Base locale file. Defaults to the configured source file.
        #[arg(long)]
        base: Option<PathBuf>,
        /// Directory of compiled locale files. Defaults to the configured
        /// translations directory.
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// Show the resolved configuration without contacting Crowdin.
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Commands::Sync => {
            let cfg = config::load(&cli.config)?;
            let _guard = init_logging(Some(&cfg));
            info!("loaded config from {}", cli.config);

            // No token, no network calls.
            let token = cfg.token()?;
            let client = CrowdinClient::from_config(&cfg.crowdin, token);
            info!("locsync: using {}", client.base_url());

            let report = workflow::Workflow::from_config(&client, &cfg).run().await?;
            for path in &report.written {
                println!("  wrote {}", path.display());
            }
            for failure in &report.failed {
                println!(
                    "  FAILED {} ({}): {}",
                    failure.locale,
                    failure.path.display(),
                    failure.error
                );
            }
            if !report.is_complete() {
                anyhow::bail!(
                    "{} locale file(s) could not be written",
                    report.failed.len()
                );
            }
        }
        Commands::Audit { base, dir } => {
            let cfg = if base.is_some() && dir.is_some() {
                None
            } else {
                Some(config::load(&cli.config)?)
            };
            let guard = init_logging(cfg.as_ref());
            if cfg.is_some() {
                info!("loaded config from {}", cli.config);
            }

            let base = base.or_else(|| {
                cfg.as_ref()
                    .map(|c| PathBuf::from(shellexpand(&c.paths.source_file)))
            });
            let dir = dir.or_else(|| {
                cfg.as_ref()
                    .map(|c| PathBuf::from(shellexpand(&c.paths.translations_dir)))
            });
            let (Some(base), Some(dir)) = (base, dir) else {
                anyhow::bail!("audit needs --base and --dir, or a config file");
            };

            let report = locsync_audit::audit(&base, &dir)?;
            for line in report.lines() {
                println!("{line}");
            }
            let code = audit_exit_code(&report);
            if code != 0 {
                eprintln!(
                    "{} missing key(s) across {} locale(s)",
                    report.missing_count(),
                    report.locales.iter().filter(|l| !l.passed()).count()
                );
                // Flush the file appender before exiting.
                drop(guard);
                std::process::exit(code);
            }
        }
        Commands::Status => {
            let cfg = config::load(&cli.config)?;
            let project = cfg.project();
            println!("locsync — Status\n");
            println!("Config: {}", cli.config);
            println!(
                "API: {}",
                CrowdinClient::from_config(&cfg.crowdin, String::new()).base_url()
            );
            println!("Project: {} (file {})", project.project_id, project.file_id);
            println!("Method: {}", cfg.crowdin.method);
            println!("Source: {}", project.source_file.display());
            println!("Output: {}", project.translations_dir.display());
            println!(
                "Polling: every {}ms{}",
                cfg.polling.interval_ms,
                match (cfg.polling.max_attempts, cfg.polling.timeout_secs) {
                    (None, None) => String::from(", no limit"),
                    (attempts, secs) => format!(
                        ", max {} checks, timeout {}",
                        attempts.map_or("-".to_string(), |a| a.to_string()),
                        secs.map_or("-".to_string(), |s| format!("{s}s"))
                    ),
                }
            );
            println!();
            for (remote, local) in cfg.locales.iter() {
                println!("  {remote} -> {local}");
            }
            println!();
            println!(
                "  token: {}",
                if cfg.token().is_ok() {
                    "present"
                } else {
                    "missing (set CROWDIN_TOKEN)"
                }
            );
        }
    }

    Ok(())
}

/// Process exit status for an audit: 1 when any locale misses a key.
fn audit_exit_code(report: &AuditReport) -> i32 {
    if report.passed() {
        0
    } else {
        1
    }
}

/// Install the tracing subscriber; the guard must live until exit.
fn init_logging(cfg: Option<&Config>) -> Option<WorkerGuard> {
    let level = cfg.map_or("info", |c| c.locsync.log_level.as_str());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer());

    match cfg.and_then(|c| c.locsync.log_dir.as_deref()) {
        Some(dir) => {
            let appender = tracing_appender::rolling::never(shellexpand(dir), "locsync.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            registry
                .with(fmt::layer().with_writer(writer).with_ansi(false))
                .init();
            Some(guard)
        }
        None => {
            registry.init();
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use locsync_audit::LocaleAudit;

    fn locale(name: &str, missing: &[&str]) -> LocaleAudit {
        LocaleAudit {
            locale: name.to_string(),
            path: PathBuf::from(format!("lang/{name}.json")),
            missing: missing.iter().map(|k| k.to_string()).collect(),
        }
    }

    #[test]
    fn test_audit_exit_code_all_present() {
        let report = AuditReport {
            locales: vec![locale("de-DE", &[]), locale("pt-PT", &[])],
        };
        assert_eq!(audit_exit_code(&report), 0);
    }

    #[test]
    fn test_audit_exit_code_empty_directory() {
        assert_eq!(audit_exit_code(&AuditReport::default()), 0);
    }

    #[test]
    fn test_audit_exit_code_missing_key() {
        let report = AuditReport {
            locales: vec![locale("de-DE", &[]), locale("pt-PT", &["bye"])],
        };
        assert_eq!(audit_exit_code(&report), 1);
    }
}
