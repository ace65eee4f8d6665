//! # locsync-audit
//!
//! Checks that every key of the base locale file exists in each compiled
//! locale file. Only flat (single-level) JSON objects are compared; extra
//! keys in a locale are fine.

use locsync_core::error::LocsyncError;
use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Result for one compiled locale file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleAudit {
    /// File stem, e.g. `de-DE`.
    pub locale: String,
    pub path: PathBuf,
    /// Base keys absent from this locale, in base file order.
    pub missing: Vec<String>,
}

impl LocaleAudit {
    pub fn passed(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Outcome of auditing a whole directory.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuditReport {
    pub locales: Vec<LocaleAudit>,
}

impl AuditReport {
    /// True when no locale misses any key.
    pub fn passed(&self) -> bool {
        self.locales.iter().all(LocaleAudit::passed)
    }

    /// Total number of missing keys across locales.
    pub fn missing_count(&self) -> usize {
        self.locales.iter().map(|l| l.missing.len()).sum()
    }

    /// One line per missing key, then one line per passing locale.
    pub fn lines(&self) -> Vec<String> {
        let mut out = Vec::new();
        for l in &self.locales {
            for key in &l.missing {
                out.push(format!("\"{key}\" missing from locale: {}", l.locale));
            }
        }
        for l in self.locales.iter().filter(|l| l.passed()) {
            out.push(format!("{}: all keys present", l.locale));
        }
        out
    }
}

/// Top-level keys of a flat JSON object, in document order.
pub fn read_keys(path: &Path) -> Result<Vec<String>, LocsyncError> {
    let content = fs::read_to_string(path)
        .map_err(|e| LocsyncError::Audit(format!("failed to read {}: {e}", path.display())))?;
    keys_of(&content)
        .map_err(|e| LocsyncError::Audit(format!("{}: {e}", path.display())))
}

fn keys_of(content: &str) -> Result<Vec<String>, String> {
    match serde_json::from_str::<Value>(content) {
        Ok(Value::Object(map)) => Ok(map.keys().cloned().collect()),
        Ok(_) => Err("expected a JSON object".to_string()),
        Err(e) => Err(format!("invalid JSON: {e}")),
    }
}

/// Keys of `base` that `locale` lacks, in `base` order.
pub fn missing_keys(base: &[String], locale: &[String]) -> Vec<String> {
    let present: HashSet<&str> = locale.iter().map(String::as_str).collect();
    base.iter()
        .filter(|k| !present.contains(k.as_str()))
        .cloned()
        .collect()
}

/// Audit every regular file in `compiled_dir` against `base_file`.
///
/// Files are visited in name order. The base file is skipped when it lives
/// in the same directory. All locales are checked before returning; a
/// mismatch is reported, not raised.
pub fn audit(base_file: &Path, compiled_dir: &Path) -> Result<AuditReport, LocsyncError> {
    let base_keys = read_keys(base_file)?;
    debug!(
        "audit: base {} has {} keys",
        base_file.display(),
        base_keys.len()
    );

    let base_canonical = fs::canonicalize(base_file).ok();
    let mut files = Vec::new();
    let entries = fs::read_dir(compiled_dir).map_err(|e| {
        LocsyncError::Audit(format!(
            "failed to list {}: {e}",
            compiled_dir.display()
        ))
    })?;
    for entry in entries {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        if base_canonical.is_some() && fs::canonicalize(&path).ok() == base_canonical {
            continue;
        }
        files.push(path);
    }
    files.sort();

    let mut report = AuditReport::default();
    for path in files {
        let locale = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let keys = read_keys(&path)?;
        let missing = missing_keys(&base_keys, &keys);
        if missing.is_empty() {
            info!("audit: {locale} ok ({} keys)", keys.len());
        } else {
            warn!("audit: {locale} is missing {} keys", missing.len());
        }
        report.locales.push(LocaleAudit {
            locale,
            path,
            missing,
        });
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let p = dir.join(name);
        fs::write(&p, content).unwrap();
        p
    }

    #[test]
    fn test_missing_keys_keeps_base_order() {
        let base = vec!["c".to_string(), "a".to_string(), "b".to_string()];
        let locale = vec!["a".to_string()];
        assert_eq!(missing_keys(&base, &locale), vec!["c", "b"]);
    }

    #[test]
    fn test_missing_keys_large_catalog() {
        let base: Vec<String> = (0..20_000).map(|i| format!("key.{i}")).collect();
        let locale: Vec<String> = base.iter().rev().step_by(2).cloned().collect();

        let missing = missing_keys(&base, &locale);

        assert_eq!(missing.len(), 10_000);
        assert_eq!(missing.first().map(String::as_str), Some("key.0"));
        assert!(missing.windows(2).all(|w| {
            let n = |k: &str| k.trim_start_matches("key.").parse::<u32>().unwrap();
            n(&w[0]) < n(&w[1])
        }));
    }

    #[test]
    fn test_read_keys_document_order() {
        let tmp = tempfile::tempdir().unwrap();
        let p = write(tmp.path(), "en.json", r#"{"zeta": "z", "alpha": "a"}"#);
        assert_eq!(read_keys(&p).unwrap(), vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_read_keys_rejects_non_object() {
        let tmp = tempfile::tempdir().unwrap();
        let p = write(tmp.path(), "en.json", "[1, 2]");
        assert!(matches!(read_keys(&p), Err(LocsyncError::Audit(_))));
        let p = write(tmp.path(), "bad.json", "{");
        assert!(read_keys(&p).is_err());
    }

    #[test]
    fn test_audit_reports_missing_key() {
        let tmp = tempfile::tempdir().unwrap();
        let base = write(tmp.path(), "en-GB.json", r#"{"a": 1, "b": 2}"#);
        let dir = tmp.path().join("lang");
        fs::create_dir(&dir).unwrap();
        write(&dir, "de-DE.json", r#"{"a": 1}"#);

        let report = audit(&base, &dir).unwrap();
        assert!(!report.passed());
        assert_eq!(report.missing_count(), 1);
        assert_eq!(report.locales[0].locale, "de-DE");
        assert_eq!(
            report.lines(),
            vec!["\"b\" missing from locale: de-DE".to_string()]
        );
    }

    #[test]
    fn test_audit_extra_keys_pass() {
        let tmp = tempfile::tempdir().unwrap();
        let base = write(tmp.path(), "en-GB.json", r#"{"a": 1, "b": 2}"#);
        let dir = tmp.path().join("lang");
        fs::create_dir(&dir).unwrap();
        write(&dir, "pt-PT.json", r#"{"a": 1, "b": 2, "c": 3}"#);

        let report = audit(&base, &dir).unwrap();
        assert!(report.passed());
        assert_eq!(report.lines(), vec!["pt-PT: all keys present".to_string()]);
    }

    #[test]
    fn test_audit_checks_every_locale() {
        let tmp = tempfile::tempdir().unwrap();
        let base = write(tmp.path(), "en-GB.json", r#"{"a": 1, "b": 2}"#);
        let dir = tmp.path().join("lang");
        fs::create_dir(&dir).unwrap();
        write(&dir, "pt-PT.json", r#"{"b": 2}"#);
        write(&dir, "de-DE.json", r#"{}"#);
        write(&dir, "fr-FR.json", r#"{"a": 1, "b": 2}"#);

        let report = audit(&base, &dir).unwrap();
        let names: Vec<_> = report.locales.iter().map(|l| l.locale.as_str()).collect();
        assert_eq!(names, vec!["de-DE", "fr-FR", "pt-PT"]);
        assert_eq!(report.missing_count(), 3);
        assert_eq!(
            report.lines(),
            vec![
                "\"a\" missing from locale: de-DE".to_string(),
                "\"b\" missing from locale: de-DE".to_string(),
                "\"a\" missing from locale: pt-PT".to_string(),
                "fr-FR: all keys present".to_string(),
            ]
        );
    }

    #[test]
    fn test_audit_skips_base_in_same_dir_and_subdirs() {
        let tmp = tempfile::tempdir().unwrap();
        let base = write(tmp.path(), "en-GB.json", r#"{"a": 1}"#);
        write(tmp.path(), "de-DE.json", r#"{"a": "x"}"#);
        fs::create_dir(tmp.path().join("nested")).unwrap();

        let report = audit(&base, tmp.path()).unwrap();
        assert_eq!(report.locales.len(), 1);
        assert_eq!(report.locales[0].locale, "de-DE");
        assert!(report.passed());
    }

    #[test]
    fn test_audit_unreadable_locale_is_error() {
        let tmp = tempfile::tempdir().unwrap();
        let base = write(tmp.path(), "en-GB.json", r#"{"a": 1}"#);
        let dir = tmp.path().join("lang");
        fs::create_dir(&dir).unwrap();
        write(&dir, "de-DE.json", "not json");
        assert!(audit(&base, &dir).is_err());
    }

    #[test]
    fn test_audit_missing_dir_is_error() {
        let tmp = tempfile::tempdir().unwrap();
        let base = write(tmp.path(), "en-GB.json", r#"{"a": 1}"#);
        assert!(audit(&base, &tmp.path().join("nope")).is_err());
    }
}
