use super::*;

const MINIMAL: &str = r#"
    [crowdin]
    project_id = 654680
    file_id = 42

    [crowdin.method]
    kind = "machine_translation"
    engine_id = 443920

    [paths]
    source_file = "src/assets/i18n/en-GB.json"
    translations_dir = "src/assets/i18n/lang"
"#;

#[test]
fn test_minimal_config_defaults() {
    let cfg = parse(MINIMAL).unwrap();
    assert_eq!(cfg.locsync.log_level, "info");
    assert!(cfg.locsync.log_dir.is_none());
    assert_eq!(cfg.polling.interval(), Duration::from_secs(2));
    assert!(cfg.polling.max_attempts.is_none());
    assert!(cfg.polling.timeout().is_none());
    assert_eq!(cfg.crowdin.request_timeout(), Duration::from_secs(60));
    assert_eq!(cfg.locales, LocaleMapping::default());
    assert_eq!(
        cfg.crowdin.method,
        TranslationMethod::MachineTranslation { engine_id: 443920 }
    );
}

#[test]
fn test_project_defaults_storage_filename_to_source_name() {
    let cfg = parse(MINIMAL).unwrap();
    let project = cfg.project();
    assert_eq!(project.project_id, 654680);
    assert_eq!(project.file_id, 42);
    assert_eq!(project.storage_filename, "en-GB.json");
    assert_eq!(
        project.translations_dir,
        PathBuf::from("src/assets/i18n/lang")
    );
}

#[test]
fn test_full_config() {
    let toml_str = r#"
        [locsync]
        log_level = "debug"
        log_dir = "logs"

        [crowdin]
        token = "secret"
        organization = "acme"
        project_id = 1
        file_id = 2
        storage_filename = "source.json"

        [crowdin.method]
        kind = "ai"
        prompt_id = 99

        [paths]
        source_file = "en.json"
        translations_dir = "out"

        [polling]
        interval_ms = 500
        max_attempts = 10
        timeout_secs = 60

        [locales]
        fr = "fr-FR"
        es = "es-ES"
    "#;
    let cfg = parse(toml_str).unwrap();
    assert_eq!(cfg.locsync.log_dir.as_deref(), Some("logs"));
    assert_eq!(cfg.crowdin.organization.as_deref(), Some("acme"));
    assert_eq!(cfg.crowdin.method, TranslationMethod::Ai { prompt_id: 99 });
    assert_eq!(cfg.project().storage_filename, "source.json");
    assert_eq!(cfg.polling.interval(), Duration::from_millis(500));
    assert_eq!(cfg.polling.max_attempts, Some(10));
    assert_eq!(cfg.polling.timeout(), Some(Duration::from_secs(60)));
    assert_eq!(cfg.locales.remote_ids(), vec!["fr", "es"]);
}

#[test]
fn test_invalid_locale_mapping_rejected() {
    let toml_str = format!("{MINIMAL}\n[locales]\nde = \"de-DE\"\nat = \"de-DE\"\n");
    let err = parse(&toml_str).unwrap_err();
    assert!(matches!(err, LocsyncError::Config(_)));
}

#[test]
fn test_zero_interval_rejected() {
    let toml_str = format!("{MINIMAL}\n[polling]\ninterval_ms = 0\n");
    assert!(parse(&toml_str).is_err());
}

#[test]
fn test_zero_request_timeout_rejected() {
    let toml_str = MINIMAL.replace("file_id = 42", "file_id = 42\nrequest_timeout_secs = 0");
    let err = parse(&toml_str).unwrap_err();
    assert!(err.to_string().contains("request_timeout_secs"));
}

#[test]
fn test_missing_method_rejected() {
    let toml_str = r#"
        [crowdin]
        project_id = 1
        file_id = 2

        [paths]
        source_file = "en.json"
        translations_dir = "out"
    "#;
    assert!(parse(toml_str).is_err());
}

#[test]
fn test_load_missing_file_is_error() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("locsync.toml");
    let err = load(path.to_str().unwrap()).unwrap_err();
    assert!(err.to_string().contains("failed to read"));
}

#[test]
fn test_load_from_file() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("locsync.toml");
    std::fs::write(&path, MINIMAL).unwrap();
    let cfg = load(path.to_str().unwrap()).unwrap();
    assert_eq!(cfg.crowdin.file_id, 42);
}

#[test]
fn test_resolve_token_prefers_env() {
    assert_eq!(
        resolve_token(Some("from-env".into()), "from-file").unwrap(),
        "from-env"
    );
    assert_eq!(resolve_token(None, "from-file").unwrap(), "from-file");
    assert_eq!(
        resolve_token(Some("  ".into()), "from-file").unwrap(),
        "from-file"
    );
}

#[test]
fn test_resolve_token_missing_is_config_error() {
    let err = resolve_token(None, "").unwrap_err();
    assert!(matches!(err, LocsyncError::Config(_)));
    assert!(err.to_string().contains("CROWDIN_TOKEN"));
}

#[test]
fn test_token_not_serialized() {
    let mut cfg = parse(MINIMAL).unwrap();
    cfg.crowdin.token = "secret".into();
    let out = serde_json::to_string(&cfg).unwrap();
    assert!(!out.contains("secret"));
}

#[test]
fn test_shellexpand_passthrough() {
    assert_eq!(shellexpand("/abs/path"), "/abs/path");
    assert_eq!(shellexpand("rel/path"), "rel/path");
}
