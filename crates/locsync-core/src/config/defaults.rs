pub(super) fn default_log_level() -> String {
    "info".to_string()
}

pub(super) fn default_poll_interval_ms() -> u64 {
    2000
}

pub(super) fn default_request_timeout_secs() -> u64 {
    60
}

pub(super) const TOKEN_ENV: &str = "CROWDIN_TOKEN";
