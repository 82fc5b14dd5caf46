use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

/// Returns a map with all required env vars populated with valid defaults.
fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("TWITTER_BEARER_TOKEN", "test-bearer");
    m.insert("SENDGRID_API_KEY", "SG.test-key");
    m.insert("PERSONAL_EMAIL", "me@example.com");
    m
}

#[test]
fn build_app_config_fails_without_bearer_token() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "TWITTER_BEARER_TOKEN"),
        "expected MissingEnvVar(TWITTER_BEARER_TOKEN), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_without_email_api_key() {
    let mut map = full_env();
    map.remove("SENDGRID_API_KEY");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "SENDGRID_API_KEY"),
        "expected MissingEnvVar(SENDGRID_API_KEY), got: {result:?}"
    );
}

#[test]
fn build_app_config_treats_blank_recipient_as_missing() {
    let mut map = full_env();
    map.insert("PERSONAL_EMAIL", "   ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "PERSONAL_EMAIL"),
        "expected MissingEnvVar(PERSONAL_EMAIL), got: {result:?}"
    );
}

#[test]
fn build_app_config_succeeds_with_all_required_vars() {
    let map = full_env();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.feed_bearer_token, "test-bearer");
    assert_eq!(cfg.email_api_key, "SG.test-key");
    assert_eq!(cfg.recipient_email, "me@example.com");
    assert_eq!(cfg.sender_email, "me@example.com");
    assert_eq!(cfg.feed_user_id, 137_060_402);
    assert_eq!(cfg.feed_max_results, 5);
    assert_eq!(cfg.window_minutes, 15);
    assert_eq!(cfg.email_subject, "New SwagCode Available!");
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.user_agent, "swagwatch/0.1 (swag-code-notifier)");
    assert_eq!(cfg.schedule, "0 */15 * * * *");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.feed_base_url, "https://api.twitter.com/");
    assert_eq!(cfg.email_base_url, "https://api.sendgrid.com/");
}

#[test]
fn sender_email_override() {
    let mut map = full_env();
    map.insert("NOTIFY_EMAIL_FROM", "alerts@example.com");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.sender_email, "alerts@example.com");
    assert_eq!(cfg.recipient_email, "me@example.com");
}

#[test]
fn window_minutes_override() {
    let mut map = full_env();
    map.insert("SWAGWATCH_WINDOW_MINUTES", "30");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.window_minutes, 30);
}

#[test]
fn window_minutes_zero_is_rejected() {
    let mut map = full_env();
    map.insert("SWAGWATCH_WINDOW_MINUTES", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SWAGWATCH_WINDOW_MINUTES"),
        "expected InvalidEnvVar(SWAGWATCH_WINDOW_MINUTES), got: {result:?}"
    );
}

#[test]
fn window_minutes_invalid() {
    let mut map = full_env();
    map.insert("SWAGWATCH_WINDOW_MINUTES", "fifteen");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SWAGWATCH_WINDOW_MINUTES"),
        "expected InvalidEnvVar(SWAGWATCH_WINDOW_MINUTES), got: {result:?}"
    );
}

#[test]
fn feed_max_results_out_of_range() {
    for raw in ["4", "101"] {
        let mut map = full_env();
        map.insert("SWAGWATCH_FEED_MAX_RESULTS", raw);
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SWAGWATCH_FEED_MAX_RESULTS"),
            "expected InvalidEnvVar for {raw}, got: {result:?}"
        );
    }
}

#[test]
fn feed_user_id_invalid() {
    let mut map = full_env();
    map.insert("SWAGWATCH_FEED_USER_ID", "swagcodespoiler");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SWAGWATCH_FEED_USER_ID"),
        "expected InvalidEnvVar(SWAGWATCH_FEED_USER_ID), got: {result:?}"
    );
}

#[test]
fn request_timeout_override() {
    let mut map = full_env();
    map.insert("SWAGWATCH_REQUEST_TIMEOUT_SECS", "5");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.request_timeout_secs, 5);
}

#[test]
fn debug_redacts_credentials() {
    let map = full_env();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("test-bearer"));
    assert!(!rendered.contains("SG.test-key"));
    assert!(rendered.contains("[redacted]"));
}

#[test]
fn http_settings_need_no_credentials() {
    let map: HashMap<&str, &str> = HashMap::new();
    let settings = build_http_settings(&lookup_from_map(&map)).unwrap();
    assert_eq!(
        settings,
        HttpSettings {
            request_timeout_secs: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            log_level: "info".to_string(),
        }
    );
}

#[test]
fn http_settings_honour_overrides() {
    let mut map = HashMap::new();
    map.insert("SWAGWATCH_REQUEST_TIMEOUT_SECS", "7");
    map.insert("SWAGWATCH_USER_AGENT", "custom/1.0");
    map.insert("SWAGWATCH_LOG_LEVEL", "debug");
    let settings = build_http_settings(&lookup_from_map(&map)).unwrap();
    assert_eq!(settings.request_timeout_secs, 7);
    assert_eq!(settings.user_agent, "custom/1.0");
    assert_eq!(settings.log_level, "debug");
}

#[test]
fn http_settings_reject_invalid_timeout() {
    let mut map = HashMap::new();
    map.insert("SWAGWATCH_REQUEST_TIMEOUT_SECS", "soon");
    let result = build_http_settings(&lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SWAGWATCH_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(SWAGWATCH_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}
