use std::fmt;
use std::str::FromStr;

use crate::app_config::{AppConfig, HttpSettings};
use crate::ConfigError;

/// Account whose posts announce new swag codes.
pub const DEFAULT_FEED_USER_ID: &str = "137060402";
pub const DEFAULT_EMAIL_SUBJECT: &str = "New SwagCode Available!";
pub const DEFAULT_USER_AGENT: &str = "swagwatch/0.1 (swag-code-notifier)";
const DEFAULT_FEED_BASE_URL: &str = "https://api.twitter.com/";
const DEFAULT_EMAIL_BASE_URL: &str = "https://api.sendgrid.com/";

/// The feed API rejects page sizes outside this range.
const FEED_MAX_RESULTS_RANGE: std::ops::RangeInclusive<u32> = 5..=100;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Load the settings needed for one-off HTTP work (`scrape`, `preview`).
///
/// Reads only optional variables, so it succeeds without any credentials.
///
/// # Errors
///
/// Returns `ConfigError` if a present value is invalid.
pub fn load_http_settings() -> Result<HttpSettings, ConfigError> {
    dotenvy::dotenv().ok();
    load_http_settings_from_env()
}

/// Like [`load_http_settings`], without loading `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a present value is invalid.
pub fn load_http_settings_from_env() -> Result<HttpSettings, ConfigError> {
    let lookup = |key: &str| std::env::var(key);
    build_http_settings(&lookup)
}

/// Blank values (e.g. `KEY=` in a .env file) count as missing.
fn present<F>(lookup: &F, var: &str) -> Option<String>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    lookup(var)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn or_default<F>(lookup: &F, var: &str, default: &str) -> String
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    present(lookup, var).unwrap_or_else(|| default.to_string())
}

fn parse_or_default<F, T>(lookup: &F, var: &str, default: &str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
    T: FromStr,
    T::Err: fmt::Display,
{
    or_default(lookup, var, default)
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
}

fn build_http_settings<F>(lookup: &F) -> Result<HttpSettings, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    Ok(HttpSettings {
        request_timeout_secs: parse_or_default(lookup, "SWAGWATCH_REQUEST_TIMEOUT_SECS", "30")?,
        user_agent: or_default(lookup, "SWAGWATCH_USER_AGENT", DEFAULT_USER_AGENT),
        log_level: or_default(lookup, "SWAGWATCH_LOG_LEVEL", "info"),
    })
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can pass a `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        present(&lookup, var).ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let feed_bearer_token = require("TWITTER_BEARER_TOKEN")?;
    let email_api_key = require("SENDGRID_API_KEY")?;
    let recipient_email = require("PERSONAL_EMAIL")?;
    let sender_email = or_default(&lookup, "NOTIFY_EMAIL_FROM", &recipient_email);

    let feed_user_id: u64 =
        parse_or_default(&lookup, "SWAGWATCH_FEED_USER_ID", DEFAULT_FEED_USER_ID)?;

    let feed_max_results: u32 = parse_or_default(&lookup, "SWAGWATCH_FEED_MAX_RESULTS", "5")?;
    if !FEED_MAX_RESULTS_RANGE.contains(&feed_max_results) {
        return Err(ConfigError::InvalidEnvVar {
            var: "SWAGWATCH_FEED_MAX_RESULTS".to_string(),
            reason: format!(
                "{feed_max_results} is outside {}..={}",
                FEED_MAX_RESULTS_RANGE.start(),
                FEED_MAX_RESULTS_RANGE.end()
            ),
        });
    }

    let window_minutes: u32 = parse_or_default(&lookup, "SWAGWATCH_WINDOW_MINUTES", "15")?;
    if window_minutes == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "SWAGWATCH_WINDOW_MINUTES".to_string(),
            reason: "window must be at least one minute".to_string(),
        });
    }

    let HttpSettings {
        request_timeout_secs,
        user_agent,
        log_level,
    } = build_http_settings(&lookup)?;

    Ok(AppConfig {
        feed_bearer_token,
        email_api_key,
        recipient_email,
        sender_email,
        feed_user_id,
        feed_max_results,
        window_minutes,
        email_subject: or_default(&lookup, "SWAGWATCH_EMAIL_SUBJECT", DEFAULT_EMAIL_SUBJECT),
        request_timeout_secs,
        user_agent,
        schedule: or_default(&lookup, "SWAGWATCH_SCHEDULE", "0 */15 * * * *"),
        log_level,
        feed_base_url: or_default(&lookup, "SWAGWATCH_FEED_BASE_URL", DEFAULT_FEED_BASE_URL),
        email_base_url: or_default(&lookup, "SWAGWATCH_EMAIL_BASE_URL", DEFAULT_EMAIL_BASE_URL),
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
