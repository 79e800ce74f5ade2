use crate::app_config::{AppConfig, ClassifierConfig, Environment};
use crate::ConfigError;

pub const DEFAULT_PLACES_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place/";
pub const DEFAULT_CLASSIFIER_MODEL: &str = "nlptown/bert-base-multilingual-uncased-sentiment";

/// Longest accepted `REVSENSE_ANALYSIS_TIMEOUT_SECS` (one day).
pub const MAX_ANALYSIS_TIMEOUT_SECS: u64 = 86_400;

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

/// Load only the settings needed to reach the sentiment model.
///
/// Used by commands that never call Google Places, so
/// `GOOGLE_PLACES_API_KEY` is not required. Loads `.env` first.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_classifier_config() -> Result<ClassifierConfig, ConfigError> {
    dotenvy::dotenv().ok();
    build_classifier_config(|key| std::env::var(key))
}

fn build_classifier_config<F>(lookup: F) -> Result<ClassifierConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let request_timeout_secs = or_default("REVSENSE_REQUEST_TIMEOUT_SECS", "30")
        .parse::<u64>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: "REVSENSE_REQUEST_TIMEOUT_SECS".to_string(),
            reason: e.to_string(),
        })?;

    Ok(ClassifierConfig {
        log_level: or_default("REVSENSE_LOG_LEVEL", "info"),
        classifier_url: or_default("REVSENSE_CLASSIFIER_URL", "http://localhost:8080"),
        classifier_model: or_default("REVSENSE_CLASSIFIER_MODEL", DEFAULT_CLASSIFIER_MODEL),
        request_timeout_secs,
    })
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let places_api_key = require("GOOGLE_PLACES_API_KEY")?;

    let env = parse_environment(&or_default("REVSENSE_ENV", "development"))?;

    let bind_addr = parse_addr("REVSENSE_BIND_ADDR", "0.0.0.0:3000")?;
    let places_base_url = or_default("REVSENSE_PLACES_BASE_URL", DEFAULT_PLACES_BASE_URL);
    let review_language = optional("REVSENSE_REVIEW_LANGUAGE");
    let ClassifierConfig {
        log_level,
        classifier_url,
        classifier_model,
        request_timeout_secs,
    } = build_classifier_config(&lookup)?;

    let user_agent = or_default("REVSENSE_USER_AGENT", "revsense/0.1 (review-sentiment)");
    let max_retries = parse_u32("REVSENSE_MAX_RETRIES", "3")?;
    let retry_backoff_base_ms = parse_u64("REVSENSE_RETRY_BACKOFF_BASE_MS", "1000")?;
    let classify_concurrency = parse_usize("REVSENSE_CLASSIFY_CONCURRENCY", "4")?.max(1);
    let analysis_timeout_secs = parse_u64("REVSENSE_ANALYSIS_TIMEOUT_SECS", "60")?;
    if analysis_timeout_secs > MAX_ANALYSIS_TIMEOUT_SECS {
        return Err(ConfigError::InvalidEnvVar {
            var: "REVSENSE_ANALYSIS_TIMEOUT_SECS".to_string(),
            reason: format!(
                "must be at most {MAX_ANALYSIS_TIMEOUT_SECS}, got {analysis_timeout_secs}"
            ),
        });
    }
    let sample_size = parse_usize("REVSENSE_SAMPLE_SIZE", "10")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        places_api_key,
        places_base_url,
        review_language,
        classifier_url,
        classifier_model,
        request_timeout_secs,
        user_agent,
        max_retries,
        retry_backoff_base_ms,
        classify_concurrency,
        analysis_timeout_secs,
        sample_size,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "REVSENSE_ENV".to_string(),
            reason: format!("expected development, test, or production; got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
