use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

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

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
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

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_fraction = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let value = or_default(var, default)
            .parse::<f64>()
            .map_err(|e| invalid(var, e.to_string()))?;
        if (0.0..=1.0).contains(&value) {
            Ok(value)
        } else {
            Err(invalid(var, format!("must be within [0, 1], got {value}")))
        }
    };

    let database_url = require("DATABASE_URL")?;
    let jwt_secret = require("SOCSENT_JWT_SECRET")?;

    let env = parse_environment(&or_default("SOCSENT_ENV", "development"))?;

    let bind_addr = parse_addr("SOCSENT_BIND_ADDR", "0.0.0.0:8000")?;
    let log_level = or_default("SOCSENT_LOG_LEVEL", "info");

    let db_max_connections = parse_u32("SOCSENT_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections = parse_u32("SOCSENT_DB_MIN_CONNECTIONS", "1")?;
    if db_min_connections > db_max_connections {
        return Err(invalid(
            "SOCSENT_DB_MIN_CONNECTIONS",
            format!(
                "must not exceed SOCSENT_DB_MAX_CONNECTIONS ({db_max_connections}), got {db_min_connections}"
            ),
        ));
    }
    let db_acquire_timeout_secs = parse_u64("SOCSENT_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    // No loopback fallback in production.
    let inference_url = if env == Environment::Production {
        require("SOCSENT_INFERENCE_URL")?
    } else {
        or_default("SOCSENT_INFERENCE_URL", "http://127.0.0.1:5000/infer")
    };
    let inference_timeout_secs = parse_u64("SOCSENT_INFERENCE_TIMEOUT_SECS", "60")?;
    let default_model = or_default("SOCSENT_DEFAULT_MODEL", "sentiment-v3");
    let report_model = or_default("SOCSENT_REPORT_MODEL", "sentiment-v3");

    let positive_share_cutoff = parse_fraction("SOCSENT_POSITIVE_SHARE_CUTOFF", "0.2")?;
    let negative_share_cutoff = parse_fraction("SOCSENT_NEGATIVE_SHARE_CUTOFF", "0.5")?;
    if positive_share_cutoff > negative_share_cutoff {
        return Err(invalid(
            "SOCSENT_POSITIVE_SHARE_CUTOFF",
            format!(
                "must not exceed SOCSENT_NEGATIVE_SHARE_CUTOFF ({negative_share_cutoff}), got {positive_share_cutoff}"
            ),
        ));
    }

    let ranking_min_posts = parse_usize("SOCSENT_RANKING_MIN_POSTS", "3")?;
    let rate_limit_per_minute = parse_usize("SOCSENT_RATE_LIMIT_PER_MINUTE", "120")?;

    Ok(AppConfig {
        database_url,
        env,
        bind_addr,
        log_level,
        jwt_secret,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        inference_url,
        inference_timeout_secs,
        default_model,
        report_model,
        positive_share_cutoff,
        negative_share_cutoff,
        ranking_min_posts,
        rate_limit_per_minute,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than
/// `development`, `test` or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SOCSENT_ENV".to_string(),
            reason: format!("expected development, test or production, got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
