use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
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
/// Returns `ConfigError` if values are invalid.
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
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    // Empty strings count as unset so `.env` templates can leave them blank.
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
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

    let env = parse_environment(&or_default("INFLUTRUST_ENV", "development"))?;

    let bind_addr = or_default("INFLUTRUST_BIND_ADDR", "0.0.0.0:3000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("INFLUTRUST_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("INFLUTRUST_LOG_LEVEL", "info");
    let targets_path = PathBuf::from(or_default(
        "INFLUTRUST_TARGETS_PATH",
        "./config/targets.yaml",
    ));
    let categories_path = optional("INFLUTRUST_CATEGORIES_PATH").map(PathBuf::from);

    let http_timeout_secs = parse_u64("INFLUTRUST_HTTP_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("INFLUTRUST_USER_AGENT", "influtrust/0.1 (trust-dashboard)");
    let media_limit = parse_u32("INFLUTRUST_MEDIA_LIMIT", "25")?;
    if media_limit == 0 {
        return Err(invalid(
            "INFLUTRUST_MEDIA_LIMIT",
            "must be at least 1".to_string(),
        ));
    }
    let max_concurrent_targets = parse_usize("INFLUTRUST_MAX_CONCURRENT_TARGETS", "4")?;
    if max_concurrent_targets == 0 {
        return Err(invalid(
            "INFLUTRUST_MAX_CONCURRENT_TARGETS",
            "must be at least 1".to_string(),
        ));
    }

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        targets_path,
        categories_path,
        http_timeout_secs,
        user_agent,
        media_limit,
        max_concurrent_targets,
        instagram_access_token: optional("INSTAGRAM_ACCESS_TOKEN"),
        instagram_base_url: optional("INSTAGRAM_API_BASE_URL"),
        youtube_api_key: optional("YOUTUBE_API_KEY"),
        youtube_base_url: optional("YOUTUBE_API_BASE_URL"),
        linkedin_access_token: optional("LINKEDIN_ACCESS_TOKEN"),
        linkedin_base_url: optional("LINKEDIN_API_BASE_URL"),
        registry_url: optional("INFLUTRUST_REGISTRY_URL"),
        registry_api_key: optional("INFLUTRUST_REGISTRY_API_KEY"),
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "INFLUTRUST_ENV".to_string(),
            reason: format!("expected development, test, or production; got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
