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

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "INFLUTRUST_ENV"));
}

#[test]
fn build_app_config_uses_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(
        cfg.targets_path,
        std::path::PathBuf::from("./config/targets.yaml")
    );
    assert!(cfg.categories_path.is_none());
    assert_eq!(cfg.http_timeout_secs, 30);
    assert_eq!(cfg.user_agent, "influtrust/0.1 (trust-dashboard)");
    assert_eq!(cfg.media_limit, 25);
    assert_eq!(cfg.max_concurrent_targets, 4);
    assert!(cfg.instagram_access_token.is_none());
    assert!(cfg.youtube_api_key.is_none());
    assert!(cfg.linkedin_access_token.is_none());
    assert!(cfg.registry_url.is_none());
}

#[test]
fn build_app_config_fails_with_invalid_bind_addr() {
    let mut map = HashMap::new();
    map.insert("INFLUTRUST_BIND_ADDR", "not-a-socket-addr");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "INFLUTRUST_BIND_ADDR"),
        "expected InvalidEnvVar(INFLUTRUST_BIND_ADDR), got: {result:?}"
    );
}

#[test]
fn build_app_config_reads_platform_credentials() {
    let mut map = HashMap::new();
    map.insert("INSTAGRAM_ACCESS_TOKEN", "ig-token");
    map.insert("YOUTUBE_API_KEY", "yt-key");
    map.insert("LINKEDIN_ACCESS_TOKEN", "li-token");
    map.insert("YOUTUBE_API_BASE_URL", "http://localhost:9999");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.instagram_access_token.as_deref(), Some("ig-token"));
    assert_eq!(cfg.youtube_api_key.as_deref(), Some("yt-key"));
    assert_eq!(cfg.linkedin_access_token.as_deref(), Some("li-token"));
    assert_eq!(
        cfg.youtube_base_url.as_deref(),
        Some("http://localhost:9999")
    );
}

#[test]
fn build_app_config_treats_blank_credentials_as_unset() {
    let mut map = HashMap::new();
    map.insert("INSTAGRAM_ACCESS_TOKEN", "   ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.instagram_access_token.is_none());
}

#[test]
fn build_app_config_media_limit_override() {
    let mut map = HashMap::new();
    map.insert("INFLUTRUST_MEDIA_LIMIT", "10");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.media_limit, 10);
}

#[test]
fn build_app_config_media_limit_rejects_zero() {
    let mut map = HashMap::new();
    map.insert("INFLUTRUST_MEDIA_LIMIT", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "INFLUTRUST_MEDIA_LIMIT"),
        "expected InvalidEnvVar(INFLUTRUST_MEDIA_LIMIT), got: {result:?}"
    );
}

#[test]
fn build_app_config_http_timeout_invalid() {
    let mut map = HashMap::new();
    map.insert("INFLUTRUST_HTTP_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "INFLUTRUST_HTTP_TIMEOUT_SECS"),
        "expected InvalidEnvVar(INFLUTRUST_HTTP_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_max_concurrent_targets_rejects_zero() {
    let mut map = HashMap::new();
    map.insert("INFLUTRUST_MAX_CONCURRENT_TARGETS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "INFLUTRUST_MAX_CONCURRENT_TARGETS"),
        "expected InvalidEnvVar(INFLUTRUST_MAX_CONCURRENT_TARGETS), got: {result:?}"
    );
}

#[test]
fn app_config_debug_redacts_secrets() {
    let mut map = HashMap::new();
    map.insert("YOUTUBE_API_KEY", "super-secret-key");
    map.insert("INFLUTRUST_REGISTRY_API_KEY", "registry-secret");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let debug = format!("{cfg:?}");
    assert!(!debug.contains("super-secret-key"));
    assert!(!debug.contains("registry-secret"));
    assert!(debug.contains("[redacted]"));
}
