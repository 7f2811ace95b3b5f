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

fn build_with(pairs: &[(&'static str, &'static str)]) -> Result<AppConfig, ConfigError> {
    let map: HashMap<&str, &str> = pairs.iter().copied().collect();
    build_app_config(lookup_from_map(&map))
}

#[test]
fn parse_environment_development() {
    assert_eq!(parse_environment("development"), Environment::Development);
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test"), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(parse_environment("production"), Environment::Production);
}

#[test]
fn parse_environment_unknown_defaults_to_development() {
    assert_eq!(parse_environment("unknown"), Environment::Development);
}

#[test]
fn build_app_config_succeeds_with_empty_env() {
    let result = build_with(&[]);
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:8501");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.catalog_base_url, "http://localhost:8080");
    assert_eq!(cfg.catalog_timeout_secs, 3);
    assert_eq!(cfg.catalog_cache_ttl_secs, 3600);
    assert_eq!(cfg.catalog_user_agent, "takana/0.1 (storefront)");
}

#[test]
fn build_app_config_fails_with_invalid_bind_addr() {
    let result = build_with(&[("TAKANA_BIND_ADDR", "not-a-socket-addr")]);
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TAKANA_BIND_ADDR"),
        "expected InvalidEnvVar(TAKANA_BIND_ADDR), got: {result:?}"
    );
}

#[test]
fn catalog_base_url_trailing_slash_is_stripped() {
    let cfg = build_with(&[("TAKANA_CATALOG_BASE_URL", "https://tienda.example.com/")]).unwrap();
    assert_eq!(cfg.catalog_base_url, "https://tienda.example.com");
}

#[test]
fn catalog_base_url_keeps_path_prefix() {
    let cfg = build_with(&[("TAKANA_CATALOG_BASE_URL", "http://10.0.0.5:8080/shop")]).unwrap();
    assert_eq!(cfg.catalog_base_url, "http://10.0.0.5:8080/shop");
}

#[test]
fn catalog_base_url_rejects_missing_scheme() {
    let result = build_with(&[("TAKANA_CATALOG_BASE_URL", "localhost:8080")]);
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TAKANA_CATALOG_BASE_URL"),
        "expected InvalidEnvVar(TAKANA_CATALOG_BASE_URL), got: {result:?}"
    );
}

#[test]
fn catalog_base_url_rejects_missing_host() {
    let result = build_with(&[("TAKANA_CATALOG_BASE_URL", "http:///")]);
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TAKANA_CATALOG_BASE_URL"),
        "expected InvalidEnvVar(TAKANA_CATALOG_BASE_URL), got: {result:?}"
    );
}

#[test]
fn catalog_timeout_secs_override() {
    let cfg = build_with(&[("TAKANA_CATALOG_TIMEOUT_SECS", "10")]).unwrap();
    assert_eq!(cfg.catalog_timeout_secs, 10);
}

#[test]
fn catalog_timeout_secs_invalid() {
    let result = build_with(&[("TAKANA_CATALOG_TIMEOUT_SECS", "not-a-number")]);
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TAKANA_CATALOG_TIMEOUT_SECS"),
        "expected InvalidEnvVar(TAKANA_CATALOG_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn catalog_timeout_secs_rejects_zero() {
    let result = build_with(&[("TAKANA_CATALOG_TIMEOUT_SECS", "0")]);
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TAKANA_CATALOG_TIMEOUT_SECS"),
        "expected InvalidEnvVar(TAKANA_CATALOG_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn catalog_cache_ttl_secs_override() {
    let cfg = build_with(&[("TAKANA_CATALOG_CACHE_TTL_SECS", "60")]).unwrap();
    assert_eq!(cfg.catalog_cache_ttl_secs, 60);
}

#[test]
fn catalog_cache_ttl_secs_invalid() {
    let result = build_with(&[("TAKANA_CATALOG_CACHE_TTL_SECS", "-1")]);
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TAKANA_CATALOG_CACHE_TTL_SECS"),
        "expected InvalidEnvVar(TAKANA_CATALOG_CACHE_TTL_SECS), got: {result:?}"
    );
}

#[test]
fn catalog_user_agent_override() {
    let cfg = build_with(&[("TAKANA_CATALOG_USER_AGENT", "custom-agent/2.0")]).unwrap();
    assert_eq!(cfg.catalog_user_agent, "custom-agent/2.0");
}
