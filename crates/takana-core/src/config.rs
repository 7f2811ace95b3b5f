use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
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
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default, so an empty environment yields a config
/// pointing at a backend on `localhost:8080`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("TAKANA_ENV", "development"));

    let bind_addr = or_default("TAKANA_BIND_ADDR", "0.0.0.0:8501")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("TAKANA_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("TAKANA_LOG_LEVEL", "info");

    let catalog_base_url = parse_base_url(&or_default(
        "TAKANA_CATALOG_BASE_URL",
        "http://localhost:8080",
    ))
    .map_err(|reason| invalid("TAKANA_CATALOG_BASE_URL", reason))?;

    let catalog_timeout_secs = parse_u64("TAKANA_CATALOG_TIMEOUT_SECS", "3")?;
    if catalog_timeout_secs == 0 {
        return Err(invalid(
            "TAKANA_CATALOG_TIMEOUT_SECS",
            "timeout must be at least 1 second".to_string(),
        ));
    }
    let catalog_cache_ttl_secs = parse_u64("TAKANA_CATALOG_CACHE_TTL_SECS", "3600")?;
    let catalog_user_agent = or_default("TAKANA_CATALOG_USER_AGENT", "takana/0.1 (storefront)");

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        catalog_base_url,
        catalog_timeout_secs,
        catalog_cache_ttl_secs,
        catalog_user_agent,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

/// Accepts an absolute `http`/`https` URL and strips trailing slashes, since
/// image paths are appended by plain concatenation.
fn parse_base_url(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let rest = trimmed
        .strip_prefix("http://")
        .or_else(|| trimmed.strip_prefix("https://"))
        .ok_or_else(|| format!("\"{raw}\" must start with http:// or https://"))?;

    if rest.is_empty() || rest.starts_with('/') {
        return Err(format!("\"{raw}\" has no host"));
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
