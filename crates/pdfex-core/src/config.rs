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

/// Build application configuration using the provided env-var lookup function,
/// so tests can drive it from a `HashMap` instead of the process environment.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var)
            .map(|v| v.trim().to_string())
            .unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
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

    let supabase_url = require("SUPABASE_URL")?;
    let supabase_anon_key = require("SUPABASE_ANON_KEY")?;
    let products_table = or_default("SUPABASE_PRODUCTS_TABLE", "products");
    if products_table.is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "SUPABASE_PRODUCTS_TABLE".to_string(),
            reason: "table name must not be empty".to_string(),
        });
    }

    let env = parse_environment(&or_default("PDFEX_ENV", "development"))?;
    let bind_addr = parse_addr("PDFEX_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("PDFEX_LOG_LEVEL", "info");

    let store_timeout_secs = parse_u64("PDFEX_STORE_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("PDFEX_USER_AGENT", "pdfex/0.1 (catalogue)");

    Ok(AppConfig {
        supabase_url,
        supabase_anon_key,
        products_table,
        env,
        bind_addr,
        log_level,
        store_timeout_secs,
        user_agent,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "PDFEX_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
