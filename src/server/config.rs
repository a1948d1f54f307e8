use std::{str::FromStr, time::Duration};

use crate::server::{
    error::{config::ConfigError, AppError},
    model::balance::UnknownBalancePolicy,
};

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3001";
const DEFAULT_RECONCILE_INTERVAL_SECS: u64 = 60;
const DEFAULT_MAX_CONCURRENT_TENANTS: usize = 1;
const DEFAULT_VERIFICATION_CODE_TTL_SECS: u64 = 300;
const DEFAULT_BALANCE_RPC_TIMEOUT_SECS: u64 = 10;

pub struct Config {
    pub database_url: String,
    pub discord_bot_token: String,
    /// Base URL of the wallet-connection page, without a trailing slash.
    pub app_url: String,
    pub bind_address: String,

    pub reconcile_interval: Duration,
    pub max_concurrent_tenants: usize,
    pub unknown_balance_policy: UnknownBalancePolicy,

    pub verification_code_ttl: Duration,
    /// Per-request timeout for balance and transaction RPC calls.
    pub balance_rpc_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from any variable source.
    ///
    /// Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let required =
            |name: &str| var(name).ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()));

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            discord_bot_token: required("DISCORD_BOT_TOKEN")?,
            app_url: app_url(required("APP_URL")?)?,
            bind_address: var("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            reconcile_interval: Duration::from_secs(positive(
                "RECONCILE_INTERVAL_SECS",
                var("RECONCILE_INTERVAL_SECS"),
                DEFAULT_RECONCILE_INTERVAL_SECS,
            )?),
            max_concurrent_tenants: positive(
                "RECONCILE_MAX_CONCURRENT_TENANTS",
                var("RECONCILE_MAX_CONCURRENT_TENANTS"),
                DEFAULT_MAX_CONCURRENT_TENANTS,
            )?,
            unknown_balance_policy: match var("UNKNOWN_BALANCE_POLICY") {
                Some(value) => value.parse()?,
                None => UnknownBalancePolicy::default(),
            },
            verification_code_ttl: Duration::from_secs(positive(
                "VERIFICATION_CODE_TTL_SECS",
                var("VERIFICATION_CODE_TTL_SECS"),
                DEFAULT_VERIFICATION_CODE_TTL_SECS,
            )?),
            balance_rpc_timeout: Duration::from_secs(positive(
                "BALANCE_RPC_TIMEOUT_SECS",
                var("BALANCE_RPC_TIMEOUT_SECS"),
                DEFAULT_BALANCE_RPC_TIMEOUT_SECS,
            )?),
        })
    }
}

/// Validates the front-end base URL and strips any trailing slash.
fn app_url(value: String) -> Result<String, ConfigError> {
    url::Url::parse(&value).map_err(|e| ConfigError::InvalidEnvVar {
        name: "APP_URL".to_string(),
        reason: e.to_string(),
    })?;

    Ok(value.trim_end_matches('/').to_string())
}

/// Parses an optional numeric variable that must be greater than zero.
fn positive<T>(name: &str, value: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr + PartialOrd + Default,
{
    let Some(value) = value else {
        return Ok(default);
    };

    match value.trim().parse::<T>() {
        Ok(parsed) if parsed > T::default() => Ok(parsed),
        _ => Err(ConfigError::InvalidEnvVar {
            name: name.to_string(),
            reason: format!("expected a positive integer, got '{}'", value),
        }),
    }
}
