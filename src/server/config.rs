use std::str::FromStr;

use crate::server::{
    error::{config::ConfigError, AppError},
    service::throttle::rate::{ScopeRates, ThrottleRate, ThrottleRates},
};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_PAGE_SIZE: u64 = 4;
const DEFAULT_MAX_PAGE_SIZE: u64 = 100;

pub struct Config {
    pub database_url: String,
    pub app_url: String,
    pub bind_addr: String,

    pub page_size: u64,
    pub max_page_size: u64,

    pub throttle_rates: ThrottleRates,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = ThrottleRates::default();

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            app_url: required("APP_URL")?.trim_end_matches('/').to_string(),
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
            page_size: optional("PAGE_SIZE", DEFAULT_PAGE_SIZE)?,
            max_page_size: optional("MAX_PAGE_SIZE", DEFAULT_MAX_PAGE_SIZE)?,
            throttle_rates: ThrottleRates {
                default: scope_rates("DEFAULT", defaults.default)?,
                drones: scope_rates("DRONES", defaults.drones)?,
                pilots: scope_rates("PILOTS", defaults.pilots)?,
            },
        })
    }
}

fn required(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

fn optional<T>(name: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(value) => value.parse::<T>().map_err(|e| ConfigError::InvalidValue {
            name: name.to_string(),
            value,
            reason: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

/// Reads `THROTTLE_<SCOPE>_ANON` and `THROTTLE_<SCOPE>_USER`.
fn scope_rates(scope: &str, defaults: ScopeRates) -> Result<ScopeRates, ConfigError> {
    Ok(ScopeRates {
        anonymous: optional::<ThrottleRate>(
            &format!("THROTTLE_{}_ANON", scope),
            defaults.anonymous,
        )?,
        authenticated: optional::<ThrottleRate>(
            &format!("THROTTLE_{}_USER", scope),
            defaults.authenticated,
        )?,
    })
}
