use crate::analysis::engine::CacheTtls;
use crate::error::AppError;
use std::env;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub region: String,
    pub rate_per_second: u32,
    pub rate_per_two_minutes: u32,
    pub max_retries: u32,
    pub request_timeout: Duration,
    pub cache_default_ttl: Duration,
    pub cache_ttls: CacheTtls,
    pub max_matches: usize,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup; `from_env` passes the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("RIOT_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                AppError::ConfigError("RIOT_API_KEY not found in environment or .env file".to_string())
            })?;

        let region = lookup("RIOT_REGION")
            .map(|r| r.to_ascii_lowercase())
            .unwrap_or_else(|| "na1".to_string());

        let secs = |key: &str, default: u64| -> Result<Duration, AppError> {
            positive(&lookup, key, default).map(Duration::from_secs)
        };

        Ok(Config {
            api_key,
            region,
            rate_per_second: positive(&lookup, "RIOT_RATE_PER_SECOND", 20)?,
            rate_per_two_minutes: positive(&lookup, "RIOT_RATE_PER_TWO_MINUTES", 100)?,
            max_retries: positive(&lookup, "RIOT_MAX_RETRIES", 3)?,
            request_timeout: secs("RIOT_REQUEST_TIMEOUT_SECS", 10)?,
            cache_default_ttl: secs("CACHE_DEFAULT_TTL_SECS", 300)?,
            cache_ttls: CacheTtls {
                puuid: secs("CACHE_TTL_PUUID_SECS", 3600)?,
                match_ids: secs("CACHE_TTL_MATCH_IDS_SECS", 300)?,
                match_details: secs("CACHE_TTL_MATCH_DETAILS_SECS", 1800)?,
            },
            max_matches: positive(&lookup, "MAX_MATCHES", 20)?,
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "warn".to_string()),
        })
    }
}

fn positive<F, T>(lookup: &F, key: &str, default: T) -> Result<T, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + PartialOrd + Default,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };

    match raw.trim().parse::<T>() {
        Ok(value) if value > T::default() => Ok(value),
        _ => Err(AppError::ConfigError(format!(
            "{} must be a positive integer, got '{}'",
            key, raw
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config, AppError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_only_the_key_is_set() {
        let config = config(&[("RIOT_API_KEY", "RGAPI-test")]).unwrap();

        assert_eq!(config.region, "na1");
        assert_eq!(config.rate_per_second, 20);
        assert_eq!(config.rate_per_two_minutes, 100);
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.cache_ttls.puuid, Duration::from_secs(3600));
        assert_eq!(config.cache_ttls.match_ids, Duration::from_secs(300));
        assert_eq!(config.cache_ttls.match_details, Duration::from_secs(1800));
        assert_eq!(config.max_matches, 20);
    }

    #[test]
    fn missing_api_key_is_an_error() {
        assert!(matches!(config(&[]), Err(AppError::ConfigError(_))));
        assert!(matches!(config(&[("RIOT_API_KEY", "  ")]), Err(AppError::ConfigError(_))));
    }

    #[test]
    fn overrides_are_parsed() {
        let config = config(&[
            ("RIOT_API_KEY", "k"),
            ("RIOT_REGION", "EUW1"),
            ("RIOT_RATE_PER_SECOND", "10"),
            ("CACHE_TTL_MATCH_IDS_SECS", "60"),
        ])
        .unwrap();

        assert_eq!(config.region, "euw1");
        assert_eq!(config.rate_per_second, 10);
        assert_eq!(config.cache_ttls.match_ids, Duration::from_secs(60));
    }

    #[test]
    fn zero_or_garbage_limits_are_rejected() {
        assert!(config(&[("RIOT_API_KEY", "k"), ("RIOT_RATE_PER_SECOND", "0")]).is_err());
        assert!(config(&[("RIOT_API_KEY", "k"), ("RIOT_MAX_RETRIES", "many")]).is_err());
    }
}
