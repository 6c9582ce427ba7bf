use std::env;
use std::time::Duration;

use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/";
pub const DEFAULT_STALE_SECS: u64 = 30;
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Where the dashboard API lives and how long fetched bodies stay fresh.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: Url,
    pub stale_after: Duration,
    pub request_timeout: Duration,
}

impl ApiConfig {
    /// Build a config for `base_url` with default timings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidBaseUrl` if the url cannot be parsed or is not http(s).
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            stale_after: Duration::from_secs(DEFAULT_STALE_SECS),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Read `NOUN_API_BASE_URL`, `NOUN_QUERY_STALE_SECS` and `NOUN_HTTP_TIMEOUT_SECS`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`ApiConfig::from_env`] with an injectable variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a variable is set to an unusable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = lookup("NOUN_API_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into());
        let mut config = Self::new(&base_url)?;
        if let Some(secs) = read_secs(&lookup, "NOUN_QUERY_STALE_SECS")? {
            config.stale_after = secs;
        }
        if let Some(secs) = read_secs(&lookup, "NOUN_HTTP_TIMEOUT_SECS")? {
            config.request_timeout = secs;
        }
        Ok(config)
    }

    /// `stale_after` as a chrono duration, saturating on overflow.
    #[must_use]
    pub fn stale_window(&self) -> chrono::Duration {
        chrono::Duration::from_std(self.stale_after).unwrap_or(chrono::Duration::MAX)
    }

    /// Override the base url, e.g. from a CLI flag.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidBaseUrl` if the url cannot be parsed.
    pub fn with_base_url(mut self, raw: &str) -> Result<Self, ConfigError> {
        self.base_url = parse_base_url(raw)?;
        Ok(self)
    }
}

fn read_secs(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<Duration>, ConfigError> {
    let Some(raw) = lookup(var) else {
        return Ok(None);
    };
    let secs = raw
        .trim()
        .parse::<u64>()
        .map_err(|_| ConfigError::InvalidValue { var, value: raw })?;
    Ok(Some(Duration::from_secs(secs)))
}

// Endpoint paths are joined relative to the base, so it must end in a slash.
fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };
    let url = Url::parse(&with_slash).map_err(|e| ConfigError::InvalidBaseUrl {
        raw: raw.to_string(),
        reason: e.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidBaseUrl {
            raw: raw.to_string(),
            reason: format!("unsupported scheme {}", url.scheme()),
        });
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = ApiConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.base_url.as_str(), DEFAULT_BASE_URL);
        assert_eq!(config.stale_after, Duration::from_secs(DEFAULT_STALE_SECS));
        assert_eq!(config.request_timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(config.stale_window(), chrono::Duration::seconds(30));
    }

    #[test]
    fn base_url_gains_trailing_slash() {
        let config = ApiConfig::new("https://portal.example.edu/app").unwrap();
        assert_eq!(config.base_url.as_str(), "https://portal.example.edu/app/");
    }

    #[test]
    fn rejects_non_http_scheme() {
        let err = ApiConfig::new("ftp://files.example.edu").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn rejects_non_numeric_timings() {
        let err = ApiConfig::from_lookup(lookup(&[("NOUN_QUERY_STALE_SECS", "soon")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                var: "NOUN_QUERY_STALE_SECS",
                ..
            }
        ));
    }

    #[test]
    fn reads_overrides() {
        let config = ApiConfig::from_lookup(lookup(&[
            ("NOUN_API_BASE_URL", "http://10.0.0.2:8080"),
            ("NOUN_HTTP_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.base_url.as_str(), "http://10.0.0.2:8080/");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }
}
