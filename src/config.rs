//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

/// Default link lifetime: 7 days.
pub const DEFAULT_LINK_TTL_SECS: u64 = 7 * 24 * 60 * 60;
/// Default background sweep interval: 30 days.
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 30 * 24 * 60 * 60;
/// Longest accepted link lifetime or sweep interval: 100 years.
///
/// Keeps both values representable as chrono and tokio time arithmetic.
pub const MAX_DURATION_SECS: u64 = 100 * 365 * 24 * 60 * 60;
/// Default HTTP port.
pub const DEFAULT_SERVER_PORT: u16 = 8000;
/// Default prefix prepended to tokens when building short URLs.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/";
/// Default generated token length.
pub const DEFAULT_TOKEN_LENGTH: usize = 10;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Lifetime of a link in seconds
    pub link_ttl: u64,
    /// Background sweep interval in seconds
    pub sweep_interval: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Base URL used to render short links
    pub base_url: String,
    /// Length of generated tokens
    pub token_length: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `LINK_TTL_SECS` - Link lifetime in seconds (default: 604800)
    /// - `SWEEP_INTERVAL_SECS` - Sweep frequency in seconds (default: 2592000)
    /// - `SERVER_PORT` - HTTP server port (default: 8000)
    /// - `BASE_URL` - Short link prefix (default: http://localhost:8000/)
    /// - `TOKEN_LENGTH` - Generated token length (default: 10)
    ///
    /// Unparsable or zero values fall back to the default, as do durations
    /// longer than [`MAX_DURATION_SECS`].
    pub fn from_env() -> Self {
        let base_url = env::var("BASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(normalize_base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Self {
            link_ttl: duration_var("LINK_TTL_SECS", DEFAULT_LINK_TTL_SECS),
            sweep_interval: duration_var("SWEEP_INTERVAL_SECS", DEFAULT_SWEEP_INTERVAL_SECS),
            server_port: positive_var("SERVER_PORT", DEFAULT_SERVER_PORT),
            base_url,
            token_length: positive_var("TOKEN_LENGTH", DEFAULT_TOKEN_LENGTH),
        }
    }

    /// Link lifetime as a chrono duration, for timestamp arithmetic.
    ///
    /// Values outside `1..=MAX_DURATION_SECS` yield the default lifetime.
    pub fn ttl(&self) -> chrono::Duration {
        let secs = checked_duration("link_ttl", self.link_ttl, DEFAULT_LINK_TTL_SECS);
        i64::try_from(secs)
            .ok()
            .and_then(chrono::Duration::try_seconds)
            .unwrap_or_else(|| chrono::Duration::seconds(DEFAULT_LINK_TTL_SECS as i64))
    }

    /// Sweep interval as a std duration, for the tokio timer.
    ///
    /// Values outside `1..=MAX_DURATION_SECS` yield the default interval.
    pub fn sweep_period(&self) -> Duration {
        Duration::from_secs(checked_duration(
            "sweep_interval",
            self.sweep_interval,
            DEFAULT_SWEEP_INTERVAL_SECS,
        ))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            link_ttl: DEFAULT_LINK_TTL_SECS,
            sweep_interval: DEFAULT_SWEEP_INTERVAL_SECS,
            server_port: DEFAULT_SERVER_PORT,
            base_url: DEFAULT_BASE_URL.to_string(),
            token_length: DEFAULT_TOKEN_LENGTH,
        }
    }
}

fn positive_var<T>(name: &str, default: T) -> T
where
    T: FromStr + PartialEq + Default,
{
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .filter(|v| *v != T::default())
        .unwrap_or(default)
}

fn duration_var(name: &str, default: u64) -> u64 {
    parse_duration(name, env::var(name).ok(), default)
}

fn parse_duration(name: &str, raw: Option<String>, default: u64) -> u64 {
    match raw.map(|v| v.trim().parse::<u64>()) {
        None => default,
        Some(Ok(secs)) => checked_duration(name, secs, default),
        Some(Err(_)) => {
            warn!("{} is not a number of seconds, using default {}s", name, default);
            default
        }
    }
}

fn checked_duration(name: &str, secs: u64, default: u64) -> u64 {
    if secs == 0 || secs > MAX_DURATION_SECS {
        warn!(
            "{}={}s is outside 1..={}s, using default {}s",
            name, secs, MAX_DURATION_SECS, default
        );
        default
    } else {
        secs
    }
}

/// Short URLs are built by plain concatenation, so the base needs a trailing slash.
fn normalize_base_url(raw: String) -> String {
    let trimmed = raw.trim();
    if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{}/", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.link_ttl, 604_800);
        assert_eq!(config.sweep_interval, 2_592_000);
        assert_eq!(config.server_port, 8000);
        assert_eq!(config.base_url, "http://localhost:8000/");
        assert_eq!(config.token_length, 10);
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("LINK_TTL_SECS");
        env::remove_var("SWEEP_INTERVAL_SECS");
        env::remove_var("SERVER_PORT");
        env::remove_var("BASE_URL");
        env::remove_var("TOKEN_LENGTH");

        let config = Config::from_env();
        assert_eq!(config.link_ttl, DEFAULT_LINK_TTL_SECS);
        assert_eq!(config.sweep_interval, DEFAULT_SWEEP_INTERVAL_SECS);
        assert_eq!(config.server_port, DEFAULT_SERVER_PORT);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.token_length, DEFAULT_TOKEN_LENGTH);
    }

    #[test]
    fn test_durations() {
        let config = Config::default();
        assert_eq!(config.ttl(), chrono::Duration::days(7));
        assert_eq!(config.sweep_period(), Duration::from_secs(30 * 24 * 3600));
    }

    #[test]
    fn test_out_of_range_ttl_falls_back() {
        let config = Config {
            link_ttl: u64::MAX,
            ..Config::default()
        };
        assert_eq!(config.ttl(), chrono::Duration::days(7));

        let config = Config {
            link_ttl: 100_000_000_000_000_000,
            ..Config::default()
        };
        assert_eq!(config.ttl(), chrono::Duration::days(7));
    }

    #[test]
    fn test_out_of_range_sweep_interval_falls_back() {
        let config = Config {
            sweep_interval: u64::MAX,
            ..Config::default()
        };
        assert_eq!(
            config.sweep_period(),
            Duration::from_secs(DEFAULT_SWEEP_INTERVAL_SECS)
        );
    }

    #[test]
    fn test_longest_accepted_durations() {
        let config = Config {
            link_ttl: MAX_DURATION_SECS,
            sweep_interval: MAX_DURATION_SECS,
            ..Config::default()
        };
        assert_eq!(
            config.ttl(),
            chrono::Duration::seconds(MAX_DURATION_SECS as i64)
        );
        assert_eq!(config.sweep_period(), Duration::from_secs(MAX_DURATION_SECS));
    }

    #[test]
    fn test_parse_duration() {
        let parse = |raw: &str| parse_duration("LINK_TTL_SECS", Some(raw.to_string()), 60);

        assert_eq!(parse_duration("LINK_TTL_SECS", None, 60), 60);
        assert_eq!(parse(" 3600 "), 3600);
        assert_eq!(parse("0"), 60);
        assert_eq!(parse("-5"), 60);
        assert_eq!(parse("1e17"), 60);
        assert_eq!(parse("100000000000000000"), 60);
        assert_eq!(parse(&u64::MAX.to_string()), 60);
        assert_eq!(parse(&MAX_DURATION_SECS.to_string()), MAX_DURATION_SECS);
    }

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(
            normalize_base_url("https://sho.rt".to_string()),
            "https://sho.rt/"
        );
        assert_eq!(
            normalize_base_url(" https://sho.rt/ ".to_string()),
            "https://sho.rt/"
        );
    }
}
