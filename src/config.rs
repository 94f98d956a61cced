//! Configuration Module
//!
//! Handles loading the demo group's configuration from environment variables.

use std::env;

const DEFAULT_GROUP_NAME: &str = "scores";
const DEFAULT_CACHE_BYTES: i64 = 2 << 10;

/// Group configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Name the group is registered under
    pub group_name: String,
    /// Byte budget of the group's cache, 0 = unbounded
    pub cache_bytes: i64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `GROUP_NAME` - Registry name of the group (default: "scores")
    /// - `CACHE_BYTES` - Cache byte budget, 0 for unbounded (default: 2048)
    ///
    /// Negative or unparsable budgets fall back to the default.
    pub fn from_env() -> Self {
        Self {
            group_name: env::var("GROUP_NAME")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_GROUP_NAME.to_string()),
            cache_bytes: env::var("CACHE_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|bytes: &i64| *bytes >= 0)
                .unwrap_or(DEFAULT_CACHE_BYTES),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            group_name: DEFAULT_GROUP_NAME.to_string(),
            cache_bytes: DEFAULT_CACHE_BYTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.group_name, "scores");
        assert_eq!(config.cache_bytes, 2048);
    }

    #[test]
    fn test_config_from_env() {
        // Single test touches the env vars so parallel tests cannot race on them
        env::remove_var("GROUP_NAME");
        env::remove_var("CACHE_BYTES");

        let config = Config::from_env();
        assert_eq!(config.group_name, "scores");
        assert_eq!(config.cache_bytes, 2048);

        env::set_var("GROUP_NAME", "users");
        env::set_var("CACHE_BYTES", "0");
        let config = Config::from_env();
        assert_eq!(config.group_name, "users");
        assert_eq!(config.cache_bytes, 0);

        env::set_var("CACHE_BYTES", "-5");
        assert_eq!(Config::from_env().cache_bytes, 2048);

        env::set_var("CACHE_BYTES", "lots");
        assert_eq!(Config::from_env().cache_bytes, 2048);

        env::remove_var("GROUP_NAME");
        env::remove_var("CACHE_BYTES");
    }
}
