//! Configuration management utilities

use serde::{Deserialize, Serialize};

/// Application identity shared by the dashboard binaries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application name
    pub app_name: String,
    /// Environment (development, production, ...)
    pub environment: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: "stock-dashboard".to_string(),
            environment: "development".to_string(),
        }
    }
}

impl Config {
    /// Build from the environment, falling back to defaults.
    ///
    /// Reads `DASHBOARD_ENV` for the environment label.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            environment: env_var("DASHBOARD_ENV").unwrap_or(defaults.environment),
            ..defaults
        }
    }
}

/// Read an environment variable, treating blank values as unset.
pub fn env_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.app_name, "stock-dashboard");
        assert_eq!(config.environment, "development");
    }

    #[test]
    fn test_env_var_missing() {
        assert!(env_var("DASHBOARD_UTILS_TEST_SURELY_UNSET_VARIABLE").is_none());
    }
}
