//! Configuration loading from disk and the process environment.

use std::path::Path;
use std::fs;
use crate::config::schema::AppConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable carrying the flight data access key.
pub const ENV_FLIGHTS_API_KEY: &str = "AVIATIONSTACK_API_KEY";
/// Environment variable overriding the flight data base URL.
pub const ENV_FLIGHTS_BASE_URL: &str = "AVIATIONSTACK_BASE_URL";
/// Environment variable carrying the places API key.
pub const ENV_PLACES_API_KEY: &str = "GOOGLE_PLACES_API_KEY";
/// Environment variable overriding the places base URL.
pub const ENV_PLACES_BASE_URL: &str = "GOOGLE_PLACES_BASE_URL";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load a TOML file into an unvalidated configuration.
pub fn read_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    toml::from_str(&content).map_err(ConfigError::Parse)
}

/// Build the effective configuration: file (or defaults), then environment
/// credentials, then validation.
///
/// `lookup` resolves environment variables; pass `|k| std::env::var(k).ok()`
/// in production and a map lookup in tests.
pub fn load_config<F>(path: Option<&Path>, lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) => read_config(path)?,
        None => AppConfig::default(),
    };
    apply_env_overrides(&mut config, lookup);
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Overlay credentials and upstream URLs from the environment.
///
/// Empty values are treated as unset.
pub fn apply_env_overrides<F>(config: &mut AppConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(key) = get(ENV_FLIGHTS_API_KEY) {
        config.flights.api_key = Some(key);
    }
    if let Some(url) = get(ENV_FLIGHTS_BASE_URL) {
        config.flights.base_url = url;
    }
    if let Some(key) = get(ENV_PLACES_API_KEY) {
        config.places.api_key = Some(key);
    }
    if let Some(url) = get(ENV_PLACES_BASE_URL) {
        config.places.base_url = url;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_env_overrides_credentials() {
        let vars = env(&[
            (ENV_FLIGHTS_API_KEY, "flight-key"),
            (ENV_PLACES_API_KEY, "places-key"),
            (ENV_PLACES_BASE_URL, "http://127.0.0.1:9999"),
        ]);
        let config = load_config(None, |k| vars.get(k).cloned()).unwrap();

        assert_eq!(config.flights.api_key.as_deref(), Some("flight-key"));
        assert_eq!(config.places.api_key.as_deref(), Some("places-key"));
        assert_eq!(config.places.base_url, "http://127.0.0.1:9999");
    }

    #[test]
    fn test_empty_env_value_is_unset() {
        let vars = env(&[(ENV_FLIGHTS_API_KEY, "  ")]);
        let config = load_config(None, |k| vars.get(k).cloned()).unwrap();
        assert!(config.flights.api_key.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[listener]\nbind_address = \"127.0.0.1:7000\"").unwrap();

        let config = load_config(Some(file.path()), |_| None).unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:7000");
    }

    #[test]
    fn test_invalid_file_reports_validation() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[timeouts]\nrequest_secs = 0").unwrap();

        let err = load_config(Some(file.path()), |_| None).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("timeouts.request_secs"));
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Some(Path::new("/nonexistent/travel.toml")), |_| None).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
