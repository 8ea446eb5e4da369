//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the travel proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration for the main API server.
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Flight data upstream settings.
    pub flights: FlightApiConfig,

    /// Places search upstream and auxiliary server settings.
    pub places: PlacesConfig,

    /// Source/build archive settings.
    pub archive: ArchiveConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Security hardening settings.
    pub security: SecurityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Timeout configuration for inbound requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Flight data (AviationStack-compatible) upstream configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FlightApiConfig {
    /// Access key. `None` means flight tracking is not configured.
    pub api_key: Option<String>,

    /// Base URL of the upstream API, without trailing endpoint.
    pub base_url: String,

    /// Outbound request timeout in seconds.
    pub timeout_secs: u64,

    /// Result limit used when the caller omits one.
    pub default_limit: u32,

    /// Upper bound applied to caller-supplied limits.
    pub max_limit: u32,
}

impl Default for FlightApiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "http://api.aviationstack.com/v1".to_string(),
            timeout_secs: 10,
            default_limit: 10,
            max_limit: 100,
        }
    }
}

/// Places search upstream configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PlacesConfig {
    /// Start the auxiliary places server.
    pub enabled: bool,

    /// Bind address of the auxiliary server.
    pub bind_address: String,

    /// Places API key.
    pub api_key: Option<String>,

    /// Base URL of the places API.
    pub base_url: String,

    /// Outbound request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for PlacesConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            bind_address: "0.0.0.0:3001".to_string(),
            api_key: None,
            base_url: "https://maps.googleapis.com/maps/api/place".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Archive builder configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ArchiveConfig {
    /// Root of the project tree to snapshot.
    pub project_root: String,

    /// Label used in archive filenames.
    pub project_name: String,

    /// Directory for temporary archives. Defaults to the OS temp dir.
    pub temp_dir: Option<String>,

    /// Web export command, run in `project_root` before a build snapshot.
    pub build_command: Vec<String>,

    /// Build output directory, relative to `project_root`.
    pub build_dir: String,

    /// Path globs excluded from source snapshots.
    pub exclude: Vec<String>,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            project_root: ".".to_string(),
            project_name: "travel-planner".to_string(),
            temp_dir: None,
            build_command: ["npx", "expo", "export", "--platform", "web"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            build_dir: "dist".to_string(),
            exclude: ["node_modules", ".expo", "dist", "web-build", ".git", "*.log"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Security hardening configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Enable security headers.
    pub enable_headers: bool,
    /// Maximum body size in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            enable_headers: true,
            max_body_size: 64 * 1024, // 64KB
        }
    }
}
