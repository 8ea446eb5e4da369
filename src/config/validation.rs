//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, limits consistent)
//! - Check addresses and upstream URLs parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use std::path::Path;

use thiserror::Error;
use url::Url;

use crate::config::schema::AppConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_socket_addr(&mut errors, "listener.bind_address", &config.listener.bind_address);
    if config.places.enabled {
        check_socket_addr(&mut errors, "places.bind_address", &config.places.bind_address);
    }
    if config.observability.metrics_enabled {
        check_socket_addr(
            &mut errors,
            "observability.metrics_address",
            &config.observability.metrics_address,
        );
    }

    check_url(&mut errors, "flights.base_url", &config.flights.base_url);
    check_url(&mut errors, "places.base_url", &config.places.base_url);

    check_positive(&mut errors, "timeouts.request_secs", config.timeouts.request_secs);
    check_positive(&mut errors, "flights.timeout_secs", config.flights.timeout_secs);
    check_positive(&mut errors, "places.timeout_secs", config.places.timeout_secs);

    // The request timeout must outlast upstream calls so their failure is reported.
    check_outlasts(&mut errors, config, "flights.timeout_secs", config.flights.timeout_secs);
    if config.places.enabled {
        check_outlasts(&mut errors, config, "places.timeout_secs", config.places.timeout_secs);
    }

    let flights = &config.flights;
    if flights.default_limit == 0 {
        errors.push(ValidationError::new("flights.default_limit", "must be greater than 0"));
    }
    if flights.default_limit > flights.max_limit {
        errors.push(ValidationError::new(
            "flights.default_limit",
            format!("must not exceed flights.max_limit ({})", flights.max_limit),
        ));
    }

    let archive = &config.archive;
    if archive.build_command.is_empty() || archive.build_command[0].trim().is_empty() {
        errors.push(ValidationError::new("archive.build_command", "must name a program"));
    }
    if archive.build_dir.is_empty() || Path::new(&archive.build_dir).is_absolute() {
        errors.push(ValidationError::new(
            "archive.build_dir",
            "must be a non-empty path relative to archive.project_root",
        ));
    }
    if archive.project_name.trim().is_empty() {
        errors.push(ValidationError::new("archive.project_name", "must not be empty"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_socket_addr(errors: &mut Vec<ValidationError>, field: &str, value: &str) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(field, format!("'{}' is not a socket address", value)));
    }
}

fn check_url(errors: &mut Vec<ValidationError>, field: &str, value: &str) {
    if let Err(e) = Url::parse(value) {
        errors.push(ValidationError::new(field, format!("'{}' is not a valid URL: {}", value, e)));
    }
}

fn check_positive(errors: &mut Vec<ValidationError>, field: &str, value: u64) {
    if value == 0 {
        errors.push(ValidationError::new(field, "must be greater than 0"));
    }
}

fn check_outlasts(errors: &mut Vec<ValidationError>, config: &AppConfig, field: &str, upstream_secs: u64) {
    let request_secs = config.timeouts.request_secs;
    if request_secs > 0 && request_secs <= upstream_secs {
        errors.push(ValidationError::new(
            "timeouts.request_secs",
            format!("must be greater than {} ({})", field, upstream_secs),
        ));
    }
}
