//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize, overlay env credentials)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!     → handed to AppState constructors; handlers never read the env
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; no hot reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::AppConfig;
pub use schema::ArchiveConfig;
pub use schema::FlightApiConfig;
pub use schema::ListenerConfig;
pub use schema::ObservabilityConfig;
pub use schema::PlacesConfig;
pub use schema::SecurityConfig;
